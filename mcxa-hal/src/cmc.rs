//! Core Mode Controller (CMC)
//!
//! The CMC decides what the core and the main power domain do on the next
//! `WFI`: which clocks are gated and which low-power mode the domain drops to.
//! It also latches the cause of the last reset, which tells a wake-up from
//! Deep Power Down apart from a cold boot.
//!
//! ```no_run
//! use mcxa_hal::{cmc::{Cmc, ClockMode, CmcConfig, LowPowerMode}, pac};
//!
//! let pac = pac::Peripherals::take().unwrap();
//! let cmc = Cmc::new(pac.CMC);
//! cmc.configure(&CmcConfig::default());
//! if cmc.reset_status().wakeup() {
//!     // we are coming back from a low-power mode
//! }
//! cmc.set_clock_mode(ClockMode::GateAllSystemClocksEnterLowPower);
//! cmc.set_main_power_mode(LowPowerMode::DeepSleep);
//! ```

use crate::pac::{self, cmc};

bitfield::bitfield! {
    /// Causes of the most recent reset, as latched in `SRS`.
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[derive(Default, Copy, Clone, PartialEq, Eq)]
    pub struct ResetStatus(u32);
    impl Debug;
    /// Wake-up from a low-power mode that powers the core domain off.
    pub wakeup, _: 0;
    /// Power-on reset.
    pub por, _: 1;
    /// Voltage detect reset.
    pub voltage_detect, _: 2;
    /// Warm reset.
    pub warm, _: 4;
    /// Fatal reset.
    pub fatal, _: 5;
    /// RESET pin.
    pub pin, _: 8;
    /// Debug access port.
    pub dap, _: 9;
    /// Reset acknowledge timeout.
    pub reset_ack_timeout, _: 10;
    /// Low-power acknowledge timeout.
    pub low_power_ack_timeout, _: 11;
    /// System clock generator.
    pub scg, _: 12;
    /// Windowed watchdog.
    pub wwdt, _: 13;
    /// Software reset.
    pub software, _: 14;
    /// Core lockup.
    pub lockup, _: 15;
}

/// Clock gating applied when the core executes `WFI` (`CKCTRL.CKMODE`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockMode {
    /// No clocks gated
    GateNone = 0x0,
    /// Core clock gated
    GateCoreClock = 0x1,
    /// Core and platform clocks gated
    GateCoreAndPlatformClocks = 0x3,
    /// Every system clock gated, and the domain enters the mode set in `PMCTRL`
    GateAllSystemClocksEnterLowPower = 0xF,
}

/// Low-power mode of the main power domain (`PMCTRL.LPMODE`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LowPowerMode {
    /// Active, or Sleep when the core clock is gated
    ActiveOrSleep = 0x0,
    /// Deep Sleep
    DeepSleep = 0x1,
    /// Power Down
    PowerDown = 0x3,
    /// Deep Power Down
    DeepPowerDown = 0xF,
}

/// Set of low-power modes the CMC may enter (`PMPROT`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerModeProtection(u8);

impl PowerModeProtection {
    /// Only Active and Sleep
    pub const NONE: Self = Self(0x0);
    /// Deep Sleep allowed
    pub const DEEP_SLEEP: Self = Self(0x1);
    /// Power Down allowed
    pub const POWER_DOWN: Self = Self(0x2);
    /// Deep Power Down allowed
    pub const DEEP_POWER_DOWN: Self = Self(0x8);
    /// Every low-power mode allowed
    pub const ALL: Self = Self(0xF);

    /// Raw `PMPROT.LPMODE` bits
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for PowerModeProtection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Behaviour of the flash memory while the core clock is gated (`FLASHCR`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashMode {
    /// Put the flash in low power whenever the core clock is gated
    pub doze: bool,
    /// Leave low power for the duration of an access
    pub wake: bool,
    /// Disable flash accesses entirely
    pub disable: bool,
}

/// Settings re-applied at every return to Active.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CmcConfig {
    /// Keep the debugger attached across low-power modes
    pub low_power_debug: bool,
    /// Low-power modes that may be entered
    pub allowed_modes: PowerModeProtection,
    /// Flash behaviour while the core clock is gated
    pub flash: FlashMode,
}

impl Default for CmcConfig {
    /// Debug off in low power, every mode allowed, flash doze with wake on access.
    fn default() -> Self {
        CmcConfig {
            low_power_debug: false,
            allowed_modes: PowerModeProtection::ALL,
            flash: FlashMode {
                doze: true,
                wake: true,
                disable: false,
            },
        }
    }
}

/// Core Mode Controller driver
pub struct Cmc {
    regs: &'static cmc::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Cmc {}

impl Cmc {
    /// Takes ownership of the CMC.
    pub fn new(dev: pac::CMC) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static cmc::RegisterBlock) -> Self {
        Cmc { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static cmc::RegisterBlock {
        self.regs
    }

    /// Applies debug, protection and flash settings in one go.
    pub fn configure(&self, config: &CmcConfig) {
        self.set_low_power_debug(config.low_power_debug);
        self.allow_power_modes(config.allowed_modes);
        self.set_flash_mode(config.flash);
    }

    /// Keeps (`true`) or stops (`false`) debug in low-power modes.
    pub fn set_low_power_debug(&self, enable: bool) {
        if enable {
            self.regs.dbgctl.clear_bits(cmc::DBGCTL_SOD.mask());
        } else {
            self.regs.dbgctl.set_bits(cmc::DBGCTL_SOD.mask());
        }
    }

    /// Selects which low-power modes may be entered.
    ///
    /// The hardware only accepts the first write after a reset; later writes
    /// are ignored.
    pub fn allow_power_modes(&self, modes: PowerModeProtection) {
        self.regs
            .pmprot
            .write_field(cmc::PMPROT_LPMODE, modes.bits() as u32);
    }

    /// Low-power modes currently allowed.
    pub fn allowed_power_modes(&self) -> PowerModeProtection {
        PowerModeProtection(self.regs.pmprot.read_field(cmc::PMPROT_LPMODE) as u8)
    }

    /// Configures the flash behaviour while the core clock is gated.
    pub fn set_flash_mode(&self, mode: FlashMode) {
        self.regs.flashcr.modify(|r| {
            let mut r = r
                & !(cmc::FLASHCR_FLASHDIS.mask()
                    | cmc::FLASHCR_FLASHDOZE.mask()
                    | cmc::FLASHCR_FLASHWAKE.mask());
            r |= cmc::FLASHCR_FLASHDIS.bits(mode.disable as u32);
            r |= cmc::FLASHCR_FLASHDOZE.bits(mode.doze as u32);
            r |= cmc::FLASHCR_FLASHWAKE.bits(mode.wake as u32);
            r
        });
    }

    /// Cause of the most recent reset.
    pub fn reset_status(&self) -> ResetStatus {
        ResetStatus(self.regs.srs.read())
    }

    /// Was the last reset a wake-up from a low-power mode?
    pub fn is_wakeup_reset(&self) -> bool {
        self.reset_status().wakeup()
    }

    /// Clock gating for the next `WFI`.
    ///
    /// Does nothing once `CKCTRL` has been locked.
    pub fn set_clock_mode(&self, mode: ClockMode) {
        if self.regs.ckctrl.is_set(cmc::CKCTRL_LOCK.mask()) {
            return;
        }
        self.regs.ckctrl.write_field(cmc::CKMODE, mode as u32);
    }

    /// Current clock gating selection.
    pub fn clock_mode(&self) -> u8 {
        self.regs.ckctrl.read_field(cmc::CKMODE) as u8
    }

    /// Low-power mode the main domain enters on the next `WFI`.
    pub fn set_main_power_mode(&self, mode: LowPowerMode) {
        self.regs.pmctrl.write_field(cmc::LPMODE, mode as u32);
    }

    /// Current main domain low-power mode selection.
    pub fn main_power_mode(&self) -> u8 {
        self.regs.pmctrl.read_field(cmc::LPMODE) as u8
    }
}
