//! Core clock and oscillator control
//!
//! The core runs from either FRO_HF (the 192 MHz FIRC) or FRO12M (the SIRC),
//! divided down by the SYSCON AHB divider. [`Clocks::boot`] switches between
//! the presets in [`common_configs`] and moves the core LDO along with the
//! frequency:
//!
//! * a higher voltage is applied before the frequency goes up,
//! * a lower voltage only after the frequency has come down,
//! * flash wait states go up before a speed-up and down after a slow-down.
//!
//! ```no_run
//! use mcxa_hal::{clocks::{Clocks, CoreClockPreset}, pac, spc::{CoreLdoConfig, Spc}};
//!
//! let pac = pac::Peripherals::take().unwrap();
//! let spc = Spc::new(pac.SPC0);
//! let clocks = Clocks::new(pac.SCG0, pac.SYSCON, pac.FMU0);
//! let freq = clocks
//!     .boot(&spc, CoreClockPreset::Fro96M, CoreLdoConfig::NORMAL)
//!     .unwrap();
//! assert_eq!(freq.to_MHz(), 96);
//! ```

use core::convert::Infallible;

use fugit::HertzU32;
use nb::Error::WouldBlock;

use crate::{
    pac::{self, fmu, scg, syscon, Field, Reg},
    spc::{self, CoreLdoConfig, Spc},
};

/// FRO_HF output frequency
pub const FIRC_FREQ: HertzU32 = HertzU32::MHz(192);
/// FRO12M output frequency
pub const SIRC_FREQ: HertzU32 = HertzU32::MHz(12);

/// Main clock source (`RCCR.SCS`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MainClockSource {
    /// FRO12M
    Sirc = 2,
    /// FRO_HF
    Firc = 3,
}

impl MainClockSource {
    /// Oscillator output frequency
    pub const fn freq(self) -> HertzU32 {
        match self {
            MainClockSource::Sirc => SIRC_FREQ,
            MainClockSource::Firc => FIRC_FREQ,
        }
    }

    fn from_bits(bits: u32) -> Result<Self, Error> {
        match bits {
            2 => Ok(MainClockSource::Sirc),
            3 => Ok(MainClockSource::Firc),
            other => Err(Error::UnsupportedClockSource(other as u8)),
        }
    }
}

/// Everything needed to run the core at one frequency
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CoreClockConfig {
    /// Resulting core/system clock
    pub freq: HertzU32,
    /// Main clock source
    pub source: MainClockSource,
    /// AHB divider, 1..=256
    pub ahb_div: u16,
    /// Flash read wait states needed at `freq`
    pub flash_wait_states: u8,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CoreClockConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u32} Hz from {} /{=u16}, {=u8} wait states",
            self.freq.raw(),
            self.source,
            self.ahb_div,
            self.flash_wait_states
        )
    }
}

/// Common configs for the core clock
pub mod common_configs {
    use super::{CoreClockConfig, MainClockSource};
    use fugit::HertzU32;

    /// FRO_HF / 2
    pub const FRO_HF_96MHZ: CoreClockConfig = CoreClockConfig {
        freq: HertzU32::MHz(96),
        source: MainClockSource::Firc,
        ahb_div: 2,
        flash_wait_states: 1,
    };

    /// FRO_HF / 4
    pub const FRO_HF_48MHZ: CoreClockConfig = CoreClockConfig {
        freq: HertzU32::MHz(48),
        source: MainClockSource::Firc,
        ahb_div: 4,
        flash_wait_states: 0,
    };

    /// FRO12M / 1
    pub const FRO12M_12MHZ: CoreClockConfig = CoreClockConfig {
        freq: HertzU32::MHz(12),
        source: MainClockSource::Sirc,
        ahb_div: 1,
        flash_wait_states: 0,
    };
}

/// The core clock settings offered by the board
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreClockPreset {
    /// 96 MHz from FRO_HF
    Fro96M,
    /// 48 MHz from FRO_HF
    Fro48M,
    /// 12 MHz from FRO12M
    Fro12M,
}

impl CoreClockPreset {
    /// Full configuration of the preset
    pub const fn config(self) -> CoreClockConfig {
        match self {
            CoreClockPreset::Fro96M => common_configs::FRO_HF_96MHZ,
            CoreClockPreset::Fro48M => common_configs::FRO_HF_48MHZ,
            CoreClockPreset::Fro12M => common_configs::FRO12M_12MHZ,
        }
    }

    /// Core frequency of the preset
    pub const fn freq(self) -> HertzU32 {
        self.config().freq
    }
}

/// Possible errors when changing the core clock
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The SPC refused the core LDO setting
    Regulator(spc::Error),
    /// The main clock runs from a source this driver does not handle
    UnsupportedClockSource(u8),
    /// The divider is outside 1..=256
    BadArgument,
    /// The oscillator still feeds the core
    ClockInUse,
}

impl From<spc::Error> for Error {
    fn from(e: spc::Error) -> Self {
        Error::Regulator(e)
    }
}

/// Clock tree driver: SCG oscillators, SYSCON divider and FMU wait states
pub struct Clocks {
    scg: &'static scg::RegisterBlock,
    syscon: &'static syscon::RegisterBlock,
    fmu: &'static fmu::RegisterBlock,
}

// SAFETY: the driver owns the SCG, SYSCON and FMU blocks, like the peripheral
// tokens it was built from.
unsafe impl Send for Clocks {}

impl Clocks {
    /// Takes ownership of the clock blocks.
    pub fn new(scg: pac::SCG0, syscon: pac::SYSCON, fmu: pac::FMU0) -> Self {
        Self::from_registers(scg.registers(), syscon.registers(), fmu.registers())
    }

    /// Builds the driver over arbitrary register blocks.
    pub fn from_registers(
        scg: &'static scg::RegisterBlock,
        syscon: &'static syscon::RegisterBlock,
        fmu: &'static fmu::RegisterBlock,
    ) -> Self {
        Clocks { scg, syscon, fmu }
    }

    /// The SCG register block.
    pub fn scg(&self) -> &'static scg::RegisterBlock {
        self.scg
    }

    /// The SYSCON register block.
    pub fn syscon(&self) -> &'static syscon::RegisterBlock {
        self.syscon
    }

    /// The FMU register block.
    pub fn fmu(&self) -> &'static fmu::RegisterBlock {
        self.fmu
    }

    /// Source the core is running from.
    pub fn main_clock_source(&self) -> Result<MainClockSource, Error> {
        MainClockSource::from_bits(self.scg.csr.read_field(scg::SCS))
    }

    /// Current AHB divider.
    pub fn ahb_divider(&self) -> u16 {
        self.syscon.ahbclkdiv.read_field(syscon::AHBCLKDIV_DIV) as u16 + 1
    }

    /// Current core/system clock frequency, read back from the hardware.
    pub fn core_sys_clock_freq(&self) -> Result<HertzU32, Error> {
        let source = self.main_clock_source()?;
        Ok(source.freq() / self.ahb_divider() as u32)
    }

    /// Current flash read wait states.
    pub fn flash_wait_states(&self) -> u8 {
        self.fmu.fctrl.read_field(fmu::FCTRL_RWSC) as u8
    }

    /// Runs `f` with the MRCC clock configuration unlocked, then locks it again.
    pub fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R {
        self.syscon
            .clkunlock
            .clear_bits(syscon::CLKUNLOCK_UNLOCK.mask());
        let result = f();
        self.syscon
            .clkunlock
            .set_bits(syscon::CLKUNLOCK_UNLOCK.mask());
        result
    }

    /// Moves the core to `preset`, with the Active core LDO at `ldo`.
    ///
    /// Returns the new core frequency.
    pub fn boot(
        &self,
        spc: &Spc,
        preset: CoreClockPreset,
        ldo: CoreLdoConfig,
    ) -> Result<HertzU32, Error> {
        let current = spc.active_core_ldo();
        let raise = ldo.voltage >= current.voltage;

        if raise {
            spc.set_active_core_ldo(ldo)?;
            let _ = nb::block!(spc.wait_not_busy());
        }
        self.set_core_clock(&preset.config())?;
        if !raise {
            spc.set_active_core_ldo(ldo)?;
            let _ = nb::block!(spc.wait_not_busy());
        }

        #[cfg(feature = "defmt")]
        defmt::info!("clocks: {} at {=u16} mV", preset, ldo.voltage.millivolts());
        self.core_sys_clock_freq()
    }

    /// Switches source and divider, keeping the flash wait states safe.
    ///
    /// The steps are applied in the order given by [`switch_steps`].
    pub fn set_core_clock(&self, config: &CoreClockConfig) -> Result<(), Error> {
        if !(1..=256).contains(&config.ahb_div) {
            return Err(Error::BadArgument);
        }
        let steps = switch_steps(self.ahb_divider(), self.flash_wait_states(), config);
        for step in steps.into_iter().flatten() {
            match step {
                SwitchStep::WaitStates(ws) => self.set_flash_wait_states(ws),
                SwitchStep::Divider(div) => self.set_ahb_divider(div),
                SwitchStep::Source(source) => {
                    self.start_source(source);
                    self.select_main_clock(source);
                }
            }
        }
        Ok(())
    }

    fn start_source(&self, source: MainClockSource) {
        match source {
            MainClockSource::Firc => {
                self.enable_firc();
                let _ = nb::block!(self.await_firc_valid());
            }
            MainClockSource::Sirc => {
                let _ = nb::block!(self.await_sirc_valid());
            }
        }
    }

    fn set_flash_wait_states(&self, ws: u8) {
        self.fmu.fctrl.write_field(fmu::FCTRL_RWSC, ws as u32);
    }

    fn set_ahb_divider(&self, div: u16) {
        self.syscon
            .ahbclkdiv
            .write_field(syscon::AHBCLKDIV_DIV, (div - 1) as u32);
        let _ = nb::block!(self.await_divider_stable());
    }

    fn select_main_clock(&self, source: MainClockSource) {
        self.scg.rccr.write_field(scg::SCS, source as u32);
        let _ = nb::block!(self.await_main_clock(source));
    }

    /// Completes once the AHB divider has taken its new value.
    pub fn await_divider_stable(&self) -> nb::Result<(), Infallible> {
        if self.syscon.ahbclkdiv.is_set(syscon::AHBCLKDIV_UNSTAB.mask()) {
            return Err(WouldBlock);
        }
        Ok(())
    }

    /// Completes once the core runs from `source`.
    pub fn await_main_clock(&self, source: MainClockSource) -> nb::Result<(), Infallible> {
        if self.scg.csr.read_field(scg::SCS) != source as u32 {
            return Err(WouldBlock);
        }
        Ok(())
    }

    /// Completes once FRO_HF is valid.
    pub fn await_firc_valid(&self) -> nb::Result<(), Infallible> {
        if !self.scg.firccsr.is_set(scg::FIRCCSR_FIRCVLD.mask()) {
            return Err(WouldBlock);
        }
        Ok(())
    }

    /// Completes once FRO12M is valid.
    pub fn await_sirc_valid(&self) -> nb::Result<(), Infallible> {
        if !self.scg.sirccsr.is_set(scg::SIRCCSR_SIRCVLD.mask()) {
            return Err(WouldBlock);
        }
        Ok(())
    }

    /// Starts FRO_HF.
    pub fn enable_firc(&self) {
        with_unlocked(&self.scg.firccsr, scg::FIRCCSR_LK, |r| {
            r.set_bits(scg::FIRCCSR_FIRCEN.mask())
        });
    }

    /// Stops FRO_HF and its peripheral clocks.
    ///
    /// Refused while FRO_HF still feeds the core.
    pub fn disable_firc(&self) -> Result<(), Error> {
        if self.main_clock_source() == Ok(MainClockSource::Firc) {
            return Err(Error::ClockInUse);
        }
        with_unlocked(&self.scg.firccsr, scg::FIRCCSR_LK, |r| {
            r.clear_bits(
                scg::FIRCCSR_FIRC_SCLK_PERIPH_EN.mask()
                    | scg::FIRCCSR_FIRC_FCLK_PERIPH_EN.mask()
                    | scg::FIRCCSR_FIRCEN.mask(),
            )
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("clocks: FRO_HF off");
        Ok(())
    }

    /// Gates (or ungates) both FRO_HF peripheral clocks.
    pub fn set_firc_peripheral_clocks(&self, enable: bool) {
        let mask =
            scg::FIRCCSR_FIRC_SCLK_PERIPH_EN.mask() | scg::FIRCCSR_FIRC_FCLK_PERIPH_EN.mask();
        with_unlocked(&self.scg.firccsr, scg::FIRCCSR_LK, |r| {
            if enable {
                r.set_bits(mask)
            } else {
                r.clear_bits(mask)
            }
        });
    }

    /// Gates (or ungates) the FRO12M peripheral clock.
    pub fn set_sirc_peripheral_clock(&self, enable: bool) {
        let mask = scg::SIRCCSR_SIRC_CLK_PERIPH_EN.mask();
        with_unlocked(&self.scg.sirccsr, scg::SIRCCSR_LK, |r| {
            if enable {
                r.set_bits(mask)
            } else {
                r.clear_bits(mask)
            }
        });
    }

    /// Keeps FRO12M and its peripheral clock running in Deep Sleep (`true`),
    /// or lets FRO12M stop there (`false`).
    pub fn set_sirc_in_deep_sleep(&self, enable: bool) {
        with_unlocked(&self.scg.sirccsr, scg::SIRCCSR_LK, |r| {
            if enable {
                r.set_bits(scg::SIRCCSR_SIRCSTEN.mask() | scg::SIRCCSR_SIRC_CLK_PERIPH_EN.mask())
            } else {
                r.clear_bits(scg::SIRCCSR_SIRCSTEN.mask())
            }
        });
    }
}

/// One register update of a core clock switch
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SwitchStep {
    /// Flash read wait states
    WaitStates(u8),
    /// AHB divider
    Divider(u16),
    /// Main clock source, started first if needed
    Source(MainClockSource),
}

/// Orders a switch from `current_div`/`current_ws` to `config`.
///
/// Wait states are raised first and lowered last. The larger of the old and
/// new dividers is in place while the source changes, so the core never
/// overshoots either frequency.
pub fn switch_steps(
    current_div: u16,
    current_ws: u8,
    config: &CoreClockConfig,
) -> [Option<SwitchStep>; 4] {
    let ws = SwitchStep::WaitStates(config.flash_wait_states);
    let divider = SwitchStep::Divider(config.ahb_div);
    let source = SwitchStep::Source(config.source);
    let (first, second) = if config.ahb_div > current_div {
        (divider, source)
    } else {
        (source, divider)
    };
    [
        (config.flash_wait_states > current_ws).then_some(ws),
        Some(first),
        Some(second),
        (config.flash_wait_states < current_ws).then_some(ws),
    ]
}

/// `LK` must be clear for a control/status register to accept writes.
fn with_unlocked(reg: &Reg, lock: Field, f: impl FnOnce(&Reg)) {
    reg.clear_bits(lock.mask());
    f(reg);
    reg.set_bits(lock.mask());
}
