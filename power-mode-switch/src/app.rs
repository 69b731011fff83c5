//! The power mode switch state machine
//!
//! One pass of [`PowerModeSwitch::run_once`] prints the banner, asks for a
//! power mode and, unless Active was picked, walks through
//!
//! 1. arming the wake-up button (and isolating VDD_USB below Sleep),
//! 2. the per-mode menus, which set clocks, regulators and RAM retention,
//! 3. parking the console and dropping the MRCC gates,
//! 4. the low-power entry itself,
//! 5. restoring clocks, regulators, gates and console.

use embedded_io::{ReadExactError, WriteFmtError};
use fugit::HertzU32;
use mcxa_hal::{
    arch,
    clocks::{self, Clocks, CoreClockPreset},
    cmc::{Cmc, CmcConfig},
    mrcc::Mrcc,
    pac::Interrupt,
    power::{enter_power_mode, CoreSleep},
    spc::{self, AnalogModules, BandgapMode, CoreLdoConfig, PowerDomain, Spc},
    vbat::{Fro16kOutputs, Vbat},
    wuu::{self, Wuu},
    PowerMode,
};

use crate::{config::DemoConfig, console::Console, menu};

/// Wake-up delay used unless the core drops to retention voltage.
const NO_WAKEUP_DELAY: u16 = 0;

/// Errors of the demo, generic over the console error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The console failed
    Console(E),
    /// The console ran out of input
    InputClosed,
    /// Formatting a console message failed
    Format,
    /// A clock change was refused
    Clock(clocks::Error),
    /// A regulator change was refused
    Regulator(spc::Error),
    /// The wake-up pin could not be armed
    Wakeup(wuu::Error),
}

impl<E> From<WriteFmtError<E>> for Error<E> {
    fn from(e: WriteFmtError<E>) -> Self {
        match e {
            WriteFmtError::Other(e) => Error::Console(e),
            _ => Error::Format,
        }
    }
}

impl<E> From<ReadExactError<E>> for Error<E> {
    fn from(e: ReadExactError<E>) -> Self {
        match e {
            ReadExactError::UnexpectedEof => Error::InputClosed,
            ReadExactError::Other(e) => Error::Console(e),
        }
    }
}

impl<E> From<clocks::Error> for Error<E> {
    fn from(e: clocks::Error) -> Self {
        Error::Clock(e)
    }
}

impl<E> From<spc::Error> for Error<E> {
    fn from(e: spc::Error) -> Self {
        Error::Regulator(e)
    }
}

impl<E> From<wuu::Error> for Error<E> {
    fn from(e: wuu::Error) -> Self {
        Error::Wakeup(e)
    }
}

/// The drivers the demo runs on
pub struct Drivers {
    /// Core Mode Controller
    pub cmc: Cmc,
    /// System Power Controller
    pub spc: Spc,
    /// Wake-Up Unit
    pub wuu: Wuu,
    /// Clock tree
    pub clocks: Clocks,
    /// Global clock gates
    pub mrcc: Mrcc,
    /// FRO16K
    pub vbat: Vbat,
}

/// The demo application
pub struct PowerModeSwitch<C, K> {
    drivers: Drivers,
    console: C,
    core: K,
    board: DemoConfig,
}

type Result<T, C> = core::result::Result<T, Error<<C as embedded_io::ErrorType>::Error>>;

impl<C: Console, K: CoreSleep> PowerModeSwitch<C, K> {
    /// Builds the demo. The console must already be attached.
    pub fn new(drivers: Drivers, console: C, core: K, board: DemoConfig) -> Self {
        PowerModeSwitch {
            drivers,
            console,
            core,
            board,
        }
    }

    /// The drivers.
    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    /// The console.
    pub fn console(&mut self) -> &mut C {
        &mut self.console
    }

    /// The core.
    pub fn core(&mut self) -> &mut K {
        &mut self.core
    }

    /// Releases the console and the core.
    pub fn free(self) -> (Drivers, C, K) {
        (self.drivers, self.console, self.core)
    }

    /// One-time setup after reset.
    pub fn boot(&mut self) -> Result<(), C> {
        let Drivers { cmc, spc, vbat, .. } = &self.drivers;
        if cmc.is_wakeup_reset() {
            // pads are still latched from Power Down
            spc.clear_io_isolation();
        }
        vbat.setup_fro16k(Fro16kOutputs::SYSTEM | Fro16kOutputs::CORE_MAIN);
        self.configure_spc()?;

        // a Deep Power Down wake-up leaves these behind
        self.drivers.wuu.clear_pin_flag(self.board.wakeup_pin);
        arch::interrupt_unpend(Interrupt::WUU0);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "boot done, wake-up reset: {}",
            self.drivers.cmc.is_wakeup_reset()
        );
        write!(self.console, "\r\nNormal Boot.\r\n")?;
        Ok(())
    }

    /// SPC setup: regulators, wake-up delay and low-power request output.
    ///
    /// A refused regulator setting is reported on the console and ends the
    /// setup early; it does not fail the boot.
    fn configure_spc(&mut self) -> Result<(), C> {
        let spc = &self.drivers.spc;
        spc.enable_sram_ldo(true);
        spc.set_active_analog_modules(AnalogModules::ALL, false);

        if spc.set_active_regulators(&self.board.active_regulators).is_err() {
            write!(self.console, "Fail to set regulators in Active mode.")?;
            return Ok(());
        }
        let _ = nb::block!(spc.wait_not_busy());

        spc.set_low_power_analog_modules(AnalogModules::ALL, false);
        spc.set_low_power_wakeup_delay(self.board.retention_wakeup_delay);
        if spc
            .set_low_power_regulators(&self.board.low_power_regulators)
            .is_err()
        {
            write!(self.console, "Fail to set regulators in Low Power Mode.")?;
            return Ok(());
        }
        let _ = nb::block!(spc.wait_not_busy());

        spc.set_low_power_request_config(&self.board.low_power_request);
        Ok(())
    }

    /// One pass of the main loop. Returns the mode that was visited.
    pub fn run_once(&mut self) -> Result<PowerMode, C> {
        let Drivers { cmc, spc, clocks, .. } = &self.drivers;
        if cmc.is_wakeup_reset() {
            spc.clear_io_isolation();
        }
        spc.clear_power_domain_low_power_request(PowerDomain::Main);
        spc.clear_low_power_request();
        cmc.configure(&CmcConfig::default());

        let freq = clocks.core_sys_clock_freq()?;
        self.banner(freq)?;

        let mode = menu::select_power_mode(&mut self.console)?;
        write!(self.console, "\r\n")?;
        if mode != PowerMode::Active {
            self.switch_to(mode)?;
        }

        write!(self.console, "\r\nNext loop.\r\n")?;
        Ok(mode)
    }

    fn banner(&mut self, freq: HertzU32) -> Result<(), C> {
        write!(
            self.console,
            "\r\n###########################    Power Mode Switch Demo    ###########################\r\n"
        )?;
        write!(self.console, "    Core Clock = {}Hz \r\n", freq.to_Hz())?;
        write!(self.console, "    Power mode: Active\r\n")?;
        Ok(())
    }

    /// Full round trip through `mode`.
    pub fn switch_to(&mut self, mode: PowerMode) -> Result<(), C> {
        self.configure_wakeup(mode)?;
        self.prepare(mode)?;
        self.pre_switch();
        enter_power_mode(&self.drivers.cmc, &mut self.core, mode);
        self.post_switch()
    }

    /// Arms the wake-up button; below Sleep also isolates unused domains.
    pub fn configure_wakeup(&mut self, mode: PowerMode) -> Result<(), C> {
        write!(self.console, "Wakeup Button Selected As Wakeup Source.\r\n")?;
        self.drivers
            .wuu
            .set_external_pin(self.board.wakeup_pin, &self.board.wakeup_pin_config)?;

        if mode > PowerMode::Sleep {
            self.drivers
                .spc
                .set_external_voltage_domains(self.board.isolated_domains, 0);
            write!(
                self.console,
                "Isolate power domains: {}\r\n",
                self.board.isolated_domain_names
            )?;
        }
        Ok(())
    }

    /// Runs the menus of `mode` and applies what was chosen.
    pub fn prepare(&mut self, mode: PowerMode) -> Result<(), C> {
        match mode {
            PowerMode::Active => return Ok(()),
            PowerMode::Sleep => {
                self.configure_core_clock(mode)?;
                self.announce(mode)?;
                // the console runs from FRO12M, let it drain first
                self.console.flush().map_err(Error::Console)?;
                let clocks = &self.drivers.clocks;
                clocks.set_firc_peripheral_clocks(false);
                clocks.set_sirc_peripheral_clock(false);
                return Ok(());
            }
            PowerMode::DeepSleep => {
                self.configure_core_clock(mode)?;
                let keep = menu::select_fro12m(&mut self.console)?;
                self.drivers.clocks.set_sirc_in_deep_sleep(keep);
            }
            PowerMode::PowerDown | PowerMode::DeepPowerDown => {
                self.configure_core_clock(mode)?;
                let retention = menu::select_ram_retention(&mut self.console, mode)?;
                self.drivers.spc.set_ram_retention(retention);
            }
        }
        self.announce(mode)
    }

    fn announce(&mut self, mode: PowerMode) -> Result<(), C> {
        write!(self.console, "\r\nEntering {} mode...\r\n", mode.name())?;
        write!(
            self.console,
            "Please press {} to wakeup.(Please only press the wakeup button when this message appears, otherwise it will result in failure to wake up!)\r\n",
            self.board.wakeup_button
        )?;
        Ok(())
    }

    /// Core frequency and LDO for the time before the low-power entry.
    fn configure_core_clock(&mut self, mode: PowerMode) -> Result<(), C> {
        let preset = menu::select_core_clock(&mut self.console, mode)?;
        let Drivers { spc, clocks, .. } = &self.drivers;

        match preset {
            CoreClockPreset::Fro96M => {
                spc.set_low_power_wakeup_delay(NO_WAKEUP_DELAY);
                clocks.boot(spc, preset, CoreLdoConfig::NORMAL)?;
            }
            CoreClockPreset::Fro48M | CoreClockPreset::Fro12M if mode == PowerMode::PowerDown => {
                spc.set_low_power_wakeup_delay(self.board.retention_wakeup_delay);
                clocks.boot(spc, preset, CoreLdoConfig::MID_LOW_DRIVE)?;
                // Active cannot run at 0.6 V; only the low-power LDO goes down.
                spc.set_low_power_core_ldo(CoreLdoConfig::RETENTION)?;
            }
            CoreClockPreset::Fro48M => {
                spc.set_low_power_wakeup_delay(NO_WAKEUP_DELAY);
                clocks.boot(spc, preset, CoreLdoConfig::MID_LOW_DRIVE)?;
            }
            CoreClockPreset::Fro12M => {
                spc.set_low_power_wakeup_delay(NO_WAKEUP_DELAY);
                if mode == PowerMode::Sleep {
                    spc.set_active_voltage_detectors(false)?;
                }
                clocks.boot(spc, preset, CoreLdoConfig::MID_LOW_DRIVE)?;
                clocks.disable_firc()?;
            }
        }
        Ok(())
    }

    /// Parks the console and drops the MRCC gates to the low-power set.
    pub fn pre_switch(&mut self) {
        self.console.suspend();
        let Drivers { mrcc, clocks, .. } = &self.drivers;
        mrcc.set_global_gates(clocks, &self.board.low_power_gates);
    }

    /// Back to 48 MHz at 1.0 V with FRO12M and the detectors on, and the
    /// low-power core LDO back at its boot setting. Then gates and console.
    ///
    /// The gates and the console are restored even if the regulators refuse,
    /// so that the error can still be reported.
    pub fn post_switch(&mut self) -> Result<(), C> {
        let restored = self.restore_core();
        let Drivers { mrcc, clocks, .. } = &self.drivers;
        mrcc.set_global_gates(clocks, &self.board.run_gates);
        self.console.resume().map_err(Error::Console)?;

        #[cfg(feature = "defmt")]
        if let Ok(freq) = clocks.core_sys_clock_freq() {
            defmt::info!("back in Active at {=u32} Hz", freq.to_Hz());
        }
        restored
    }

    fn restore_core(&self) -> Result<(), C> {
        let Drivers { spc, clocks, .. } = &self.drivers;
        // gated in Sleep, and the console needs it back
        clocks.set_sirc_peripheral_clock(true);
        clocks.boot(spc, CoreClockPreset::Fro48M, CoreLdoConfig::MID_LOW_DRIVE)?;
        spc.set_active_bandgap_mode(BandgapMode::EnabledBufferDisabled)?;
        spc.set_active_voltage_detectors(true)?;
        // Power Down may have left it at retention voltage
        spc.set_low_power_core_ldo(self.board.low_power_regulators.core_ldo)?;
        let _ = nb::block!(spc.wait_not_busy());
        Ok(())
    }
}
