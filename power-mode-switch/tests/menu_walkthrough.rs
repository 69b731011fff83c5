//! Drives the whole demo from the host: a scripted console types the keys, a
//! scripted core stands in for the WFI, and every peripheral is a detached
//! register block.

use std::{collections::VecDeque, convert::Infallible};

use embedded_io::{ErrorType, Read, Write};
use mcxa_hal::{
    clocks::{Clocks, MainClockSource},
    cmc::Cmc,
    mrcc::Mrcc,
    pac::{cmc, detached, mrcc, scg, spc as spc_regs},
    power::CoreSleep,
    spc::{BandgapMode, CoreLdoConfig, Spc, VoltageDetector},
    vbat::Vbat,
    wuu::Wuu,
    PowerMode,
};
use power_mode_switch::{config::FRDM_MCXA153, Console, Drivers, Error, PowerModeSwitch};

#[derive(Default)]
struct ScriptedConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
    suspended: bool,
    suspends: usize,
}

impl ScriptedConsole {
    fn type_keys(&mut self, keys: &str) {
        self.input.extend(keys.bytes());
    }

    fn take_output(&mut self) -> String {
        String::from_utf8(core::mem::take(&mut self.output)).unwrap()
    }
}

impl ErrorType for ScriptedConsole {
    type Error = Infallible;
}

impl Read for ScriptedConsole {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        assert!(!self.suspended, "read from a suspended console");
        match (buf.first_mut(), self.input.pop_front()) {
            (Some(slot), Some(key)) => {
                *slot = key;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

impl Write for ScriptedConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        assert!(!self.suspended, "write to a suspended console");
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl Console for ScriptedConsole {
    fn suspend(&mut self) {
        self.suspended = true;
        self.suspends += 1;
    }

    fn resume(&mut self) -> Result<(), Infallible> {
        self.suspended = false;
        Ok(())
    }
}

/// What the hardware looked like while the core was asleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sleep {
    sleep_deep: bool,
    clock_mode: u32,
    power_mode: u32,
    gates: u32,
    firccsr: u32,
    sirccsr: u32,
    lp_core_ldo: CoreLdoConfig,
    wakeup_delay: u16,
}

struct ScriptedCore {
    cmc: &'static cmc::RegisterBlock,
    scg: &'static scg::RegisterBlock,
    mrcc: &'static mrcc::RegisterBlock,
    spc: Spc,
    sleep_deep: bool,
    sleeps: Vec<Sleep>,
}

impl CoreSleep for ScriptedCore {
    fn set_sleep_deep(&mut self, deep: bool) {
        self.sleep_deep = deep;
    }

    fn wait_for_interrupt(&mut self) {
        self.sleeps.push(Sleep {
            sleep_deep: self.sleep_deep,
            clock_mode: self.cmc.ckctrl.read_field(cmc::CKMODE),
            power_mode: self.cmc.pmctrl.read_field(cmc::LPMODE),
            gates: self.mrcc.glb_cc0.read(),
            firccsr: self.scg.firccsr.read(),
            sirccsr: self.scg.sirccsr.read(),
            lp_core_ldo: self.spc.low_power_core_ldo(),
            wakeup_delay: self.spc.low_power_wakeup_delay(),
        });
        // SW2 pressed. The SCG cannot follow RCCR here, so CSR already shows
        // FRO_HF, the source the wake-up path switches back to.
        self.scg
            .csr
            .write_field(scg::SCS, MainClockSource::Firc as u32);
    }
}

const FIRC_PERIPH_CLOCKS: u32 =
    scg::FIRCCSR_FIRC_SCLK_PERIPH_EN.mask() | scg::FIRCCSR_FIRC_FCLK_PERIPH_EN.mask();

type App = PowerModeSwitch<ScriptedConsole, ScriptedCore>;

/// Oscillators valid and the AHB divider at 4, as the boot ROM leaves them.
fn app_on(source: MainClockSource) -> App {
    let clocks = Clocks::from_registers(detached(), detached(), detached());
    clocks.scg().firccsr.write(
        scg::FIRCCSR_FIRCVLD.mask()
            | scg::FIRCCSR_FIRCEN.mask()
            | FIRC_PERIPH_CLOCKS,
    );
    clocks
        .scg()
        .sirccsr
        .write(scg::SIRCCSR_SIRCVLD.mask() | scg::SIRCCSR_SIRC_CLK_PERIPH_EN.mask());
    clocks.scg().csr.write_field(scg::SCS, source as u32);
    clocks.syscon().ahbclkdiv.write(3);

    let cmc = Cmc::from_registers(detached());
    let mrcc = Mrcc::from_registers(detached());
    let spc = Spc::from_registers(detached());
    let core = ScriptedCore {
        cmc: cmc.registers(),
        scg: clocks.scg(),
        mrcc: mrcc.registers(),
        spc: Spc::from_registers(spc.registers()),
        sleep_deep: false,
        sleeps: Vec::new(),
    };
    let drivers = Drivers {
        cmc,
        spc,
        wuu: Wuu::from_registers(detached()),
        clocks,
        mrcc,
        vbat: Vbat::from_registers(detached()),
    };
    PowerModeSwitch::new(drivers, ScriptedConsole::default(), core, FRDM_MCXA153)
}

fn booted() -> App {
    let mut app = app_on(MainClockSource::Firc);
    app.boot().unwrap();
    app.console().take_output();
    app
}

#[test]
fn boot_configures_regulators_and_fro16k() {
    let mut app = app_on(MainClockSource::Firc);
    app.boot().unwrap();

    assert_eq!(app.console().take_output(), "\r\nNormal Boot.\r\n");
    let drivers = app.drivers();
    assert!(drivers.vbat.is_fro16k_enabled());
    assert_eq!(drivers.spc.active_core_ldo(), CoreLdoConfig::MID_NORMAL_DRIVE);
    assert_eq!(
        drivers.spc.active_bandgap_mode(),
        BandgapMode::EnabledBufferDisabled
    );
    assert_eq!(drivers.spc.low_power_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
    assert_eq!(drivers.spc.low_power_wakeup_delay(), 0x5B);
    // output enabled, active low, not forced
    assert_eq!(drivers.spc.registers().lpreq_cfg.read(), 0b011);
    // pads were never latched
    assert_eq!(drivers.spc.registers().sc.read(), 0);
    assert_eq!(drivers.wuu.registers().pf.read(), 1 << 9);
}

#[test]
fn wakeup_reset_releases_io_isolation() {
    let mut app = app_on(MainClockSource::Firc);
    app.drivers().cmc.registers().srs.write(0x1);
    app.boot().unwrap();

    assert_eq!(app.console().take_output(), "\r\nNormal Boot.\r\n");
    let drivers = app.drivers();
    assert_eq!(
        drivers.spc.registers().sc.read(),
        spc_regs::SC_ISO_CLR.mask()
    );
    assert_eq!(drivers.wuu.registers().pf.read(), 1 << 9);
}

#[test]
fn busy_spc_is_reported_not_fatal() {
    let mut app = app_on(MainClockSource::Firc);
    app.drivers()
        .spc
        .registers()
        .sc
        .write(spc_regs::SC_BUSY.mask());
    app.boot().unwrap();

    let out = app.console().take_output();
    assert!(out.starts_with("Fail to set regulators in Active mode."));
    assert!(out.ends_with("Normal Boot.\r\n"));
    assert_eq!(app.drivers().spc.low_power_wakeup_delay(), 0);
}

#[test]
fn active_only_prints_the_menu() {
    let mut app = booted();
    app.console().type_keys("a");
    assert_eq!(app.run_once(), Ok(PowerMode::Active));

    let out = app.console().take_output();
    assert!(out.contains("    Core Clock = 48000000Hz \r\n"));
    assert!(out.contains("\tPress E to enter: DeepPowerDown mode\r\n"));
    assert!(out.contains("\tActive: CPU/System/Bus clock all ON.\r\n"));
    assert!(out.ends_with("\r\nNext loop.\r\n"));
    assert!(app.core().sleeps.is_empty());
    assert_eq!(app.console().suspends, 0);
}

#[test]
fn wrong_input_is_asked_again() {
    let mut app = booted();
    app.console().type_keys("z1ba");
    assert_eq!(app.run_once(), Ok(PowerMode::Sleep));

    let out = app.console().take_output();
    assert_eq!(out.matches("Wrong Input!").count(), 2);
    assert_eq!(out.matches("Waiting for power mode select...").count(), 3);
}

#[test]
fn sleep_at_96mhz() {
    let mut app = booted();
    app.console().type_keys("bA");
    app.run_once().unwrap();

    let out = app.console().take_output();
    assert!(out.contains("Wakeup Button Selected As Wakeup Source.\r\n"));
    assert!(!out.contains("Isolate power domains"));
    assert!(out.contains("\tSelect CPU_CLK=96MHz(FRO192M), VDD_CORE=1.1V\r\n"));
    assert!(out.contains("\r\nEntering Sleep mode...\r\nPlease press SW2 to wakeup."));

    let sleep = app.core().sleeps[0];
    assert!(!sleep.sleep_deep);
    assert_eq!((sleep.clock_mode, sleep.power_mode), (0x0, 0x0));
    assert_eq!(sleep.gates, 0x0000_8000);
    // FRO_HF peripheral clocks gated, FRO_HF itself still on
    assert_eq!(sleep.firccsr & FIRC_PERIPH_CLOCKS, 0);
    assert!(scg::FIRCCSR_FIRCEN.extract(sleep.firccsr) != 0);
    assert_eq!(scg::SIRCCSR_SIRC_CLK_PERIPH_EN.extract(sleep.sirccsr), 0);

    // back at 48 MHz, 1.0 V, with the run gates and the console
    let drivers = app.drivers();
    assert_eq!(drivers.clocks.core_sys_clock_freq().unwrap().to_MHz(), 48);
    assert_eq!(drivers.spc.active_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
    assert_eq!(drivers.mrcc.registers().glb_cc0.read(), 0x0840_8000);
    assert_eq!(drivers.wuu.registers().pe1.read(), 0b10 << 18);
    assert!(drivers
        .clocks
        .scg()
        .sirccsr
        .is_set(scg::SIRCCSR_SIRC_CLK_PERIPH_EN.mask()));
    assert!(!app.console().suspended);
}

#[test]
fn sleep_at_12mhz_stops_fro_hf_and_detectors() {
    let mut app = booted();
    app.drivers()
        .clocks
        .scg()
        .csr
        .write_field(scg::SCS, MainClockSource::Sirc as u32);
    app.console().type_keys("bc");
    app.run_once().unwrap();

    let out = app.console().take_output();
    assert!(out.contains("\tSelect CPU_CLK=12MHz(FRO12M), VDD_CORE=1.0V\r\n"));
    let sleep = app.core().sleeps[0];
    assert_eq!(scg::FIRCCSR_FIRCEN.extract(sleep.firccsr), 0);

    // detectors come back with the bandgap after the wake-up
    let spc = &app.drivers().spc;
    assert!(spc.is_active_voltage_detector_enabled(VoltageDetector::CoreLow));
    assert!(spc.is_active_voltage_detector_enabled(VoltageDetector::SystemHigh));
    assert_eq!(spc.active_bandgap_mode(), BandgapMode::EnabledBufferDisabled);
    assert_eq!(spc.low_power_wakeup_delay(), 0);
}

#[test]
fn deep_sleep_keeps_fro12m() {
    let mut app = booted();
    app.console().type_keys("cbxa");
    app.run_once().unwrap();

    let out = app.console().take_output();
    assert!(out.contains("Isolate power domains: VDD_USB\r\n"));
    assert!(out.contains("\tSelect ENABLE FRO12M in DeepSleep mode\r\n"));
    assert_eq!(out.matches("Configure FRO12M in DeepSleep mode:").count(), 2);

    let sleep = app.core().sleeps[0];
    assert!(sleep.sleep_deep);
    assert_eq!((sleep.clock_mode, sleep.power_mode), (0xF, 0x1));

    let drivers = app.drivers();
    assert!(drivers
        .clocks
        .scg()
        .sirccsr
        .is_set(scg::SIRCCSR_SIRCSTEN.mask()));
    assert_eq!(
        drivers
            .spc
            .registers()
            .evd_cfg
            .read_field(spc_regs::EVD_CFG_EVDLPISO),
        0x2
    );
}

#[test]
fn power_down_drops_to_retention_voltage() {
    let mut app = booted();
    app.drivers()
        .clocks
        .scg()
        .csr
        .write_field(scg::SCS, MainClockSource::Sirc as u32);
    // A is only offered for Deep Power Down
    app.console().type_keys("dcac");
    app.run_once().unwrap();

    let out = app.console().take_output();
    assert!(out.contains("\tC: CPU_CLK=12MHz(FRO12M) , VDD_CORE=0.6V\n\r\n"));
    assert!(!out.contains("\tA: No RAM retained"));
    assert!(out.contains("Wrong Input!"));
    assert!(out.contains("\tSelect RAMX0/X1, RAMA0~A3 retained\r\n"));

    let sleep = app.core().sleeps[0];
    assert_eq!((sleep.clock_mode, sleep.power_mode), (0xF, 0x3));
    // FRO_HF is left alone in Power Down
    assert!(scg::FIRCCSR_FIRCEN.extract(sleep.firccsr) != 0);
    assert_eq!(sleep.lp_core_ldo, CoreLdoConfig::RETENTION);
    assert_eq!(sleep.wakeup_delay, 0x5B);

    // awake again: retention voltage must not leak into the next mode
    let spc = &app.drivers().spc;
    assert_eq!(spc.low_power_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
    assert_eq!(spc.ram_retention_banks(), 0x7);
    assert!(spc
        .registers()
        .lp_cfg
        .is_set(spc_regs::LP_CFG_SRAMLDO_DPD_ON.mask()));
}

#[test]
fn deep_sleep_after_power_down_is_back_at_low_power_voltage() {
    let mut app = booted();
    app.console().type_keys("dbb");
    assert_eq!(app.run_once(), Ok(PowerMode::PowerDown));
    app.console().type_keys("caa");
    assert_eq!(app.run_once(), Ok(PowerMode::DeepSleep));

    let sleeps = &app.core().sleeps;
    assert_eq!(sleeps.len(), 2);
    assert_eq!(sleeps[0].lp_core_ldo, CoreLdoConfig::RETENTION);
    assert_eq!(sleeps[1].power_mode, 0x1);
    assert_eq!(sleeps[1].lp_core_ldo, CoreLdoConfig::MID_LOW_DRIVE);
    assert_eq!(sleeps[1].wakeup_delay, 0);
}

#[test]
fn ram_retention_choices() {
    let mut app = booted();
    // E is only offered for Deep Power Down
    app.console().type_keys("dbed");
    app.run_once().unwrap();
    let out = app.console().take_output();
    assert!(!out.contains("\tE: RAMA0 retained"));
    assert!(out.contains("Wrong Input!"));
    assert!(out.contains("\tSelect RAMX0/X1/A0 retained\r\n"));
    assert_eq!(app.drivers().spc.ram_retention_banks(), 0x3);

    app.console().type_keys("ebe");
    app.run_once().unwrap();
    let out = app.console().take_output();
    assert!(out.contains("\tSelect RAMA0 retained\r\n"));
    assert_eq!(app.drivers().spc.ram_retention_banks(), 0x2);

    app.console().type_keys("ebf");
    app.run_once().unwrap();
    let out = app.console().take_output();
    assert!(out.contains("\tSelect RAMX0/RAMX1 retained\r\n"));
    assert_eq!(app.drivers().spc.ram_retention_banks(), 0x1);
    assert!(app
        .drivers()
        .spc
        .registers()
        .lp_cfg
        .is_set(spc_regs::LP_CFG_SRAMLDO_DPD_ON.mask()));
    assert_eq!(app.core().sleeps.len(), 3);
}

#[test]
fn deep_power_down_without_ram() {
    let mut app = booted();
    app.console().type_keys("eBa");
    app.run_once().unwrap();

    let out = app.console().take_output();
    assert!(out.contains("\tA: No RAM retained\r\n"));
    assert!(out.contains("\tE: RAMA0 retained\r\n"));
    assert!(out.contains("\tSelect No RAM retained\r\n"));
    assert!(out.contains("\r\nEntering DeepPowerDown mode...\r\n"));

    let sleep = app.core().sleeps[0];
    assert_eq!((sleep.clock_mode, sleep.power_mode), (0xF, 0xF));
    assert!(!app
        .drivers()
        .spc
        .registers()
        .lp_cfg
        .is_set(spc_regs::LP_CFG_SRAMLDO_DPD_ON.mask()));
    assert_eq!(app.console().suspends, 1);
}

#[test]
fn loops_until_input_runs_out() {
    let mut app = booted();
    app.console().type_keys("aBa");
    assert_eq!(app.run_once(), Ok(PowerMode::Active));
    assert_eq!(app.run_once(), Ok(PowerMode::Sleep));
    assert_eq!(app.run_once(), Err(Error::InputClosed));
    assert_eq!(app.core().sleeps.len(), 1);
}
