//! System Power Controller (SPC)
//!
//! The SPC owns the core LDO, the bandgap, the voltage detectors, the SRAM
//! retention LDO and the isolation of external voltage domains, each with a
//! separate setting for Active and for the low-power modes.
//!
//! Regulator settings are checked before anything is written. A rejected
//! configuration leaves the hardware untouched and reports an [`Error`].
//!
//! ```no_run
//! use mcxa_hal::{pac, spc::{self, Spc}};
//!
//! let pac = pac::Peripherals::take().unwrap();
//! let spc = Spc::new(pac.SPC0);
//! spc.set_active_regulators(&spc::ActiveRegulatorConfig {
//!     bandgap: spc::BandgapMode::EnabledBufferDisabled,
//!     core_ldo: spc::CoreLdoConfig::MID_NORMAL_DRIVE,
//! })
//! .unwrap();
//! nb::block!(spc.wait_not_busy()).unwrap();
//! ```

use core::convert::Infallible;

use nb::Error::WouldBlock;

use crate::pac::{self, spc};

/// Core LDO output voltage
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CoreLdoVoltage {
    /// 0.6 V, only usable while in a low-power mode
    Retention = 0,
    /// 1.0 V
    MidDrive = 1,
    /// 1.1 V
    Normal = 2,
}

impl CoreLdoVoltage {
    /// Nominal output in millivolts
    pub const fn millivolts(self) -> u16 {
        match self {
            CoreLdoVoltage::Retention => 600,
            CoreLdoVoltage::MidDrive => 1000,
            CoreLdoVoltage::Normal => 1100,
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            0 => CoreLdoVoltage::Retention,
            1 => CoreLdoVoltage::MidDrive,
            _ => CoreLdoVoltage::Normal,
        }
    }
}

/// Core LDO drive strength
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveStrength {
    /// Low drive, up to [`CoreLdoVoltage::MidDrive`]
    Low = 0,
    /// Normal drive, needs the bandgap
    Normal = 1,
}

/// Bandgap operating mode
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BandgapMode {
    /// Bandgap off
    Disabled = 0,
    /// Bandgap on, output buffer off
    EnabledBufferDisabled = 1,
    /// Bandgap and output buffer on
    EnabledBufferEnabled = 2,
}

impl BandgapMode {
    fn from_bits(bits: u32) -> Self {
        match bits {
            0 => BandgapMode::Disabled,
            1 => BandgapMode::EnabledBufferDisabled,
            _ => BandgapMode::EnabledBufferEnabled,
        }
    }
}

/// Voltage and drive strength of the core LDO
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreLdoConfig {
    /// Output voltage
    pub voltage: CoreLdoVoltage,
    /// Drive strength
    pub drive_strength: DriveStrength,
}

impl CoreLdoConfig {
    /// 1.1 V, normal drive
    pub const NORMAL: CoreLdoConfig = CoreLdoConfig {
        voltage: CoreLdoVoltage::Normal,
        drive_strength: DriveStrength::Normal,
    };
    /// 1.0 V, normal drive
    pub const MID_NORMAL_DRIVE: CoreLdoConfig = CoreLdoConfig {
        voltage: CoreLdoVoltage::MidDrive,
        drive_strength: DriveStrength::Normal,
    };
    /// 1.0 V, low drive
    pub const MID_LOW_DRIVE: CoreLdoConfig = CoreLdoConfig {
        voltage: CoreLdoVoltage::MidDrive,
        drive_strength: DriveStrength::Low,
    };
    /// 0.6 V, low drive
    pub const RETENTION: CoreLdoConfig = CoreLdoConfig {
        voltage: CoreLdoVoltage::Retention,
        drive_strength: DriveStrength::Low,
    };
}

/// Regulator settings applied in Active mode
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveRegulatorConfig {
    /// Bandgap mode
    pub bandgap: BandgapMode,
    /// Core LDO
    pub core_ldo: CoreLdoConfig,
}

/// Regulator settings applied in Deep Sleep, Power Down and Deep Power Down
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPowerRegulatorConfig {
    /// Keep the low-power current reference running
    pub lp_iref: bool,
    /// Bandgap mode
    pub bandgap: BandgapMode,
    /// Core LDO
    pub core_ldo: CoreLdoConfig,
}

/// Reasons a regulator setting is refused
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The SPC is still applying a previous change
    Busy,
    /// The voltage is not allowed in this mode
    CoreLdoVoltageWrong,
    /// Low drive strength was combined with a voltage above 1.0 V
    DriveStrengthWrong,
    /// The bandgap setting conflicts with the drive strength or an enabled
    /// voltage detector
    BandgapModeWrong,
}

/// SRAM banks kept powered in the low-power modes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RamRetention {
    /// Nothing retained; the retention LDO is off in Deep Power Down
    None,
    /// Every bank
    All,
    /// RAMX0, RAMX1 and RAMA0 to RAMA3
    RamX0X1A0ToA3,
    /// RAMX0, RAMX1 and RAMA0
    RamX0X1A0,
    /// RAMA0
    RamA0,
    /// RAMX0 and RAMX1
    RamX0X1,
}

impl RamRetention {
    /// `SRAM_RET_EN` bank mask, `None` for no retention
    pub const fn bank_mask(self) -> Option<u8> {
        match self {
            RamRetention::None => None,
            RamRetention::All => Some(0xF),
            RamRetention::RamX0X1A0ToA3 => Some(0x7),
            RamRetention::RamX0X1A0 => Some(0x3),
            RamRetention::RamA0 => Some(0x2),
            RamRetention::RamX0X1 => Some(0x1),
        }
    }
}

/// Voltage detectors supervised by the SPC
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoltageDetector {
    /// Core low-voltage detector
    CoreLow,
    /// System low-voltage detector
    SystemLow,
    /// System high-voltage detector
    SystemHigh,
}

impl VoltageDetector {
    const ALL: [VoltageDetector; 3] = [
        VoltageDetector::CoreLow,
        VoltageDetector::SystemLow,
        VoltageDetector::SystemHigh,
    ];

    const fn field(self) -> pac::Field {
        match self {
            VoltageDetector::CoreLow => spc::CFG_CORE_LVDE,
            VoltageDetector::SystemLow => spc::CFG_SYS_LVDE,
            VoltageDetector::SystemHigh => spc::CFG_SYS_HVDE,
        }
    }
}

/// Analog modules switched by `ACTIVE_CFG1`/`LP_CFG1`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogModules(u32);

impl AnalogModules {
    /// Every analog module under SPC control
    pub const ALL: AnalogModules = AnalogModules(u32::MAX);

    /// A raw module mask
    pub const fn from_bits(bits: u32) -> Self {
        AnalogModules(bits)
    }

    /// The raw module mask
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Power domains with their own low-power request status
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum PowerDomain {
    /// Main (core) domain
    Main = 0,
    /// Wake domain
    Wake = 1,
}

/// Polarity of the low-power request output
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPowerRequestPolarity {
    /// Output is high while a low-power mode is requested
    HighTrue,
    /// Output is low while a low-power mode is requested
    LowTrue,
}

/// Override of the low-power request output
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LowPowerRequestOverride {
    /// Follow the low-power state
    NotForced = 0,
    /// Forced low
    ForcedLow = 2,
    /// Forced high
    ForcedHigh = 3,
}

/// Low-power request output configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPowerRequestConfig {
    /// Drive the output
    pub enable: bool,
    /// Output override
    pub override_: LowPowerRequestOverride,
    /// Output polarity
    pub polarity: LowPowerRequestPolarity,
}

/// System Power Controller driver
pub struct Spc {
    regs: &'static spc::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Spc {}

impl Spc {
    /// Takes ownership of the SPC.
    pub fn new(dev: pac::SPC0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static spc::RegisterBlock) -> Self {
        Spc { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static spc::RegisterBlock {
        self.regs
    }

    /// Is a regulator change still in progress?
    pub fn is_busy(&self) -> bool {
        self.regs.sc.is_set(spc::SC_BUSY.mask())
    }

    /// Completes once the SPC has applied the last change.
    pub fn wait_not_busy(&self) -> nb::Result<(), Infallible> {
        if self.is_busy() {
            return Err(WouldBlock);
        }
        Ok(())
    }

    /// Releases the peripherals and I/O pads latched by a Power Down or
    /// Deep Power Down exit.
    pub fn clear_io_isolation(&self) {
        self.regs.sc.write(spc::SC_ISO_CLR.mask());
    }

    /// Clears the SPC low-power request flag.
    pub fn clear_low_power_request(&self) {
        self.regs.sc.write(spc::SC_SPC_LP_REQ.mask());
    }

    /// Clears the low-power request flag of one power domain.
    pub fn clear_power_domain_low_power_request(&self, domain: PowerDomain) {
        self.regs.pd_status[domain as usize].write(spc::PD_STATUS_PD_LP_REQ.mask());
    }

    /// Turns the SRAM retention LDO on or off.
    pub fn enable_sram_ldo(&self, enable: bool) {
        if enable {
            self.regs
                .sramretldo_cntrl
                .set_bits(spc::SRAMRETLDO_CNTRL_SRAMLDO_ON.mask());
        } else {
            self.regs
                .sramretldo_cntrl
                .clear_bits(spc::SRAMRETLDO_CNTRL_SRAMLDO_ON.mask());
        }
    }

    /// Selects the SRAM banks kept in the low-power modes.
    ///
    /// [`RamRetention::None`] only drops the retention LDO in Deep Power Down;
    /// the bank mask is left as it was.
    pub fn set_ram_retention(&self, retention: RamRetention) {
        match retention.bank_mask() {
            None => self.regs.lp_cfg.clear_bits(spc::LP_CFG_SRAMLDO_DPD_ON.mask()),
            Some(banks) => {
                self.regs.lp_cfg.set_bits(spc::LP_CFG_SRAMLDO_DPD_ON.mask());
                self.regs
                    .sramretldo_cntrl
                    .write_field(spc::SRAMRETLDO_CNTRL_SRAM_RET_EN, banks as u32);
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("SPC: RAM retention {}", retention);
    }

    /// Raw `SRAM_RET_EN` bank mask.
    pub fn ram_retention_banks(&self) -> u8 {
        self.regs
            .sramretldo_cntrl
            .read_field(spc::SRAMRETLDO_CNTRL_SRAM_RET_EN) as u8
    }

    /// Switches analog modules on (`true`) or off in Active mode.
    pub fn set_active_analog_modules(&self, modules: AnalogModules, enable: bool) {
        if enable {
            self.regs.active_cfg1.set_bits(modules.bits());
        } else {
            self.regs.active_cfg1.clear_bits(modules.bits());
        }
    }

    /// Switches analog modules on (`true`) or off in the low-power modes.
    pub fn set_low_power_analog_modules(&self, modules: AnalogModules, enable: bool) {
        if enable {
            self.regs.lp_cfg1.set_bits(modules.bits());
        } else {
            self.regs.lp_cfg1.clear_bits(modules.bits());
        }
    }

    /// Delay, in FRO16K cycles, between a wake-up event and the regulators
    /// being back at their Active settings.
    pub fn set_low_power_wakeup_delay(&self, delay: u16) {
        self.regs.lpwkup_delay.write_field(spc::LPWKUP_DELAY, delay as u32);
    }

    /// Current low-power wake-up delay.
    pub fn low_power_wakeup_delay(&self) -> u16 {
        self.regs.lpwkup_delay.read_field(spc::LPWKUP_DELAY) as u16
    }

    /// Configures the low-power request output.
    pub fn set_low_power_request_config(&self, config: &LowPowerRequestConfig) {
        let polarity = match config.polarity {
            LowPowerRequestPolarity::HighTrue => 0,
            LowPowerRequestPolarity::LowTrue => 1,
        };
        self.regs.lpreq_cfg.write(
            spc::LPREQ_CFG_LPREQOE.bits(config.enable as u32)
                | spc::LPREQ_CFG_LPREQPOL.bits(polarity)
                | spc::LPREQ_CFG_LPREQOV.bits(config.override_ as u32),
        );
    }

    /// Isolates external voltage domains: `lp_iso_mask` while in a low-power
    /// mode, `iso_mask` while in Active.
    pub fn set_external_voltage_domains(&self, lp_iso_mask: u8, iso_mask: u8) {
        self.regs.evd_cfg.write(
            spc::EVD_CFG_EVDLPISO.bits(lp_iso_mask as u32)
                | spc::EVD_CFG_EVDISO.bits(iso_mask as u32),
        );
    }

    /// Active core LDO setting.
    pub fn active_core_ldo(&self) -> CoreLdoConfig {
        core_ldo_from(self.regs.active_cfg.read())
    }

    /// Low-power core LDO setting.
    pub fn low_power_core_ldo(&self) -> CoreLdoConfig {
        core_ldo_from(self.regs.lp_cfg.read())
    }

    /// Active bandgap setting.
    pub fn active_bandgap_mode(&self) -> BandgapMode {
        BandgapMode::from_bits(self.regs.active_cfg.read_field(spc::CFG_BGMODE))
    }

    /// Is any Active voltage detector enabled?
    pub fn any_active_voltage_detector(&self) -> bool {
        VoltageDetector::ALL
            .iter()
            .any(|vd| self.regs.active_cfg.is_set(vd.field().mask()))
    }

    /// Is this Active voltage detector enabled?
    pub fn is_active_voltage_detector_enabled(&self, detector: VoltageDetector) -> bool {
        self.regs.active_cfg.is_set(detector.field().mask())
    }

    /// Applies the Active regulator settings.
    pub fn set_active_regulators(&self, config: &ActiveRegulatorConfig) -> Result<(), Error> {
        self.check_idle()?;
        check_ldo(config.core_ldo, config.bandgap)?;
        if config.core_ldo.voltage == CoreLdoVoltage::Retention {
            return Err(Error::CoreLdoVoltageWrong);
        }
        if config.bandgap == BandgapMode::Disabled && self.any_active_voltage_detector() {
            return Err(Error::BandgapModeWrong);
        }

        self.regs
            .active_cfg
            .write_field(spc::CFG_BGMODE, config.bandgap as u32);
        write_ldo(&self.regs.active_cfg, config.core_ldo);

        #[cfg(feature = "defmt")]
        defmt::debug!("SPC: active regulators {}", config);
        Ok(())
    }

    /// Applies the low-power regulator settings.
    pub fn set_low_power_regulators(&self, config: &LowPowerRegulatorConfig) -> Result<(), Error> {
        self.check_idle()?;
        check_ldo(config.core_ldo, config.bandgap)?;

        self.regs
            .lp_cfg
            .write_field(spc::LP_CFG_LP_IREFEN, config.lp_iref as u32);
        self.regs
            .lp_cfg
            .write_field(spc::CFG_BGMODE, config.bandgap as u32);
        write_ldo(&self.regs.lp_cfg, config.core_ldo);

        #[cfg(feature = "defmt")]
        defmt::debug!("SPC: low-power regulators {}", config);
        Ok(())
    }

    /// Changes only the Active core LDO, keeping the bandgap as it is.
    pub fn set_active_core_ldo(&self, ldo: CoreLdoConfig) -> Result<(), Error> {
        self.set_active_regulators(&ActiveRegulatorConfig {
            bandgap: self.active_bandgap_mode(),
            core_ldo: ldo,
        })
    }

    /// Changes only the low-power core LDO, keeping the rest as it is.
    pub fn set_low_power_core_ldo(&self, ldo: CoreLdoConfig) -> Result<(), Error> {
        let lp_cfg = self.regs.lp_cfg.read();
        self.set_low_power_regulators(&LowPowerRegulatorConfig {
            lp_iref: spc::LP_CFG_LP_IREFEN.extract(lp_cfg) != 0,
            bandgap: BandgapMode::from_bits(spc::CFG_BGMODE.extract(lp_cfg)),
            core_ldo: ldo,
        })
    }

    /// Changes only the Active bandgap mode.
    pub fn set_active_bandgap_mode(&self, mode: BandgapMode) -> Result<(), Error> {
        self.set_active_regulators(&ActiveRegulatorConfig {
            bandgap: mode,
            core_ldo: self.active_core_ldo(),
        })
    }

    /// Enables or disables one Active voltage detector.
    ///
    /// Detectors need the bandgap: enabling one while the Active bandgap is
    /// off is refused.
    pub fn set_active_voltage_detector(
        &self,
        detector: VoltageDetector,
        enable: bool,
    ) -> Result<(), Error> {
        if enable {
            if self.active_bandgap_mode() == BandgapMode::Disabled {
                return Err(Error::BandgapModeWrong);
            }
            self.regs.active_cfg.set_bits(detector.field().mask());
        } else {
            self.regs.active_cfg.clear_bits(detector.field().mask());
        }
        Ok(())
    }

    /// Enables or disables every Active voltage detector.
    pub fn set_active_voltage_detectors(&self, enable: bool) -> Result<(), Error> {
        for detector in VoltageDetector::ALL {
            self.set_active_voltage_detector(detector, enable)?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("SPC: voltage detectors enabled={}", enable);
        Ok(())
    }

    fn check_idle(&self) -> Result<(), Error> {
        if self.is_busy() {
            Err(Error::Busy)
        } else {
            Ok(())
        }
    }
}

fn core_ldo_from(cfg: u32) -> CoreLdoConfig {
    CoreLdoConfig {
        voltage: CoreLdoVoltage::from_bits(spc::CFG_CORELDO_VDD_LVL.extract(cfg)),
        drive_strength: if spc::CFG_CORELDO_VDD_DS.extract(cfg) != 0 {
            DriveStrength::Normal
        } else {
            DriveStrength::Low
        },
    }
}

fn check_ldo(ldo: CoreLdoConfig, bandgap: BandgapMode) -> Result<(), Error> {
    match ldo.drive_strength {
        DriveStrength::Low if ldo.voltage > CoreLdoVoltage::MidDrive => {
            Err(Error::DriveStrengthWrong)
        }
        DriveStrength::Normal if bandgap == BandgapMode::Disabled => Err(Error::BandgapModeWrong),
        _ => Ok(()),
    }
}

/// Normal drive is selected before the level changes, low drive after, so the
/// LDO never runs low drive above 1.0 V.
fn write_ldo(reg: &pac::Reg, ldo: CoreLdoConfig) {
    match ldo.drive_strength {
        DriveStrength::Normal => {
            reg.set_bits(spc::CFG_CORELDO_VDD_DS.mask());
            reg.write_field(spc::CFG_CORELDO_VDD_LVL, ldo.voltage as u32);
        }
        DriveStrength::Low => {
            reg.write_field(spc::CFG_CORELDO_VDD_LVL, ldo.voltage as u32);
            reg.clear_bits(spc::CFG_CORELDO_VDD_DS.mask());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::detached;

    fn spc() -> Spc {
        Spc::from_registers(detached())
    }

    const ACTIVE_1V0: ActiveRegulatorConfig = ActiveRegulatorConfig {
        bandgap: BandgapMode::EnabledBufferDisabled,
        core_ldo: CoreLdoConfig::MID_NORMAL_DRIVE,
    };

    #[test]
    fn active_regulators_are_written() {
        let spc = spc();
        spc.set_active_regulators(&ACTIVE_1V0).unwrap();
        assert_eq!(spc.active_core_ldo(), CoreLdoConfig::MID_NORMAL_DRIVE);
        assert_eq!(spc.active_bandgap_mode(), BandgapMode::EnabledBufferDisabled);
        // BGMODE=1, LVL=1, DS=1
        assert_eq!(spc.registers().active_cfg.read(), (1 << 20) | (1 << 2) | 1);
    }

    #[test]
    fn busy_spc_rejects_changes() {
        let spc = spc();
        spc.registers().sc.write(spc::SC_BUSY.mask());
        assert_eq!(spc.set_active_regulators(&ACTIVE_1V0), Err(Error::Busy));
        assert_eq!(spc.registers().active_cfg.read(), 0);
        assert_eq!(spc.wait_not_busy(), Err(nb::Error::WouldBlock));

        spc.registers().sc.write(0);
        assert_eq!(spc.wait_not_busy(), Ok(()));
    }

    #[test]
    fn retention_voltage_is_low_power_only() {
        let spc = spc();
        let config = ActiveRegulatorConfig {
            bandgap: BandgapMode::Disabled,
            core_ldo: CoreLdoConfig::RETENTION,
        };
        assert_eq!(
            spc.set_active_regulators(&config),
            Err(Error::CoreLdoVoltageWrong)
        );

        let config = LowPowerRegulatorConfig {
            lp_iref: false,
            bandgap: BandgapMode::Disabled,
            core_ldo: CoreLdoConfig::RETENTION,
        };
        spc.set_low_power_regulators(&config).unwrap();
        assert_eq!(spc.low_power_core_ldo(), CoreLdoConfig::RETENTION);
    }

    #[test]
    fn low_drive_is_limited_to_mid_voltage() {
        let spc = spc();
        let config = ActiveRegulatorConfig {
            bandgap: BandgapMode::EnabledBufferDisabled,
            core_ldo: CoreLdoConfig {
                voltage: CoreLdoVoltage::Normal,
                drive_strength: DriveStrength::Low,
            },
        };
        assert_eq!(
            spc.set_active_regulators(&config),
            Err(Error::DriveStrengthWrong)
        );
    }

    #[test]
    fn normal_drive_needs_the_bandgap() {
        let spc = spc();
        let config = LowPowerRegulatorConfig {
            lp_iref: false,
            bandgap: BandgapMode::Disabled,
            core_ldo: CoreLdoConfig::MID_NORMAL_DRIVE,
        };
        assert_eq!(
            spc.set_low_power_regulators(&config),
            Err(Error::BandgapModeWrong)
        );
    }

    #[test]
    fn voltage_detectors_and_bandgap() {
        let spc = spc();
        // bandgap off: detectors can't be enabled
        assert_eq!(
            spc.set_active_voltage_detectors(true),
            Err(Error::BandgapModeWrong)
        );

        spc.set_active_regulators(&ACTIVE_1V0).unwrap();
        spc.set_active_voltage_detectors(true).unwrap();
        assert!(spc.is_active_voltage_detector_enabled(VoltageDetector::SystemHigh));

        // and with detectors on, the bandgap can't go off
        let config = ActiveRegulatorConfig {
            bandgap: BandgapMode::Disabled,
            core_ldo: CoreLdoConfig::MID_LOW_DRIVE,
        };
        assert_eq!(
            spc.set_active_regulators(&config),
            Err(Error::BandgapModeWrong)
        );

        spc.set_active_voltage_detectors(false).unwrap();
        assert!(!spc.any_active_voltage_detector());
        spc.set_active_regulators(&config).unwrap();
    }

    #[test]
    fn partial_updates_keep_the_rest() {
        let spc = spc();
        spc.set_active_regulators(&ACTIVE_1V0).unwrap();
        spc.set_active_core_ldo(CoreLdoConfig::MID_LOW_DRIVE).unwrap();
        assert_eq!(spc.active_bandgap_mode(), BandgapMode::EnabledBufferDisabled);
        assert_eq!(spc.active_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);

        spc.set_low_power_regulators(&LowPowerRegulatorConfig {
            lp_iref: true,
            bandgap: BandgapMode::Disabled,
            core_ldo: CoreLdoConfig::MID_LOW_DRIVE,
        })
        .unwrap();
        spc.set_low_power_core_ldo(CoreLdoConfig::RETENTION).unwrap();
        let lp_cfg = spc.registers().lp_cfg.read();
        assert!(spc::LP_CFG_LP_IREFEN.extract(lp_cfg) == 1);
        assert_eq!(spc.low_power_core_ldo(), CoreLdoConfig::RETENTION);
    }

    #[test]
    fn ram_retention_masks() {
        let spc = spc();
        let regs = spc.registers();
        for (retention, mask) in [
            (RamRetention::All, 0xF),
            (RamRetention::RamX0X1A0ToA3, 0x7),
            (RamRetention::RamX0X1A0, 0x3),
            (RamRetention::RamA0, 0x2),
            (RamRetention::RamX0X1, 0x1),
        ] {
            spc.set_ram_retention(retention);
            assert_eq!(spc.ram_retention_banks(), mask);
            assert!(regs.lp_cfg.is_set(spc::LP_CFG_SRAMLDO_DPD_ON.mask()));
        }

        spc.set_ram_retention(RamRetention::None);
        assert!(!regs.lp_cfg.is_set(spc::LP_CFG_SRAMLDO_DPD_ON.mask()));
        // bank mask is untouched
        assert_eq!(spc.ram_retention_banks(), 0x1);
    }

    #[test]
    fn request_output_and_isolation() {
        let spc = spc();
        spc.set_low_power_request_config(&LowPowerRequestConfig {
            enable: true,
            override_: LowPowerRequestOverride::NotForced,
            polarity: LowPowerRequestPolarity::LowTrue,
        });
        assert_eq!(spc.registers().lpreq_cfg.read(), 0b011);

        spc.set_external_voltage_domains(0x2, 0x0);
        assert_eq!(spc.registers().evd_cfg.read(), 0x2 << 16);

        spc.clear_io_isolation();
        assert_eq!(spc.registers().sc.read(), 1 << 16);
        spc.clear_power_domain_low_power_request(PowerDomain::Main);
        assert_eq!(spc.registers().pd_status[0].read(), 1 << 4);
    }

    #[test]
    fn wakeup_delay_and_analog_modules() {
        let spc = spc();
        spc.set_low_power_wakeup_delay(0x5b);
        assert_eq!(spc.low_power_wakeup_delay(), 0x5b);

        spc.set_active_analog_modules(AnalogModules::ALL, true);
        spc.set_active_analog_modules(AnalogModules::from_bits(0x4), false);
        assert_eq!(spc.registers().active_cfg1.read(), !0x4);
        spc.set_low_power_analog_modules(AnalogModules::ALL, false);
        assert_eq!(spc.registers().lp_cfg1.read(), 0);
    }
}
