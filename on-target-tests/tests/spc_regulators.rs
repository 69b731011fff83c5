#![no_std]
#![no_main]
#![cfg(test)]

use defmt_rtt as _; // defmt transport
use defmt_test as _;
use mcxa_hal as _; // memory layout and critical section
use panic_probe as _; // panic handler

struct State {
    spc: mcxa_hal::Spc,
    clocks: mcxa_hal::Clocks,
}

#[defmt_test::tests]
mod tests {
    use crate::State;
    use defmt::{assert, assert_eq};
    use mcxa_hal as hal;

    use hal::clocks::{Clocks, CoreClockPreset};
    use hal::spc::{
        ActiveRegulatorConfig, BandgapMode, CoreLdoConfig, Error, RamRetention, Spc,
        VoltageDetector,
    };
    use hal::pac;

    #[init]
    fn setup() -> State {
        let pac = pac::Peripherals::take().unwrap();
        let spc = Spc::new(pac.SPC0);
        let clocks = Clocks::new(pac.SCG0, pac.SYSCON, pac.FMU0);
        clocks
            .boot(&spc, CoreClockPreset::Fro48M, CoreLdoConfig::MID_LOW_DRIVE)
            .unwrap();
        State { spc, clocks }
    }

    #[test]
    fn change_active_core_ldo(state: &mut State) {
        let spc = &state.spc;

        // 1.1 V for the 96 MHz preset
        state
            .clocks
            .boot(spc, CoreClockPreset::Fro96M, CoreLdoConfig::NORMAL)
            .unwrap();
        assert_eq!(spc.active_core_ldo(), CoreLdoConfig::NORMAL);

        // back to 1.0 V, low drive
        state
            .clocks
            .boot(spc, CoreClockPreset::Fro48M, CoreLdoConfig::MID_LOW_DRIVE)
            .unwrap();
        assert_eq!(spc.active_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
        assert!(!spc.is_busy());
    }

    #[test]
    fn retention_voltage_is_refused_in_active(state: &mut State) {
        let spc = &state.spc;
        let refused = spc.set_active_regulators(&ActiveRegulatorConfig {
            bandgap: BandgapMode::EnabledBufferDisabled,
            core_ldo: CoreLdoConfig::RETENTION,
        });
        assert_eq!(refused, Err(Error::CoreLdoVoltageWrong));
        assert_eq!(spc.active_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
    }

    #[test]
    fn low_power_core_ldo_goes_to_retention(state: &mut State) {
        let spc = &state.spc;
        spc.set_low_power_core_ldo(CoreLdoConfig::RETENTION).unwrap();
        let _ = nb::block!(spc.wait_not_busy());
        assert_eq!(spc.low_power_core_ldo(), CoreLdoConfig::RETENTION);

        spc.set_low_power_core_ldo(CoreLdoConfig::MID_LOW_DRIVE)
            .unwrap();
        let _ = nb::block!(spc.wait_not_busy());
        assert_eq!(spc.low_power_core_ldo(), CoreLdoConfig::MID_LOW_DRIVE);
    }

    #[test]
    fn voltage_detectors_follow_the_bandgap(state: &mut State) {
        let spc = &state.spc;
        spc.set_active_bandgap_mode(BandgapMode::EnabledBufferDisabled)
            .unwrap();
        spc.set_active_voltage_detectors(true).unwrap();
        assert!(spc.is_active_voltage_detector_enabled(VoltageDetector::CoreLow));
        assert!(spc.is_active_voltage_detector_enabled(VoltageDetector::SystemHigh));

        // the bandgap cannot be switched off under the detectors
        assert_eq!(
            spc.set_active_bandgap_mode(BandgapMode::Disabled),
            Err(Error::BandgapModeWrong)
        );

        spc.set_active_voltage_detectors(false).unwrap();
        assert!(!spc.any_active_voltage_detector());
        spc.set_active_voltage_detectors(true).unwrap();
    }

    #[test]
    fn ram_retention_banks(state: &mut State) {
        let spc = &state.spc;
        spc.set_ram_retention(RamRetention::RamX0X1A0ToA3);
        assert_eq!(spc.ram_retention_banks(), 0x7);
        spc.set_ram_retention(RamRetention::All);
        assert_eq!(spc.ram_retention_banks(), 0xF);
    }
}
