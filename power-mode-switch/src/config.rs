//! Board configuration
//!
//! Everything board specific the demo needs: where the wake-up button and the
//! console are wired, which power domains can be isolated, and the MRCC gate
//! sets used around a low-power entry.

use fugit::HertzU32;
use mcxa_hal::{
    lpuart::{self, LpuartPins, UartConfig},
    mrcc::{ClockGate, GlobalClockGates},
    port::PinMux,
    spc::{
        ActiveRegulatorConfig, BandgapMode, CoreLdoConfig, LowPowerRegulatorConfig,
        LowPowerRequestConfig, LowPowerRequestOverride, LowPowerRequestPolarity,
    },
    wuu::{ExternalPinConfig, PinEdge, PinEvent, PinMode},
};

/// Board-level settings of the demo
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// WUU external pin wired to the wake-up button
    pub wakeup_pin: u8,
    /// How the wake-up pin is armed
    pub wakeup_pin_config: ExternalPinConfig,
    /// Silkscreen name of the wake-up button
    pub wakeup_button: &'static str,
    /// External voltage domains isolated below Sleep
    pub isolated_domains: u8,
    /// Names of the isolated domains, for the console
    pub isolated_domain_names: &'static str,
    /// Low-power wake-up delay used when the core drops to retention voltage
    pub retention_wakeup_delay: u16,
    /// Console RX/TX pins
    pub console_pins: LpuartPins,
    /// Console framing
    pub console_config: UartConfig,
    /// LPUART functional clock feeding the console
    pub console_clock: HertzU32,
    /// Active regulators set at boot
    pub active_regulators: ActiveRegulatorConfig,
    /// Low-power regulators set at boot
    pub low_power_regulators: LowPowerRegulatorConfig,
    /// Low-power request output
    pub low_power_request: LowPowerRequestConfig,
    /// MRCC gates while running
    pub run_gates: GlobalClockGates,
    /// MRCC gates kept through a low-power mode
    pub low_power_gates: GlobalClockGates,
}

/// FRDM-MCXA153: SW2 on WUU pin 9, console on LPUART0 P0_2/P0_3.
pub const FRDM_MCXA153: DemoConfig = DemoConfig {
    wakeup_pin: 9,
    wakeup_pin_config: ExternalPinConfig {
        edge: PinEdge::Falling,
        event: PinEvent::Interrupt,
        mode: PinMode::Always,
    },
    wakeup_button: "SW2",
    isolated_domains: 0x2,
    isolated_domain_names: "VDD_USB",
    retention_wakeup_delay: 0x5B,
    console_pins: LpuartPins {
        rx: 2,
        tx: 3,
        mux: PinMux::Alt2,
    },
    console_config: lpuart::common_configs::_115200_8_N_1,
    console_clock: HertzU32::MHz(12),
    active_regulators: ActiveRegulatorConfig {
        bandgap: BandgapMode::EnabledBufferDisabled,
        core_ldo: CoreLdoConfig::MID_NORMAL_DRIVE,
    },
    low_power_regulators: LowPowerRegulatorConfig {
        lp_iref: false,
        bandgap: BandgapMode::Disabled,
        core_ldo: CoreLdoConfig::MID_LOW_DRIVE,
    },
    low_power_request: LowPowerRequestConfig {
        enable: true,
        override_: LowPowerRequestOverride::NotForced,
        polarity: LowPowerRequestPolarity::LowTrue,
    },
    run_gates: GlobalClockGates {
        clock: ClockGate::from_words(0x0840_8000, 0x0080_0080),
        access: ClockGate::from_words(0x0800_8000, 0x020C_0000),
    },
    low_power_gates: GlobalClockGates {
        clock: ClockGate::from_words(0x0000_8000, 0x000C_0000),
        access: ClockGate::from_words(0x0000_8000, 0x000C_0000),
    },
};
