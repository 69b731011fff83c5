//! Power modes and low-power entry
//!
//! The MCXA15x has one active and four low-power modes. They differ in how
//! much of the chip keeps its clock and its supply:
//!
//! | mode            | core clock | system/bus clocks | core domain  | flash |
//! |-----------------|------------|-------------------|--------------|-------|
//! | Active          | on         | on                | on           | on    |
//! | Sleep           | off        | on                | on           | on    |
//! | Deep Sleep      | off        | off               | on           | on    |
//! | Power Down      | off        | off               | static       | off   |
//! | Deep Power Down | off        | off               | power gated  | off   |
//!
//! Waking from Deep Power Down goes through reset; check
//! [`Cmc::is_wakeup_reset`](crate::cmc::Cmc::is_wakeup_reset).

use crate::cmc::{ClockMode, Cmc, LowPowerMode};

/// The five power modes
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// CPU, system and bus clocks all on
    Active,
    /// CPU clock off
    Sleep,
    /// CPU, system and bus clocks gated
    DeepSleep,
    /// Clocks gated, core domain static, flash off
    PowerDown,
    /// Core domain power gated
    DeepPowerDown,
}

impl PowerMode {
    /// Every mode, shallowest first.
    pub const ALL: [PowerMode; 5] = [
        PowerMode::Active,
        PowerMode::Sleep,
        PowerMode::DeepSleep,
        PowerMode::PowerDown,
        PowerMode::DeepPowerDown,
    ];

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            PowerMode::Active => "Active",
            PowerMode::Sleep => "Sleep",
            PowerMode::DeepSleep => "DeepSleep",
            PowerMode::PowerDown => "PowerDown",
            PowerMode::DeepPowerDown => "DeepPowerDown",
        }
    }

    /// One-line description of what stays on, led by the spelled-out mode name
    pub const fn description(self) -> &'static str {
        match self {
            PowerMode::Active => "Active: CPU/System/Bus clock all ON.",
            PowerMode::Sleep => {
                "Sleep: CPU clock is off, and the system clock and bus clock remain ON."
            }
            PowerMode::DeepSleep => "Deep Sleep: CPU/System/Bus clock are gated off.",
            PowerMode::PowerDown => {
                "Power Down: CPU/System/Bus clock are gated off, CORE domain is in static state, Flash memory is powered off."
            }
            PowerMode::DeepPowerDown => "Deep Power Down: The whole core domain is power gated.",
        }
    }

    /// CMC request entering this mode, `None` for Active.
    pub const fn cmc_request(self) -> Option<(ClockMode, LowPowerMode)> {
        match self {
            PowerMode::Active => None,
            PowerMode::Sleep => Some((ClockMode::GateNone, LowPowerMode::ActiveOrSleep)),
            PowerMode::DeepSleep => Some((
                ClockMode::GateAllSystemClocksEnterLowPower,
                LowPowerMode::DeepSleep,
            )),
            PowerMode::PowerDown => Some((
                ClockMode::GateAllSystemClocksEnterLowPower,
                LowPowerMode::PowerDown,
            )),
            PowerMode::DeepPowerDown => Some((
                ClockMode::GateAllSystemClocksEnterLowPower,
                LowPowerMode::DeepPowerDown,
            )),
        }
    }

    /// Does the core need SLEEPDEEP to reach this mode?
    pub const fn needs_sleep_deep(self) -> bool {
        matches!(
            self,
            PowerMode::DeepSleep | PowerMode::PowerDown | PowerMode::DeepPowerDown
        )
    }
}

/// The core side of a low-power entry
pub trait CoreSleep {
    /// Select deep sleep (`true`) or sleep for the next wait.
    fn set_sleep_deep(&mut self, deep: bool);

    /// Wait for an interrupt, with the barriers the architecture requires.
    fn wait_for_interrupt(&mut self);
}

/// The Cortex-M33 running this code
#[derive(Debug, Default)]
pub struct Core {
    _private: (),
}

impl Core {
    /// Handle to the running core.
    pub const fn new() -> Self {
        Core { _private: () }
    }
}

impl CoreSleep for Core {
    fn set_sleep_deep(&mut self, deep: bool) {
        crate::arch::set_sleep_deep(deep);
    }

    fn wait_for_interrupt(&mut self) {
        crate::arch::dsb();
        crate::arch::wfi();
        crate::arch::isb();
    }
}

/// Requests `mode` from the CMC and waits for the wake-up.
///
/// Returns once an interrupt has woken the core. For Active this does nothing;
/// Deep Power Down never returns on silicon, the wake-up is a reset.
pub fn enter_power_mode<C: CoreSleep>(cmc: &Cmc, core: &mut C, mode: PowerMode) {
    let Some((clock_mode, low_power_mode)) = mode.cmc_request() else {
        return;
    };

    #[cfg(feature = "defmt")]
    defmt::info!("entering {}", mode);

    cmc.set_clock_mode(clock_mode);
    cmc.set_main_power_mode(low_power_mode);
    core.set_sleep_deep(mode.needs_sleep_deep());
    core.wait_for_interrupt();
    // Sleep mode from here on, whatever was entered.
    core.set_sleep_deep(false);
}
