//! # Power Mode Switch
//!
//! Moves the MCXA153 between Active, Sleep, Deep Sleep, Power Down and Deep
//! Power Down from a menu on the debug console. Press SW2 to wake up.
//!
//! The pinouts are:
//!
//! * P0_2 - LPUART0 RX (in to the MCXA153)
//! * P0_3 - LPUART0 TX (out of the MCXA153)
//! * P0_9 - SW2, wake-up pin 9 of the WUU
//!
//! See the `Cargo.toml` file for Copyright and license details.

#![no_std]
#![no_main]

// Ensure we halt the program on panic (if we don't mention this crate it won't
// be linked)
use panic_halt as _;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// Alias for our HAL crate
use mcxa_hal as hal;

use hal::{
    arch,
    clocks::{common_configs, Clocks},
    pac::{self, Interrupt},
    power::Core,
    Cmc, Lpuart, Spc, Wuu,
};

// Some short-cuts to useful types
use core::cell::RefCell;
use critical_section::Mutex;

use power_mode_switch::{config::FRDM_MCXA153, Drivers, LpuartConsole, PowerModeSwitch};

/// The WUU, for clearing its flags from the interrupt handler.
static WAKEUP_UNIT: Mutex<RefCell<Option<Wuu>>> = Mutex::new(RefCell::new(None));

/// Entry point to our bare-metal application.
///
/// The `#[hal::entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables are initialised.
///
/// The function brings up the clocks and the console, then runs the power
/// mode menu forever.
#[hal::entry]
fn main() -> ! {
    // Grab our singleton objects
    let pac = pac::Peripherals::take().unwrap();

    // Run the core from FRO_HF/4 like the boot ROM, with FRO12M feeding the console
    let clocks = Clocks::new(pac.SCG0, pac.SYSCON, pac.FMU0);
    clocks.set_core_clock(&common_configs::FRO_HF_48MHZ).unwrap();
    clocks.set_sirc_peripheral_clock(true);

    let console = LpuartConsole::new(
        Lpuart::new(pac.LPUART0),
        hal::port::Port::new(pac.PORT0),
        &FRDM_MCXA153,
    )
    .unwrap();

    // The handler only ever clears flags, so it gets a driver of its own.
    let wuu_regs = pac.WUU0.registers();
    critical_section::with(|cs| {
        WAKEUP_UNIT
            .borrow(cs)
            .replace(Some(Wuu::from_registers(wuu_regs)));
    });

    let drivers = Drivers {
        cmc: Cmc::new(pac.CMC),
        spc: Spc::new(pac.SPC0),
        wuu: Wuu::from_registers(wuu_regs),
        clocks,
        mrcc: hal::mrcc::Mrcc::new(pac.MRCC0),
        vbat: hal::vbat::Vbat::new(pac.VBAT0),
    };
    let mut app = PowerModeSwitch::new(drivers, console, Core::new(), FRDM_MCXA153);
    app.boot().unwrap();

    // Unmask the WUU IRQ last, once the stale flags are gone
    unsafe {
        arch::interrupt_unmask(Interrupt::WUU0);
    }

    loop {
        if let Err(_e) = app.run_once() {
            #[cfg(feature = "defmt")]
            defmt::error!("power mode switch failed: {}", _e);
        }
    }
}

/// Device interrupts all land here; only the WUU is unmasked.
#[cortex_m_rt::exception]
unsafe fn DefaultHandler(irqn: i16) {
    if irqn != Interrupt::WUU0 as i16 {
        return;
    }
    critical_section::with(|cs| {
        // clear the pin flags so that the interrupt stops firing
        if let Some(wuu) = WAKEUP_UNIT.borrow_ref(cs).as_ref() {
            wuu.clear_all_pin_flags();
        }
    });
}

// End of file
