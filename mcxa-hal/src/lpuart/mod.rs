//! Low-Power Universal Asynchronous Receiver Transmitter (LPUART)
//!
//! Drives the LPUART used as the debug console. The peripheral is a typestate:
//! [`Lpuart<Disabled>`] only knows how to enable itself, [`Lpuart<Enabled>`]
//! reads and writes through the `embedded-io` and `embedded-hal-nb` traits.
//!
//! Disabling hands the RX and TX pads back to GPIO, so the console can be
//! dropped before a low-power mode and re-attached after it.
//!
//! ## Usage
//!
//! ```no_run
//! use core::fmt::Write;
//! use mcxa_hal::{fugit::HertzU32, lpuart::{self, Lpuart, LpuartPins}, pac, port::{PinMux, Port}};
//!
//! let pac = pac::Peripherals::take().unwrap();
//! let port = Port::new(pac.PORT0);
//! let pins = LpuartPins { rx: 2, tx: 3, mux: PinMux::Alt2 };
//! let mut uart = Lpuart::new(pac.LPUART0)
//!     .enable(&port, pins, lpuart::common_configs::_115200_8_N_1, HertzU32::MHz(12))
//!     .unwrap();
//! writeln!(uart, "Hello World!\r").unwrap();
//! ```

mod peripheral;
mod utils;

pub use self::peripheral::Lpuart;
pub use self::utils::*;

/// Common configurations for the LPUART.
pub mod common_configs;
