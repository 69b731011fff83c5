//! HAL for the NXP MCXA15x microcontrollers
//!
//! This crate covers the parts of the MCXA15x that take part in moving the chip
//! between its power modes: the Core Mode Controller ([`cmc`]), the System Power
//! Controller ([`spc`]), the Wake-Up Unit ([`wuu`]), the clock tree ([`clocks`],
//! [`mrcc`], [`vbat`]) and the LPUART used as the debug console ([`lpuart`]).
//!
//! NOTE This HAL is still under active development. This API will remain volatile until 1.0.0
//!
//! # Crate features
//!
//! * **critical-section-impl** -
//!   critical section implementation for the single Cortex-M33 core
//! * **defmt** -
//!   Implement `defmt::Format` for several types and log driver transitions.
//! * **rt** -
//!   Minimal startup / runtime for Cortex-M microcontrollers
//! * **std** -
//!   Allow zero-filled register blocks in RAM, for host-side testing.

#![warn(missing_docs)]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod arch;
pub mod clocks;
pub mod cmc;
pub mod lpuart;
pub mod mrcc;
pub mod pac;
pub mod port;
pub mod power;
pub mod spc;
pub mod typelevel;
pub mod vbat;
pub mod wuu;

pub use clocks::Clocks;
pub use cmc::Cmc;
pub use lpuart::Lpuart;
pub use power::PowerMode;
pub use spc::Spc;
pub use wuu::Wuu;

/// Attribute to declare the entry point of the program
#[cfg(all(target_arch = "arm", target_os = "none", feature = "rt"))]
pub use cortex_m_rt::entry;

// Re-export crates used in mcxa-hal's public API
pub extern crate fugit;
