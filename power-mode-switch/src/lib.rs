//! Power mode switch demo for the FRDM-MCXA153
//!
//! An operator on the debug console picks one of the five power modes, then
//! the core clock and LDO, the FRO12M behaviour or the RAM retention that go
//! with it. The chip enters the mode and comes back when SW2 is pressed.
//!
//! The library holds everything but the entry point, so that the whole menu
//! can be driven from host tests with a scripted console and detached
//! register blocks.

#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod app;
pub mod config;
pub mod console;
pub mod menu;

pub use app::{Drivers, Error, PowerModeSwitch};
pub use console::{Console, LpuartConsole};
