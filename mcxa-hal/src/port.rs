//! Port control: pin multiplexing
//!
//! Only what the console needs: hand a pin to a peripheral function, or give
//! it back to GPIO so that it stops driving (or leaking through) the pad.

use crate::pac::{self, port};

/// Pin mux selection
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinMux {
    /// GPIO
    Gpio = 0,
    /// Alternative 1
    Alt1 = 1,
    /// Alternative 2
    Alt2 = 2,
    /// Alternative 3
    Alt3 = 3,
    /// Alternative 4
    Alt4 = 4,
}

/// Possible errors when configuring a pin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The port has no pin with this index
    InvalidPin(u8),
}

/// PORT driver
pub struct Port {
    regs: &'static port::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Port {}

impl Port {
    /// Takes ownership of PORT0.
    pub fn new(dev: pac::PORT0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static port::RegisterBlock) -> Self {
        Port { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static port::RegisterBlock {
        self.regs
    }

    /// Selects the function of a pin. The input buffer is enabled for every
    /// function but GPIO.
    pub fn set_pin_mux(&self, pin: u8, mux: PinMux) -> Result<(), Error> {
        let pcr = self.regs.pcr.get(pin as usize).ok_or(Error::InvalidPin(pin))?;
        pcr.modify(|r| {
            let r = r & !(port::PCR_MUX.mask() | port::PCR_IBE.mask());
            r | port::PCR_MUX.bits(mux as u32) | port::PCR_IBE.bits((mux != PinMux::Gpio) as u32)
        });
        Ok(())
    }

    /// Current mux selection, as the raw `MUX` field.
    pub fn pin_mux(&self, pin: u8) -> Option<u8> {
        self.regs
            .pcr
            .get(pin as usize)
            .map(|pcr| pcr.read_field(port::PCR_MUX) as u8)
    }
}
