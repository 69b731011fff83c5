//! VBAT domain: the FRO16K low-power oscillator
//!
//! The FRO16K times the SPC wake-up delay, so it has to be routed to the
//! system and core-main domains before any low-power mode is entered.

use crate::pac::{self, vbat};

/// Domains fed by the FRO16K (`FROCLKE`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fro16kOutputs(u8);

impl Fro16kOutputs {
    /// System domain (VSYS)
    pub const SYSTEM: Self = Self(0x1);
    /// Core main domain
    pub const CORE_MAIN: Self = Self(0x2);

    /// Raw `CLKE` bits
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for Fro16kOutputs {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// VBAT driver
pub struct Vbat {
    regs: &'static vbat::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Vbat {}

impl Vbat {
    /// Takes ownership of the VBAT block.
    pub fn new(dev: pac::VBAT0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static vbat::RegisterBlock) -> Self {
        Vbat { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static vbat::RegisterBlock {
        self.regs
    }

    /// Starts the FRO16K, locks its control and routes it to `outputs`.
    ///
    /// Each `A` register has a `B` twin that must hold the inverted value.
    pub fn setup_fro16k(&self, outputs: Fro16kOutputs) {
        self.regs.froctla.set_bits(vbat::FROCTLA_FRO_EN.mask());
        self.regs.froctlb.clear_bits(vbat::FROCTLA_FRO_EN.mask());
        self.regs.frolcka.set_bits(vbat::FROLCKA_LOCK.mask());
        self.regs.frolckb.clear_bits(vbat::FROLCKA_LOCK.mask());
        self.regs
            .froclke
            .set_bits(vbat::FROCLKE_CLKE.bits(outputs.bits() as u32));

        #[cfg(feature = "defmt")]
        defmt::debug!("VBAT: FRO16K outputs {=u8:#x}", outputs.bits());
    }

    /// Is the FRO16K running?
    pub fn is_fro16k_enabled(&self) -> bool {
        self.regs.froctla.is_set(vbat::FROCTLA_FRO_EN.mask())
    }

    /// Domains currently fed by the FRO16K.
    pub fn fro16k_outputs(&self) -> Fro16kOutputs {
        Fro16kOutputs(self.regs.froclke.read_field(vbat::FROCLKE_CLKE) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::detached;

    #[test]
    fn fro16k_to_system_and_core() {
        let vbat = Vbat::from_registers(detached());
        let regs = vbat.registers();
        regs.froctlb.write(0xFFFF_FFFF);
        vbat.setup_fro16k(Fro16kOutputs::SYSTEM | Fro16kOutputs::CORE_MAIN);

        assert!(vbat.is_fro16k_enabled());
        assert_eq!(regs.froctlb.read(), 0xFFFF_FFFE);
        assert_eq!(regs.frolcka.read(), 1);
        assert_eq!(vbat.fro16k_outputs().bits(), 0x3);
    }
}
