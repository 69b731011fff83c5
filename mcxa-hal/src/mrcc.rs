//! Module Reset and Clock Control (MRCC): global clock gates
//!
//! The global gates decide which peripheral bus clocks survive. Dropping all
//! but the essential ones before a low-power entry lowers the current drawn in
//! Sleep and Deep Sleep. The gates only accept writes while SYSCON has the
//! clock configuration unlocked, see [`Clocks::unlocked`].

use crate::{
    clocks::Clocks,
    pac::{self, mrcc},
};

bitfield::bitfield! {
    /// One pair of MRCC global gate registers: `*0` in the low word, `*1` in
    /// the high word.
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[derive(Default, Copy, Clone, PartialEq, Eq)]
    pub struct ClockGate(u64);
    impl Debug;
    /// Contents of `GLB_CC0`/`GLB_ACC0`.
    pub u32, word0, set_word0: 31, 0;
    /// Contents of `GLB_CC1`/`GLB_ACC1`.
    pub u32, word1, set_word1: 63, 32;
}

impl ClockGate {
    /// Builds a gate set from the two register words.
    pub const fn from_words(word0: u32, word1: u32) -> Self {
        ClockGate(((word1 as u64) << 32) | word0 as u64)
    }

    /// Is gate `index` (0..64) open?
    pub fn is_enabled(&self, index: u8) -> bool {
        index < 64 && (self.0 >> index) & 1 == 1
    }
}

/// Clock and access gates written together
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalClockGates {
    /// `GLB_CC0`/`GLB_CC1`
    pub clock: ClockGate,
    /// `GLB_ACC0`/`GLB_ACC1`
    pub access: ClockGate,
}

/// MRCC driver
pub struct Mrcc {
    regs: &'static mrcc::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Mrcc {}

impl Mrcc {
    /// Takes ownership of MRCC0.
    pub fn new(dev: pac::MRCC0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static mrcc::RegisterBlock) -> Self {
        Mrcc { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static mrcc::RegisterBlock {
        self.regs
    }

    /// Writes all four global gate registers inside one SYSCON unlock.
    pub fn set_global_gates(&self, clocks: &Clocks, gates: &GlobalClockGates) {
        clocks.unlocked(|| {
            self.regs.glb_cc0.write(gates.clock.word0());
            self.regs.glb_cc1.write(gates.clock.word1());
            self.regs.glb_acc0.write(gates.access.word0());
            self.regs.glb_acc1.write(gates.access.word1());
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("MRCC: gates {}", gates);
    }

    /// Reads the global gate registers back.
    pub fn global_gates(&self) -> GlobalClockGates {
        GlobalClockGates {
            clock: ClockGate::from_words(self.regs.glb_cc0.read(), self.regs.glb_cc1.read()),
            access: ClockGate::from_words(self.regs.glb_acc0.read(), self.regs.glb_acc1.read()),
        }
    }
}
