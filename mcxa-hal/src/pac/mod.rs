//! Register blocks for the MCXA15x peripherals driven by this HAL
//!
//! There is no published peripheral access crate for this part, so the handful
//! of blocks the power-mode code needs are described here in the same shape
//! svd2rust produces: a `#[repr(C)]` `RegisterBlock` per peripheral, a
//! zero-sized owner token per instance, and [`Peripherals::take`] to hand the
//! tokens out exactly once.
//!
//! Only the registers and fields this crate uses are named; everything else is
//! kept as reserved padding so that offsets match the reference manual.

use core::marker::PhantomData;
use core::ops::Deref;

use vcell::VolatileCell;

use crate::typelevel::Sealed;

pub mod cmc;
pub mod fmu;
pub mod lpuart;
pub mod mrcc;
pub mod port;
pub mod scg;
pub mod spc;
pub mod syscon;
pub mod vbat;
pub mod wuu;

/// A single 32-bit memory-mapped register.
#[repr(transparent)]
pub struct Reg {
    value: VolatileCell<u32>,
}

impl Reg {
    /// Reads the whole register.
    #[inline(always)]
    pub fn read(&self) -> u32 {
        self.value.get()
    }

    /// Writes the whole register.
    #[inline(always)]
    pub fn write(&self, bits: u32) {
        self.value.set(bits)
    }

    /// Read-modify-write.
    #[inline(always)]
    pub fn modify<F: FnOnce(u32) -> u32>(&self, f: F) {
        self.value.set(f(self.value.get()))
    }

    /// Sets every bit of `mask`, leaving the others untouched.
    #[inline(always)]
    pub fn set_bits(&self, mask: u32) {
        self.modify(|r| r | mask)
    }

    /// Clears every bit of `mask`, leaving the others untouched.
    #[inline(always)]
    pub fn clear_bits(&self, mask: u32) {
        self.modify(|r| r & !mask)
    }

    /// Are all bits of `mask` set?
    #[inline(always)]
    pub fn is_set(&self, mask: u32) -> bool {
        self.read() & mask == mask
    }

    /// Reads a field, shifted down to bit 0.
    #[inline(always)]
    pub fn read_field(&self, field: Field) -> u32 {
        field.extract(self.read())
    }

    /// Replaces a field, leaving the rest of the register untouched.
    #[inline(always)]
    pub fn write_field(&self, field: Field, value: u32) {
        self.modify(|r| (r & !field.mask()) | field.bits(value))
    }
}

/// Position of a bit field inside a [`Reg`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    offset: u8,
    width: u8,
}

impl Field {
    /// A field of `width` bits starting at bit `offset`.
    pub const fn new(offset: u8, width: u8) -> Field {
        Field { offset, width }
    }

    /// A single-bit field.
    pub const fn bit(offset: u8) -> Field {
        Field::new(offset, 1)
    }

    /// The in-place mask of this field.
    pub const fn mask(self) -> u32 {
        (((1u64 << self.width) - 1) as u32) << self.offset
    }

    /// Places `value` into this field's position, truncating it to the field width.
    pub const fn bits(self, value: u32) -> u32 {
        (value << self.offset) & self.mask()
    }

    /// Extracts this field from a full register value.
    pub const fn extract(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.offset
    }
}

/// Marker for `RegisterBlock` types.
///
/// # Safety
///
/// Implementors must consist only of [`Reg`]s and plain integer padding, so
/// that an all-zero bit pattern is a valid value.
pub unsafe trait RegisterBlock: Sealed + Sized + 'static {}

/// Allocates a zero-filled register block that is not backed by hardware.
///
/// Drivers built on it behave exactly as they do on silicon except that
/// nothing reacts to the writes. Tests use it to observe register traffic and
/// to preset status flags.
#[cfg(any(test, feature = "std"))]
pub fn detached<T: RegisterBlock>() -> &'static T {
    // SAFETY: `RegisterBlock` guarantees that all-zero is a valid value.
    let block: T = unsafe { core::mem::zeroed() };
    std::boxed::Box::leak(std::boxed::Box::new(block))
}

macro_rules! peripheral {
    ($(#[$attr:meta])* $NAME:ident, $module:ident, $address:literal) => {
        $(#[$attr])*
        pub struct $NAME {
            _marker: PhantomData<*const ()>,
        }

        unsafe impl Send for $NAME {}

        impl $NAME {
            /// Pointer to the register block
            pub const PTR: *const $module::RegisterBlock = $address as *const _;

            /// Return the pointer to the register block
            #[inline(always)]
            pub const fn ptr() -> *const $module::RegisterBlock {
                Self::PTR
            }

            /// Steal an instance of this peripheral
            ///
            /// # Safety
            ///
            /// Ensure that the new instance of the peripheral cannot be used in a
            /// way that may race with any existing instances.
            #[inline]
            pub unsafe fn steal() -> Self {
                Self {
                    _marker: PhantomData,
                }
            }

            /// Consumes the token, returning the memory-mapped register block.
            #[inline(always)]
            pub fn registers(self) -> &'static $module::RegisterBlock {
                // SAFETY: the address is the fixed location of this peripheral
                // and the token guarantees a single owner.
                unsafe { &*Self::PTR }
            }
        }

        impl Deref for $NAME {
            type Target = $module::RegisterBlock;

            #[inline(always)]
            fn deref(&self) -> &Self::Target {
                unsafe { &*Self::PTR }
            }
        }

        impl Sealed for $module::RegisterBlock {}
        unsafe impl RegisterBlock for $module::RegisterBlock {}
    };
}

peripheral!(
    /// Core Mode Controller
    CMC, cmc, 0x4008_b000
);
peripheral!(
    /// System Power Controller
    SPC0, spc, 0x4008_e000
);
peripheral!(
    /// Wake-Up Unit
    WUU0, wuu, 0x4004_6000
);
peripheral!(
    /// System Clock Generator
    SCG0, scg, 0x4004_4000
);
peripheral!(
    /// System configuration. Shares its window with MRCC0; the two never use
    /// the same offsets.
    SYSCON, syscon, 0x4009_1000
);
peripheral!(
    /// Module Reset and Clock Control
    MRCC0, mrcc, 0x4009_1000
);
peripheral!(
    /// Flash Memory Unit
    FMU0, fmu, 0x4009_5000
);
peripheral!(
    /// Port 0 pin control
    PORT0, port, 0x4010_3000
);
peripheral!(
    /// Low-power UART 0
    LPUART0, lpuart, 0x4010_6000
);
peripheral!(
    /// Battery-backed domain (FRO16K)
    VBAT0, vbat, 0x4009_3000
);

/// Device interrupts used by this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Interrupt {
    /// Wake-Up Unit, vector 34
    WUU0 = 18,
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    #[inline(always)]
    fn number(self) -> u16 {
        self as u16
    }
}

static mut TAKEN: bool = false;

/// All the peripherals
#[allow(non_snake_case)]
pub struct Peripherals {
    /// CMC
    pub CMC: CMC,
    /// SPC0
    pub SPC0: SPC0,
    /// WUU0
    pub WUU0: WUU0,
    /// SCG0
    pub SCG0: SCG0,
    /// SYSCON
    pub SYSCON: SYSCON,
    /// MRCC0
    pub MRCC0: MRCC0,
    /// FMU0
    pub FMU0: FMU0,
    /// PORT0
    pub PORT0: PORT0,
    /// LPUART0
    pub LPUART0: LPUART0,
    /// VBAT0
    pub VBAT0: VBAT0,
}

impl Peripherals {
    /// Returns all the peripherals *once*.
    #[inline]
    pub fn take() -> Option<Self> {
        critical_section::with(|_| {
            // SAFETY: `TAKEN` is only accessed inside a critical section.
            if unsafe { TAKEN } {
                None
            } else {
                Some(unsafe { Peripherals::steal() })
            }
        })
    }

    /// Unchecked version of `Peripherals::take`.
    ///
    /// # Safety
    ///
    /// Each of the returned peripherals must be used at most once.
    #[inline]
    pub unsafe fn steal() -> Self {
        TAKEN = true;
        Peripherals {
            CMC: CMC::steal(),
            SPC0: SPC0::steal(),
            WUU0: WUU0::steal(),
            SCG0: SCG0::steal(),
            SYSCON: SYSCON::steal(),
            MRCC0: MRCC0::steal(),
            FMU0: FMU0::steal(),
            PORT0: PORT0::steal(),
            LPUART0: LPUART0::steal(),
            VBAT0: VBAT0::steal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_masks_and_extraction() {
        let lvl = Field::new(2, 2);
        assert_eq!(lvl.mask(), 0b1100);
        assert_eq!(lvl.bits(0b10), 0b1000);
        // values wider than the field are truncated
        assert_eq!(lvl.bits(0b111), 0b1100);
        assert_eq!(lvl.extract(0xffff_fff7), 0b01);
        assert_eq!(Field::new(0, 32).mask(), u32::MAX);
        assert_eq!(Field::bit(31).mask(), 0x8000_0000);
    }

    #[test]
    fn detached_register_round_trip() {
        let spc: &spc::RegisterBlock = detached();
        assert_eq!(spc.sc.read(), 0);
        spc.active_cfg.write_field(spc::CFG_CORELDO_VDD_LVL, 2);
        spc.active_cfg.set_bits(spc::CFG_CORELDO_VDD_DS.mask());
        assert_eq!(spc.active_cfg.read(), 0b1001);
        spc.active_cfg.clear_bits(spc::CFG_CORELDO_VDD_DS.mask());
        assert_eq!(spc.active_cfg.read_field(spc::CFG_CORELDO_VDD_LVL), 2);
        assert!(!spc.active_cfg.is_set(spc::CFG_CORELDO_VDD_DS.mask()));
    }

    #[test]
    fn wake_up_unit_vector() {
        // vector 34, after the 16 core exceptions
        assert_eq!(Interrupt::WUU0 as u16, 18);
    }
}
