//! Wake-Up Unit (WUU)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    /// 0x04 - Parameter
    pub param: Reg,
    /// 0x08 - Pin Enable 1 (pins 0..=15)
    pub pe1: Reg,
    /// 0x0c - Pin Enable 2 (pins 16..=31)
    pub pe2: Reg,
    _reserved0: [u32; 2],
    /// 0x18 - Module Interrupt Enable
    pub me: Reg,
    /// 0x1c - Module DMA/Trigger Enable
    pub de: Reg,
    /// 0x20 - Pin Flag (write 1 to clear)
    pub pf: Reg,
    _reserved1: [u32; 3],
    /// 0x30 - Pin Filter
    pub filt: Reg,
    _reserved2: u32,
    /// 0x38 - Pin DMA/Trigger Configuration 1 (pins 0..=15)
    pub pdc1: Reg,
    /// 0x3c - Pin DMA/Trigger Configuration 2 (pins 16..=31)
    pub pdc2: Reg,
    _reserved3: [u32; 2],
    /// 0x48 - Pin Filter DMA/Trigger Configuration
    pub fdc: Reg,
    _reserved4: u32,
    /// 0x50 - Pin Mode Configuration
    pub pmc: Reg,
    _reserved5: u32,
    /// 0x58 - Module Mode Configuration
    pub fmc: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, pf) == 0x20);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, pdc1) == 0x38);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, pmc) == 0x50);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, fmc) == 0x58);

/// Number of external wake-up pins.
pub const PIN_COUNT: u8 = 32;

/// Two-bit per-pin field in PE1/PE2 and PDC1/PDC2.
pub const fn pin_pair_field(pin: u8) -> Field {
    Field::new((pin % 16) * 2, 2)
}

/// One-bit per-pin field in PF and PMC.
pub const fn pin_flag(pin: u8) -> Field {
    Field::bit(pin)
}
