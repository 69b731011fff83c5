//! System configuration (SYSCON)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    _reserved0: [u32; 224],
    /// 0x380 - System clock divider
    pub ahbclkdiv: Reg,
    _reserved1: [u32; 30],
    /// 0x3fc - Clock configuration unlock
    pub clkunlock: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, ahbclkdiv) == 0x380);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, clkunlock) == 0x3fc);

/// AHBCLKDIV: divide by DIV + 1
pub const AHBCLKDIV_DIV: Field = Field::new(0, 8);
/// AHBCLKDIV: divider is being updated
pub const AHBCLKDIV_UNSTAB: Field = Field::bit(31);
/// CLKUNLOCK: when set, MRCC clock configuration is frozen
pub const CLKUNLOCK_UNLOCK: Field = Field::bit(0);
