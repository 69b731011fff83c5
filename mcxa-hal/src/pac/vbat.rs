//! VBAT domain control (VBAT)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    _reserved0: [u32; 127],
    /// 0x200 - FRO16K Control A
    pub froctla: Reg,
    /// 0x204 - FRO16K Control B
    pub froctlb: Reg,
    _reserved1: [u32; 4],
    /// 0x218 - FRO16K Lock A
    pub frolcka: Reg,
    /// 0x21c - FRO16K Lock B
    pub frolckb: Reg,
    /// 0x220 - FRO16K Clock Enable
    pub froclke: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, froctla) == 0x200);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, froclke) == 0x220);

/// FROCTLA: FRO16K enable
pub const FROCTLA_FRO_EN: Field = Field::bit(0);
/// FROLCKA: lock the FRO16K control
pub const FROLCKA_LOCK: Field = Field::bit(0);
/// FROCLKE: FRO16K clock outputs
pub const FROCLKE_CLKE: Field = Field::new(0, 2);
