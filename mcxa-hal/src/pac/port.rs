//! Port control (PORT)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    _reserved0: [u32; 31],
    /// 0x80 - Pin Control, one per pin
    pub pcr: [Reg; 32],
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, pcr) == 0x80);

/// PCR: pin mux
pub const PCR_MUX: Field = Field::new(8, 4);
/// PCR: input buffer enable
pub const PCR_IBE: Field = Field::bit(12);
