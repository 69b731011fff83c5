//! Flash Memory Unit (FMU)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Flash Status
    pub fstat: Reg,
    /// 0x04 - Flash Configuration
    pub fcnfg: Reg,
    /// 0x08 - Flash Control
    pub fctrl: Reg,
}

/// FCTRL: read wait-state control
pub const FCTRL_RWSC: Field = Field::new(0, 4);
