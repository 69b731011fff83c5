//! Module Reset and Clock Control (MRCC)

use super::Reg;

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    _reserved0: [u32; 16],
    /// 0x40 - Global clock control 0
    pub glb_cc0: Reg,
    _reserved1: [u32; 3],
    /// 0x50 - Global clock control 1
    pub glb_cc1: Reg,
    _reserved2: [u32; 11],
    /// 0x80 - Global access control 0
    pub glb_acc0: Reg,
    _reserved3: [u32; 3],
    /// 0x90 - Global access control 1
    pub glb_acc1: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, glb_cc1) == 0x50);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, glb_acc0) == 0x80);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, glb_acc1) == 0x90);
