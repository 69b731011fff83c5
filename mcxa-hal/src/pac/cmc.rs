//! Core Mode Controller (CMC)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    /// 0x04 - Parameter
    pub param: Reg,
    _reserved0: [u32; 2],
    /// 0x10 - Clock Control
    pub ckctrl: Reg,
    /// 0x14 - Clock Status
    pub ckstat: Reg,
    /// 0x18 - Power Mode Protection
    pub pmprot: Reg,
    /// 0x1c - Global Power Mode Control
    pub gpmctrl: Reg,
    /// 0x20 - Power Mode Control for the main power domain
    pub pmctrl: Reg,
    _reserved1: [u32; 23],
    /// 0x80 - System Reset Status
    pub srs: Reg,
    /// 0x84 - Reset Pin Control
    pub rpc: Reg,
    /// 0x88 - Sticky System Reset Status
    pub ssrs: Reg,
    /// 0x8c - System Reset Interrupt Enable
    pub srie: Reg,
    /// 0x90 - System Reset Interrupt Flag
    pub srif: Reg,
    _reserved2: [u32; 31],
    /// 0x110 - Flash Control
    pub flashcr: Reg,
    _reserved3: [u32; 3],
    /// 0x120 - Debug Control
    pub dbgctl: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, srs) == 0x80);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, flashcr) == 0x110);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, dbgctl) == 0x120);

/// CKCTRL/CKSTAT: clock gating mode applied on the next WFI
pub const CKMODE: Field = Field::new(0, 4);
/// CKCTRL: lock until the next reset
pub const CKCTRL_LOCK: Field = Field::bit(31);
/// CKSTAT: the last low-power entry completed
pub const CKSTAT_VALID: Field = Field::bit(31);
/// PMPROT: allowed low-power modes
pub const PMPROT_LPMODE: Field = Field::new(0, 4);
/// PMPROT: lock until the next reset
pub const PMPROT_LOCK: Field = Field::bit(31);
/// PMCTRL/GPMCTRL: low-power mode requested for the domain
pub const LPMODE: Field = Field::new(0, 4);
/// FLASHCR: disable flash accesses
pub const FLASHCR_FLASHDIS: Field = Field::bit(0);
/// FLASHCR: flash enters low power while the core clock is gated
pub const FLASHCR_FLASHDOZE: Field = Field::bit(1);
/// FLASHCR: flash leaves low power for the duration of an access
pub const FLASHCR_FLASHWAKE: Field = Field::bit(2);
/// DBGCTL: stop debug in low-power modes
pub const DBGCTL_SOD: Field = Field::bit(0);
