//! System Clock Generator (SCG)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    /// 0x04 - Parameter
    pub param: Reg,
    _reserved0: u32,
    /// 0x0c - Trim Lock
    pub trim_lock: Reg,
    /// 0x10 - Clock Status
    pub csr: Reg,
    /// 0x14 - Run Clock Control
    pub rccr: Reg,
    _reserved1: [u32; 122],
    /// 0x200 - FRO12M (SIRC) Control Status
    pub sirccsr: Reg,
    _reserved2: [u32; 63],
    /// 0x300 - FRO_HF (FIRC) Control Status
    pub firccsr: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, csr) == 0x10);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, sirccsr) == 0x200);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, firccsr) == 0x300);

/// CSR/RCCR: main clock source select
pub const SCS: Field = Field::new(24, 3);

/// FIRCCSR: FIRC enable
pub const FIRCCSR_FIRCEN: Field = Field::bit(0);
/// FIRCCSR: FIRC stays enabled in deep sleep
pub const FIRCCSR_FIRCSTEN: Field = Field::bit(1);
/// FIRCCSR: FIRC slow clock to peripherals
pub const FIRCCSR_FIRC_SCLK_PERIPH_EN: Field = Field::bit(4);
/// FIRCCSR: FIRC fast clock to peripherals
pub const FIRCCSR_FIRC_FCLK_PERIPH_EN: Field = Field::bit(5);
/// FIRCCSR: register lock
pub const FIRCCSR_LK: Field = Field::bit(23);
/// FIRCCSR: FIRC is valid
pub const FIRCCSR_FIRCVLD: Field = Field::bit(24);

/// SIRCCSR: SIRC stays enabled in deep sleep
pub const SIRCCSR_SIRCSTEN: Field = Field::bit(1);
/// SIRCCSR: SIRC clock to peripherals
pub const SIRCCSR_SIRC_CLK_PERIPH_EN: Field = Field::bit(5);
/// SIRCCSR: register lock
pub const SIRCCSR_LK: Field = Field::bit(23);
/// SIRCCSR: SIRC is valid
pub const SIRCCSR_SIRCVLD: Field = Field::bit(24);
