//! Low-Power UART (LPUART)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    /// 0x04 - Parameter
    pub param: Reg,
    /// 0x08 - Global
    pub global: Reg,
    /// 0x0c - Pin Configuration
    pub pincfg: Reg,
    /// 0x10 - Baud Rate
    pub baud: Reg,
    /// 0x14 - Status
    pub stat: Reg,
    /// 0x18 - Control
    pub ctrl: Reg,
    /// 0x1c - Data
    pub data: Reg,
    /// 0x20 - Match Address
    pub match_: Reg,
    /// 0x24 - Modem IrDA
    pub modir: Reg,
    /// 0x28 - FIFO
    pub fifo: Reg,
    /// 0x2c - Watermark
    pub water: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, data) == 0x1c);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, water) == 0x2c);

/// GLOBAL: software reset
pub const GLOBAL_RST: Field = Field::bit(1);

/// BAUD: baud rate modulo divisor
pub const BAUD_SBR: Field = Field::new(0, 13);
/// BAUD: two stop bits
pub const BAUD_SBNS: Field = Field::bit(13);
/// BAUD: both-edge sampling, required for oversampling ratios below 8
pub const BAUD_BOTHEDGE: Field = Field::bit(17);
/// BAUD: oversampling ratio minus one
pub const BAUD_OSR: Field = Field::new(24, 5);

/// STAT: match 2 flag
pub const STAT_MA2F: Field = Field::bit(14);
/// STAT: match 1 flag
pub const STAT_MA1F: Field = Field::bit(15);
/// STAT: parity error
pub const STAT_PF: Field = Field::bit(16);
/// STAT: framing error
pub const STAT_FE: Field = Field::bit(17);
/// STAT: noise
pub const STAT_NF: Field = Field::bit(18);
/// STAT: receiver overrun
pub const STAT_OR: Field = Field::bit(19);
/// STAT: idle line
pub const STAT_IDLE: Field = Field::bit(20);
/// STAT: receive data register full
pub const STAT_RDRF: Field = Field::bit(21);
/// STAT: transmission complete
pub const STAT_TC: Field = Field::bit(22);
/// STAT: transmit data register empty
pub const STAT_TDRE: Field = Field::bit(23);
/// STAT: RX pin active edge
pub const STAT_RXEDGIF: Field = Field::bit(30);
/// STAT: LIN break detect
pub const STAT_LBKDIF: Field = Field::bit(31);

/// CTRL: parity type (odd when set)
pub const CTRL_PT: Field = Field::bit(0);
/// CTRL: parity enable
pub const CTRL_PE: Field = Field::bit(1);
/// CTRL: 9-bit mode
pub const CTRL_M: Field = Field::bit(4);
/// CTRL: 7-bit mode
pub const CTRL_M7: Field = Field::bit(11);
/// CTRL: receiver enable
pub const CTRL_RE: Field = Field::bit(18);
/// CTRL: transmitter enable
pub const CTRL_TE: Field = Field::bit(19);

/// DATA: received or transmitted byte
pub const DATA_RT: Field = Field::new(0, 8);
