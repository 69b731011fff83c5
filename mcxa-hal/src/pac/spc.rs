//! System Power Controller (SPC)

use super::{Field, Reg};

/// Register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Version ID
    pub verid: Reg,
    _reserved0: [u32; 3],
    /// 0x10 - Status Control
    pub sc: Reg,
    _reserved1: [u32; 2],
    /// 0x1c - Low-Power Request Configuration
    pub lpreq_cfg: Reg,
    _reserved2: [u32; 4],
    /// 0x30 - Power domain status, one per domain
    pub pd_status: [Reg; 2],
    _reserved3: [u32; 2],
    /// 0x40 - SRAM Control
    pub sramctl: Reg,
    _reserved4: [u32; 47],
    /// 0x100 - Active Power Mode Configuration
    pub active_cfg: Reg,
    /// 0x104 - Active Power Mode Configuration 1 (analog modules)
    pub active_cfg1: Reg,
    /// 0x108 - Low-Power Mode Configuration
    pub lp_cfg: Reg,
    /// 0x10c - Low-Power Mode Configuration 1 (analog modules)
    pub lp_cfg1: Reg,
    /// 0x110 - Low-Power Wake-Up Delay
    pub lpwkup_delay: Reg,
    /// 0x114 - Active Voltage Trim Delay
    pub active_vdelay: Reg,
    _reserved5: [u32; 2],
    /// 0x120 - Voltage Detect Status
    pub vd_stat: Reg,
    /// 0x124 - Core Voltage Detect Configuration
    pub vd_core_cfg: Reg,
    /// 0x128 - System Voltage Detect Configuration
    pub vd_sys_cfg: Reg,
    _reserved6: u32,
    /// 0x130 - External Voltage Domain Configuration
    pub evd_cfg: Reg,
    _reserved7: [u32; 179],
    /// 0x400 - SRAM Retention Reference Trim
    pub sramretldo_reftrim: Reg,
    /// 0x404 - SRAM Retention LDO Control
    pub sramretldo_cntrl: Reg,
}

const _: () = assert!(core::mem::offset_of!(RegisterBlock, sc) == 0x10);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, pd_status) == 0x30);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, active_cfg) == 0x100);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, evd_cfg) == 0x130);
const _: () = assert!(core::mem::offset_of!(RegisterBlock, sramretldo_cntrl) == 0x404);

/// SC: SPC busy
pub const SC_BUSY: Field = Field::bit(0);
/// SC: a low-power request was made (write 1 to clear)
pub const SC_SPC_LP_REQ: Field = Field::bit(1);
/// SC: current low-power mode
pub const SC_SPC_LP_MODE: Field = Field::new(4, 4);
/// SC: release the peripheral and I/O isolation latch (write 1 to clear)
pub const SC_ISO_CLR: Field = Field::bit(16);

/// LPREQ_CFG: low-power request output enable
pub const LPREQ_CFG_LPREQOE: Field = Field::bit(0);
/// LPREQ_CFG: low-power request output polarity
pub const LPREQ_CFG_LPREQPOL: Field = Field::bit(1);
/// LPREQ_CFG: low-power request output override
pub const LPREQ_CFG_LPREQOV: Field = Field::new(2, 2);

/// PD_STATUS: power domain requested a low-power mode (write 1 to clear)
pub const PD_STATUS_PD_LP_REQ: Field = Field::bit(4);
/// PD_STATUS: low-power mode of the domain
pub const PD_STATUS_LP_MODE: Field = Field::new(8, 4);

/// ACTIVE_CFG/LP_CFG: core LDO drive strength
pub const CFG_CORELDO_VDD_DS: Field = Field::bit(0);
/// ACTIVE_CFG/LP_CFG: core LDO voltage level
pub const CFG_CORELDO_VDD_LVL: Field = Field::new(2, 2);
/// ACTIVE_CFG/LP_CFG: bandgap mode
pub const CFG_BGMODE: Field = Field::new(20, 2);
/// ACTIVE_CFG/LP_CFG: core low-voltage detect enable
pub const CFG_CORE_LVDE: Field = Field::bit(24);
/// ACTIVE_CFG/LP_CFG: system low-voltage detect enable
pub const CFG_SYS_LVDE: Field = Field::bit(25);
/// ACTIVE_CFG/LP_CFG: system high-voltage detect enable
pub const CFG_SYS_HVDE: Field = Field::bit(27);
/// LP_CFG: keep the SRAM retention LDO on in Deep Power Down
pub const LP_CFG_SRAMLDO_DPD_ON: Field = Field::bit(30);
/// LP_CFG: low-power current reference enable
pub const LP_CFG_LP_IREFEN: Field = Field::bit(31);

/// LPWKUP_DELAY: wake-up delay in FRO16K cycles
pub const LPWKUP_DELAY: Field = Field::new(0, 16);

/// EVD_CFG: isolate external voltage domains in active mode
pub const EVD_CFG_EVDISO: Field = Field::new(0, 6);
/// EVD_CFG: isolate external voltage domains in low-power modes
pub const EVD_CFG_EVDLPISO: Field = Field::new(16, 6);

/// SRAMRETLDO_CNTRL: SRAM retention LDO on
pub const SRAMRETLDO_CNTRL_SRAMLDO_ON: Field = Field::bit(0);
/// SRAMRETLDO_CNTRL: retained SRAM banks
pub const SRAMRETLDO_CNTRL_SRAM_RET_EN: Field = Field::new(8, 4);
