//! Console menus
//!
//! Every menu goes through [`select`]: print the options, read one key, fold it
//! to upper case, and either accept it or print "Wrong Input!" and ask again.
//! Invalid input is never an error.

use embedded_io::{Read, Write};
use mcxa_hal::{clocks::CoreClockPreset, spc::RamRetention, PowerMode};

use crate::app::Error;

/// Shows a menu until `accept` takes the pressed key.
///
/// `show` prints the menu, `accept` maps an upper-case key to a value.
pub fn select<C, T>(
    console: &mut C,
    mut show: impl FnMut(&mut C) -> Result<(), Error<C::Error>>,
    mut accept: impl FnMut(u8) -> Option<T>,
) -> Result<T, Error<C::Error>>
where
    C: Read + Write,
{
    loop {
        show(console)?;
        let key = read_key(console)?;
        match accept(key) {
            Some(value) => return Ok(value),
            None => write!(console, "Wrong Input!")?,
        }
    }
}

/// Reads one key, folded to upper case.
pub fn read_key<C: Read>(console: &mut C) -> Result<u8, Error<C::Error>> {
    let mut key = [0u8; 1];
    console.read_exact(&mut key)?;
    Ok(key[0].to_ascii_uppercase())
}

/// Key selecting `mode` in the main menu.
pub fn mode_key(mode: PowerMode) -> u8 {
    let index = PowerMode::ALL
        .iter()
        .position(|m| *m == mode)
        .unwrap_or_default();
    b'A' + index as u8
}

/// Mode selected by `key`, if any.
pub fn mode_from_key(key: u8) -> Option<PowerMode> {
    let index = key.to_ascii_uppercase().checked_sub(b'A')?;
    PowerMode::ALL.get(index as usize).copied()
}

/// Main menu: which power mode to enter next.
pub fn select_power_mode<C: Read + Write>(
    console: &mut C,
) -> Result<PowerMode, Error<C::Error>> {
    let mode = select(
        console,
        |c| {
            write!(c, "\r\nSelect the desired operation \n\r\n")?;
            for mode in PowerMode::ALL {
                write!(
                    c,
                    "\tPress {} to enter: {} mode\r\n",
                    mode_key(mode) as char,
                    mode.name()
                )?;
            }
            write!(c, "\r\nWaiting for power mode select...\r\n\r\n")?;
            Ok(())
        },
        mode_from_key,
    )?;
    write!(console, "\t{}\r\n", mode.description())?;
    Ok(mode)
}

/// Core voltage shown for options B and C: what VDD_CORE drops to in `mode`.
fn low_voltage_label(mode: PowerMode) -> &'static str {
    if mode == PowerMode::PowerDown {
        "0.6V"
    } else {
        "1.0V"
    }
}

/// Core frequency and LDO menu.
pub fn select_core_clock<C: Read + Write>(
    console: &mut C,
    mode: PowerMode,
) -> Result<CoreClockPreset, Error<C::Error>> {
    let volts = low_voltage_label(mode);
    let preset = select(
        console,
        |c| {
            write!(
                c,
                "\r\nSelect the desired Core Frequency and LDO configuration:\n\r\n"
            )?;
            write!(c, "\tA: CPU_CLK=96MHz(FRO192M), VDD_CORE=1.1V\r\n")?;
            write!(c, "\tB: CPU_CLK=48MHz(FRO192M), VDD_CORE={}\r\n", volts)?;
            write!(c, "\tC: CPU_CLK=12MHz(FRO12M) , VDD_CORE={}\n\r\n", volts)?;
            Ok(())
        },
        |key| match key {
            b'A' => Some(CoreClockPreset::Fro96M),
            b'B' => Some(CoreClockPreset::Fro48M),
            b'C' => Some(CoreClockPreset::Fro12M),
            _ => None,
        },
    )?;
    let (clock, vdd_core) = match preset {
        CoreClockPreset::Fro96M => ("96MHz(FRO192M)", "1.1V"),
        CoreClockPreset::Fro48M => ("48MHz(FRO192M)", volts),
        CoreClockPreset::Fro12M => ("12MHz(FRO12M)", volts),
    };
    write!(console, "\tSelect CPU_CLK={}, VDD_CORE={}\r\n", clock, vdd_core)?;
    Ok(preset)
}

/// FRO12M in Deep Sleep: `true` keeps it and its peripheral clock running.
pub fn select_fro12m<C: Read + Write>(console: &mut C) -> Result<bool, Error<C::Error>> {
    let keep = select(
        console,
        |c| {
            write!(c, "\r\nConfigure FRO12M in DeepSleep mode:\n\r\n")?;
            write!(
                c,
                "\tA: Enable FRO12M and clock to peripherals in DeepSleep mode\r\n"
            )?;
            write!(c, "\tB: Disable FROM12M in DeepSleep mode\r\n")?;
            Ok(())
        },
        |key| match key {
            b'A' => Some(true),
            b'B' => Some(false),
            _ => None,
        },
    )?;
    if keep {
        write!(console, "\tSelect ENABLE FRO12M in DeepSleep mode\r\n")?;
    } else {
        write!(console, "\tSelect DISABLE FRO12M in DeepSleep mode\r\n")?;
    }
    Ok(keep)
}

/// RAM retention menu. A and E are only offered for Deep Power Down.
pub fn select_ram_retention<C: Read + Write>(
    console: &mut C,
    mode: PowerMode,
) -> Result<RamRetention, Error<C::Error>> {
    let dpd = mode == PowerMode::DeepPowerDown;
    let retention = select(
        console,
        |c| {
            write!(c, "\r\nConfigure the RAM retention:\n\r\n")?;
            if dpd {
                write!(c, "\tA: No RAM retained\r\n")?;
            }
            write!(c, "\tB: All RAM retained\r\n")?;
            write!(c, "\tC: RAMX0/X1, RAMA0~A3 retained\r\n")?;
            write!(c, "\tD: RAMX0/X1/A0 retained\r\n")?;
            if dpd {
                write!(c, "\tE: RAMA0 retained\r\n")?;
            }
            write!(c, "\tF: RAMX0/X1 retained\r\n\n")?;
            Ok(())
        },
        |key| match key {
            b'A' if dpd => Some(RamRetention::None),
            b'B' => Some(RamRetention::All),
            b'C' => Some(RamRetention::RamX0X1A0ToA3),
            b'D' => Some(RamRetention::RamX0X1A0),
            b'E' if dpd => Some(RamRetention::RamA0),
            b'F' => Some(RamRetention::RamX0X1),
            _ => None,
        },
    )?;
    let label = match retention {
        RamRetention::None => "No RAM retained",
        RamRetention::All => "All RAM retained",
        RamRetention::RamX0X1A0ToA3 => "RAMX0/X1, RAMA0~A3 retained",
        RamRetention::RamX0X1A0 => "RAMX0/X1/A0 retained",
        RamRetention::RamA0 => "RAMA0 retained",
        RamRetention::RamX0X1 => "RAMX0/RAMX1 retained",
    };
    write!(console, "\tSelect {}\r\n", label)?;
    Ok(retention)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_keys() {
        assert_eq!(mode_key(PowerMode::Active), b'A');
        assert_eq!(mode_key(PowerMode::DeepPowerDown), b'E');
        assert_eq!(mode_from_key(b'c'), Some(PowerMode::DeepSleep));
        assert_eq!(mode_from_key(b'F'), None);
        assert_eq!(mode_from_key(b'1'), None);
        for mode in PowerMode::ALL {
            assert_eq!(mode_from_key(mode_key(mode)), Some(mode));
        }
    }

    #[test]
    fn retention_voltage_label() {
        assert_eq!(low_voltage_label(PowerMode::PowerDown), "0.6V");
        assert_eq!(low_voltage_label(PowerMode::DeepSleep), "1.0V");
    }
}
