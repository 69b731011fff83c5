//! Wake-Up Unit (WUU)
//!
//! The WUU watches external pins while the chip is in a low-power mode and
//! turns an edge into an interrupt, a DMA request or a trigger.

use crate::pac::{self, wuu};

/// Edge that arms an external wake-up pin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinEdge {
    /// Pin ignored
    Disabled = 0,
    /// Rising edge
    Rising = 1,
    /// Falling edge
    Falling = 2,
    /// Either edge
    Any = 3,
}

/// What a detected edge produces
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinEvent {
    /// WUU interrupt
    Interrupt = 0,
    /// DMA request
    DmaRequest = 1,
    /// Trigger event
    Trigger = 2,
}

/// When the pin is watched
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Only while in a low-power mode
    LowPowerOnly,
    /// In Active as well
    Always,
}

/// Configuration of one external wake-up pin
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExternalPinConfig {
    /// Edge to detect
    pub edge: PinEdge,
    /// Event produced
    pub event: PinEvent,
    /// When the pin is active
    pub mode: PinMode,
}

/// Possible errors when configuring the WUU
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// There is no external wake-up pin with this index
    InvalidPin(u8),
}

/// Wake-Up Unit driver
pub struct Wuu {
    regs: &'static wuu::RegisterBlock,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl Send for Wuu {}

impl Wuu {
    /// Takes ownership of the WUU.
    pub fn new(dev: pac::WUU0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static wuu::RegisterBlock) -> Self {
        Wuu { regs }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static wuu::RegisterBlock {
        self.regs
    }

    /// Arms (or, with [`PinEdge::Disabled`], disarms) an external wake-up pin.
    pub fn set_external_pin(&self, pin: u8, config: &ExternalPinConfig) -> Result<(), Error> {
        if pin >= wuu::PIN_COUNT {
            return Err(Error::InvalidPin(pin));
        }
        let (pe, pdc) = if pin < 16 {
            (&self.regs.pe1, &self.regs.pdc1)
        } else {
            (&self.regs.pe2, &self.regs.pdc2)
        };
        let pair = wuu::pin_pair_field(pin);

        pe.write_field(pair, config.edge as u32);
        if config.event != PinEvent::Interrupt {
            pdc.write_field(pair, config.event as u32);
        }
        match config.mode {
            PinMode::Always => self.regs.pmc.set_bits(wuu::pin_flag(pin).mask()),
            PinMode::LowPowerOnly => self.regs.pmc.clear_bits(wuu::pin_flag(pin).mask()),
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("WUU: pin {} {}", pin, config);
        Ok(())
    }

    /// Has this pin flagged a wake-up?
    pub fn pin_flag(&self, pin: u8) -> bool {
        pin < wuu::PIN_COUNT && self.regs.pf.is_set(wuu::pin_flag(pin).mask())
    }

    /// Clears the wake-up flag of a pin.
    pub fn clear_pin_flag(&self, pin: u8) {
        if pin < wuu::PIN_COUNT {
            self.regs.pf.write(wuu::pin_flag(pin).mask());
        }
    }

    /// Clears every pending external pin flag.
    pub fn clear_all_pin_flags(&self) {
        let flags = self.regs.pf.read();
        self.regs.pf.write(flags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::detached;
    use core::cell::RefCell;
    use critical_section::Mutex;

    static HANDLER_WUU: Mutex<RefCell<Option<Wuu>>> = Mutex::new(RefCell::new(None));

    const BUTTON: ExternalPinConfig = ExternalPinConfig {
        edge: PinEdge::Falling,
        event: PinEvent::Interrupt,
        mode: PinMode::Always,
    };

    #[test]
    fn pin_nine_falling_edge() {
        let wuu = Wuu::from_registers(detached());
        wuu.set_external_pin(9, &BUTTON).unwrap();
        let regs = wuu.registers();
        assert_eq!(regs.pe1.read(), 0b10 << 18);
        assert_eq!(regs.pdc1.read(), 0);
        assert_eq!(regs.pmc.read(), 1 << 9);
        assert_eq!(regs.pe2.read(), 0);
    }

    #[test]
    fn upper_pins_and_events() {
        let wuu = Wuu::from_registers(detached());
        let config = ExternalPinConfig {
            edge: PinEdge::Any,
            event: PinEvent::Trigger,
            mode: PinMode::LowPowerOnly,
        };
        wuu.set_external_pin(17, &config).unwrap();
        let regs = wuu.registers();
        assert_eq!(regs.pe2.read(), 0b11 << 2);
        assert_eq!(regs.pdc2.read(), 0b10 << 2);
        assert_eq!(regs.pmc.read(), 0);

        assert_eq!(wuu.set_external_pin(32, &config), Err(Error::InvalidPin(32)));
    }

    #[test]
    fn flags() {
        let wuu = Wuu::from_registers(detached());
        assert!(!wuu.pin_flag(9));
        wuu.registers().pf.write(1 << 9);
        assert!(wuu.pin_flag(9));
        wuu.clear_pin_flag(9);
        // write-one-to-clear: the detached block just holds what was written
        assert_eq!(wuu.registers().pf.read(), 1 << 9);
        assert!(!wuu.pin_flag(40));
    }

    #[test]
    fn handed_to_an_interrupt_handler() {
        let wuu = Wuu::from_registers(detached());
        wuu.set_external_pin(9, &BUTTON).unwrap();
        critical_section::with(|cs| HANDLER_WUU.borrow(cs).replace(Some(wuu)));

        let armed = critical_section::with(|cs| {
            HANDLER_WUU
                .borrow_ref(cs)
                .as_ref()
                .map(|wuu| wuu.registers().pe1.read())
        });
        assert_eq!(armed, Some(0b10 << 18));
    }
}
