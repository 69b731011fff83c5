//! The debug console
//!
//! The console has to let go of its pads before a low-power mode: a floating
//! RX line would leak, and the LPUART clock is gated anyway. [`Console`] adds
//! that suspend/resume pair to the `embedded-io` traits.

use embedded_io::{ErrorKind, ErrorType, Read, Write};
use fugit::HertzU32;
use mcxa_hal::{
    lpuart::{self, Disabled, Enabled, Lpuart, LpuartPins, ReadErrorType, UartConfig},
    port::Port,
};

use crate::config::DemoConfig;

/// A byte stream to the operator that can be parked across a low-power mode
pub trait Console: Read + Write {
    /// Waits for pending output to leave the transmitter, then releases the
    /// console hardware.
    fn suspend(&mut self);

    /// Re-attaches the console after a low-power mode.
    fn resume(&mut self) -> Result<(), Self::Error>;
}

/// Console errors
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The console is suspended
    Suspended,
    /// The LPUART could not be set up
    Config(lpuart::Error),
    /// A receive error
    Receive(ReadErrorType),
}

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Suspended => ErrorKind::NotConnected,
            Error::Config(_) => ErrorKind::InvalidInput,
            Error::Receive(_) => ErrorKind::Other,
        }
    }
}

enum Uart {
    Attached(Lpuart<Enabled>),
    Released(Lpuart<Disabled>),
    // `enable` failed and consumed the peripheral.
    Lost,
}

/// Console on an LPUART
pub struct LpuartConsole {
    uart: Uart,
    port: Port,
    pins: LpuartPins,
    config: UartConfig,
    clock: HertzU32,
}

impl LpuartConsole {
    /// Attaches the console with the board's pins and framing.
    pub fn new(uart: Lpuart<Disabled>, port: Port, board: &DemoConfig) -> Result<Self, Error> {
        let mut console = LpuartConsole {
            uart: Uart::Released(uart),
            port,
            pins: board.console_pins,
            config: board.console_config,
            clock: board.console_clock,
        };
        console.resume()?;
        Ok(console)
    }

    /// The PORT driver the console pins live on.
    pub fn port(&self) -> &Port {
        &self.port
    }

    fn attached(&mut self) -> Result<&mut Lpuart<Enabled>, Error> {
        match &mut self.uart {
            Uart::Attached(uart) => Ok(uart),
            _ => Err(Error::Suspended),
        }
    }
}

impl Console for LpuartConsole {
    fn suspend(&mut self) {
        self.uart = match core::mem::replace(&mut self.uart, Uart::Lost) {
            Uart::Attached(uart) => {
                let _ = nb::block!(uart.await_transmission_complete());
                Uart::Released(uart.disable(&self.port))
            }
            other => other,
        };
    }

    fn resume(&mut self) -> Result<(), Error> {
        self.uart = match core::mem::replace(&mut self.uart, Uart::Lost) {
            Uart::Released(uart) => {
                Uart::Attached(
                    uart.enable(&self.port, self.pins, self.config, self.clock)
                        .map_err(Error::Config)?,
                )
            }
            other => other,
        };
        Ok(())
    }
}

impl ErrorType for LpuartConsole {
    type Error = Error;
}

impl Read for LpuartConsole {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        self.attached()?.read(buf).map_err(Error::Receive)
    }
}

impl Write for LpuartConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        self.attached()?.write(buf).map_err(Error::Receive)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.attached()?.flush().map_err(Error::Receive)
    }
}
