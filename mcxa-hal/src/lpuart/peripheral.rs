//! LPUART - Bi-directional Peripheral Code

use core::{convert::Infallible, fmt};

use embedded_hal_nb::serial::{ErrorType, Read, Write};
use fugit::HertzU32;
use nb::Error::{Other, WouldBlock};

use super::utils::calculate_baudrate_dividers;
use super::*;
use crate::{
    pac::{self, lpuart},
    port::{PinMux, Port},
};

const ERROR_FLAGS: u32 = lpuart::STAT_OR.mask()
    | lpuart::STAT_NF.mask()
    | lpuart::STAT_FE.mask()
    | lpuart::STAT_PF.mask();
const W1C_FLAGS: u32 = ERROR_FLAGS
    | lpuart::STAT_IDLE.mask()
    | lpuart::STAT_MA2F.mask()
    | lpuart::STAT_MA1F.mask()
    | lpuart::STAT_RXEDGIF.mask()
    | lpuart::STAT_LBKDIF.mask();

/// An LPUART peripheral.
pub struct Lpuart<S: State> {
    regs: &'static lpuart::RegisterBlock,
    _state: S,
    pins: Option<LpuartPins>,
    baudrate: HertzU32,
}

// SAFETY: the driver owns its register block, like the peripheral token it
// was built from.
unsafe impl<S: State + Send> Send for Lpuart<S> {}

impl<S: State> Lpuart<S> {
    fn transition<To: State>(self, state: To) -> Lpuart<To> {
        Lpuart {
            regs: self.regs,
            _state: state,
            pins: self.pins,
            baudrate: self.baudrate,
        }
    }

    /// The register block this driver operates on.
    pub fn registers(&self) -> &'static lpuart::RegisterBlock {
        self.regs
    }

    /// Has the last frame left the shift register?
    pub fn transmission_complete(&self) -> bool {
        self.regs.stat.is_set(lpuart::STAT_TC.mask())
    }

    /// Completes once everything written has been shifted out.
    pub fn await_transmission_complete(&self) -> nb::Result<(), Infallible> {
        if !self.transmission_complete() {
            return Err(WouldBlock);
        }
        Ok(())
    }
}

impl Lpuart<Disabled> {
    /// Takes ownership of LPUART0.
    pub fn new(dev: pac::LPUART0) -> Self {
        Self::from_registers(dev.registers())
    }

    /// Builds the driver over an arbitrary register block.
    pub fn from_registers(regs: &'static lpuart::RegisterBlock) -> Self {
        Lpuart {
            regs,
            _state: Disabled,
            pins: None,
            baudrate: HertzU32::from_raw(0),
        }
    }

    /// Muxes the pins and enables the transmitter and receiver.
    ///
    /// `frequency` is the LPUART functional clock.
    pub fn enable(
        self,
        port: &Port,
        pins: LpuartPins,
        config: UartConfig,
        frequency: HertzU32,
    ) -> Result<Lpuart<Enabled>, Error> {
        let (osr, sbr) = calculate_baudrate_dividers(config.baudrate, frequency)?;

        port.set_pin_mux(pins.rx, pins.mux)?;
        port.set_pin_mux(pins.tx, pins.mux)?;

        self.regs.global.set_bits(lpuart::GLOBAL_RST.mask());
        self.regs.global.clear_bits(lpuart::GLOBAL_RST.mask());

        self.regs.baud.write(
            lpuart::BAUD_OSR.bits(osr as u32 - 1)
                | lpuart::BAUD_SBR.bits(sbr as u32)
                | lpuart::BAUD_BOTHEDGE.bits((osr < 8) as u32)
                | lpuart::BAUD_SBNS.bits((config.stop_bits == StopBits::Two) as u32),
        );
        self.regs.ctrl.write(frame_format(&config));
        self.regs
            .ctrl
            .set_bits(lpuart::CTRL_TE.mask() | lpuart::CTRL_RE.mask());

        let baudrate = HertzU32::from_raw(frequency.to_Hz() / (osr as u32 * sbr as u32));
        #[cfg(feature = "defmt")]
        defmt::debug!("LPUART: enabled at {=u32} baud", baudrate.to_Hz());

        let mut uart = self.transition(Enabled);
        uart.pins = Some(pins);
        uart.baudrate = baudrate;
        Ok(uart)
    }
}

fn frame_format(config: &UartConfig) -> u32 {
    let mut ctrl = 0;
    match (config.data_bits, config.parity.is_some()) {
        // 7 data bits + parity is an 8-bit frame
        (DataBits::Seven, false) => ctrl |= lpuart::CTRL_M7.mask(),
        (DataBits::Eight, true) => ctrl |= lpuart::CTRL_M.mask(),
        _ => {}
    }
    if let Some(parity) = config.parity {
        ctrl |= lpuart::CTRL_PE.mask();
        if parity == Parity::Odd {
            ctrl |= lpuart::CTRL_PT.mask();
        }
    }
    ctrl
}

impl Lpuart<Enabled> {
    /// Disables the transmitter and receiver and returns the pins to GPIO.
    pub fn disable(self, port: &Port) -> Lpuart<Disabled> {
        self.regs
            .ctrl
            .clear_bits(lpuart::CTRL_TE.mask() | lpuart::CTRL_RE.mask());
        if let Some(pins) = self.pins {
            // Both pins were muxed by `enable`, so they exist.
            let _ = port.set_pin_mux(pins.rx, PinMux::Gpio);
            let _ = port.set_pin_mux(pins.tx, PinMux::Gpio);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("LPUART: disabled");
        self.transition(Disabled)
    }

    /// Baudrate actually achieved by the dividers.
    pub fn baudrate(&self) -> HertzU32 {
        self.baudrate
    }

    /// Can a byte be written right now?
    pub fn uart_is_writable(&self) -> bool {
        self.regs.stat.is_set(lpuart::STAT_TDRE.mask())
    }

    /// Is there a received byte waiting?
    pub fn uart_is_readable(&self) -> bool {
        self.regs.stat.is_set(lpuart::STAT_RDRF.mask())
    }

    /// Writes bytes to the LPUART.
    /// This function writes as long as it can. As soon as the data register is full, if :
    /// - 0 bytes were written, a WouldBlock Error is returned
    /// - some bytes were written, it is deemed to be a success
    ///
    /// Upon success, the remaining slice is returned.
    pub fn write_raw<'d>(&self, data: &'d [u8]) -> nb::Result<&'d [u8], Infallible> {
        let mut written = 0;
        for byte in data {
            if !self.uart_is_writable() {
                break;
            }
            self.regs.data.write(*byte as u32);
            written += 1;
        }
        if written == 0 && !data.is_empty() {
            return Err(WouldBlock);
        }
        Ok(&data[written..])
    }

    /// Writes bytes to the LPUART.
    ///
    /// This function blocks until the full buffer has been sent.
    pub fn write_full_blocking(&self, data: &[u8]) {
        let mut remaining = data;
        while !remaining.is_empty() {
            match nb::block!(self.write_raw(remaining)) {
                Ok(rest) => remaining = rest,
                Err(e) => match e {},
            }
        }
    }

    /// Reads bytes from the LPUART.
    /// This function reads as long as it can. As soon as there is nothing
    /// left, if :
    /// - 0 bytes were read, a WouldBlock Error is returned
    /// - some bytes were read, it is deemed to be a success
    ///
    /// A receive error is reported on its own, before any data.
    pub fn read_raw(&self, buffer: &mut [u8]) -> nb::Result<usize, ReadErrorType> {
        let mut read = 0;
        while read < buffer.len() {
            let stat = self.regs.stat.read();
            if stat & ERROR_FLAGS != 0 {
                if read > 0 {
                    break;
                }
                // write-one-to-clear: keep the control bits, clear only the errors
                self.regs.stat.write((stat & !W1C_FLAGS) | (stat & ERROR_FLAGS));
                return Err(Other(read_error_from(stat)));
            }
            if lpuart::STAT_RDRF.extract(stat) == 0 {
                break;
            }
            buffer[read] = self.regs.data.read_field(lpuart::DATA_RT) as u8;
            read += 1;
        }
        if read == 0 && !buffer.is_empty() {
            return Err(WouldBlock);
        }
        Ok(read)
    }
}

fn read_error_from(stat: u32) -> ReadErrorType {
    if lpuart::STAT_OR.extract(stat) != 0 {
        ReadErrorType::Overrun
    } else if lpuart::STAT_FE.extract(stat) != 0 {
        ReadErrorType::Framing
    } else if lpuart::STAT_PF.extract(stat) != 0 {
        ReadErrorType::Parity
    } else {
        ReadErrorType::Noise
    }
}

impl ErrorType for Lpuart<Enabled> {
    type Error = ReadErrorType;
}

impl Read<u8> for Lpuart<Enabled> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let byte: &mut [u8] = &mut [0; 1];
        self.read_raw(byte).map(|_| byte[0])
    }
}

impl Write<u8> for Lpuart<Enabled> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if self.write_raw(&[word]).is_err() {
            Err(WouldBlock)
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.await_transmission_complete().map_err(|e| match e {
            WouldBlock => WouldBlock,
            Other(v) => match v {},
        })
    }
}

impl fmt::Write for Lpuart<Enabled> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.bytes()
            .try_for_each(|c| nb::block!(Write::write(self, c)))
            .map_err(|_| fmt::Error)
    }
}

impl embedded_io::ErrorType for Lpuart<Enabled> {
    type Error = ReadErrorType;
}

impl embedded_io::Read for Lpuart<Enabled> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        nb::block!(self.read_raw(buf))
    }
}

impl embedded_io::ReadReady for Lpuart<Enabled> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart_is_readable() || self.regs.stat.read() & ERROR_FLAGS != 0)
    }
}

impl embedded_io::Write for Lpuart<Enabled> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        // Blocks if and only if no bytes can be written.
        match nb::block!(self.write_raw(buf)) {
            Ok(remaining) => Ok(buf.len() - remaining.len()),
            Err(e) => match e {},
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match nb::block!(self.await_transmission_complete()) {
            Ok(()) => Ok(()),
            Err(e) => match e {},
        }
    }
}

impl embedded_io::WriteReady for Lpuart<Enabled> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart_is_writable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::{detached, port as port_regs};

    const PINS: LpuartPins = LpuartPins {
        rx: 2,
        tx: 3,
        mux: PinMux::Alt2,
    };

    fn console() -> (Lpuart<Enabled>, Port) {
        let port = Port::from_registers(detached());
        let uart = Lpuart::from_registers(detached())
            .enable(&port, PINS, common_configs::_115200_8_N_1, HertzU32::MHz(12))
            .unwrap();
        (uart, port)
    }

    #[test]
    fn enable_muxes_pins_and_starts_tx_rx() {
        let (uart, port) = console();
        let regs = uart.registers();
        assert!(regs.ctrl.is_set(lpuart::CTRL_TE.mask() | lpuart::CTRL_RE.mask()));
        assert!(!regs.ctrl.is_set(lpuart::CTRL_M.mask()));
        assert_eq!(port.pin_mux(2), Some(2));
        assert_eq!(port.pin_mux(3), Some(2));
        assert!(uart.baudrate().to_Hz().abs_diff(115_200) < 3456);

        let _uart = uart.disable(&port);
        assert_eq!(port.pin_mux(2), Some(0));
        assert!(!port.registers().pcr[3].is_set(port_regs::PCR_IBE.mask()));
        assert_eq!(regs.ctrl.read() & lpuart::CTRL_TE.mask(), 0);
    }

    #[test]
    fn parity_frames() {
        let mut config = common_configs::_115200_8_N_1;
        config.parity = Some(Parity::Odd);
        assert_eq!(
            frame_format(&config),
            lpuart::CTRL_M.mask() | lpuart::CTRL_PE.mask() | lpuart::CTRL_PT.mask()
        );
        config.data_bits = DataBits::Seven;
        config.parity = None;
        assert_eq!(frame_format(&config), lpuart::CTRL_M7.mask());
    }

    #[test]
    fn write_needs_an_empty_data_register() {
        let (mut uart, _port) = console();
        assert_eq!(uart.write_raw(b"hi"), Err(WouldBlock));

        uart.registers().stat.write(lpuart::STAT_TDRE.mask());
        assert_eq!(embedded_io::Write::write(&mut uart, b"hi").unwrap(), 2);
        assert_eq!(uart.registers().data.read(), b'i' as u32);
    }

    #[test]
    fn blocking_write_sends_everything() {
        let (uart, _port) = console();
        uart.registers().stat.write(lpuart::STAT_TDRE.mask());
        uart.write_full_blocking(b"Next loop.");
        assert_eq!(uart.registers().data.read(), b'.' as u32);
        uart.write_full_blocking(b"");
    }

    #[test]
    fn flush_waits_for_transmission_complete() {
        let (mut uart, _port) = console();
        assert_eq!(Write::flush(&mut uart), Err(WouldBlock));
        uart.registers().stat.write(lpuart::STAT_TC.mask());
        assert_eq!(Write::flush(&mut uart), Ok(()));
        assert!(uart.transmission_complete());
    }

    #[test]
    fn read_reports_errors_then_data() {
        let (mut uart, _port) = console();
        assert_eq!(Read::read(&mut uart), Err(WouldBlock));

        uart.registers()
            .stat
            .write(lpuart::STAT_FE.mask() | lpuart::STAT_RDRF.mask());
        assert_eq!(Read::read(&mut uart), Err(Other(ReadErrorType::Framing)));

        uart.registers().stat.write(lpuart::STAT_RDRF.mask());
        uart.registers().data.write(b'a' as u32);
        assert_eq!(Read::read(&mut uart), Ok(b'a'));
    }
}
