use fugit::HertzU32;

use crate::typelevel::Sealed;

/// Data bits
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    /// 7 bits
    Seven,
    /// 8 bits
    Eight,
}

/// Stop bits
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    /// 1 bit
    One,
    /// 2 bits
    Two,
}

/// Parity
///
/// The "none" state of parity is represented with the Option type (None).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// Odd parity
    Odd,
    /// Even parity
    Even,
}

/// A struct holding the configuration for an LPUART.
///
/// The `Default` implementation is 115200 8N1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UartConfig {
    /// The baudrate the uart will run at.
    pub baudrate: HertzU32,

    /// The amount of data bits the uart should be configured to.
    pub data_bits: DataBits,

    /// The amount of stop bits the uart should be configured to.
    pub stop_bits: StopBits,

    /// The parity that this uart should have
    pub parity: Option<Parity>,
}

impl UartConfig {
    /// Create a new instance of UartConfig
    pub const fn new(
        baudrate: HertzU32,
        data_bits: DataBits,
        parity: Option<Parity>,
        stop_bits: StopBits,
    ) -> UartConfig {
        UartConfig {
            baudrate,
            data_bits,
            stop_bits,
            parity,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        super::common_configs::_115200_8_N_1
    }
}

/// Error type for LPUART configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No divider pair gets within 3% of the requested baudrate.
    BadArgument,
    /// A pin could not be muxed to the LPUART.
    Pin(crate::port::Error),
}

impl From<crate::port::Error> for Error {
    fn from(e: crate::port::Error) -> Self {
        Error::Pin(e)
    }
}

/// Possible types of read errors, from the `STAT` flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadErrorType {
    /// Triggered when the receive buffer is overrun.
    Overrun,

    /// Triggered when noise was sampled on a received bit.
    Noise,

    /// Triggered when the received character didn't have a valid stop bit.
    Framing,

    /// Triggered when there is a parity mismatch between what's received and our settings.
    Parity,
}

impl embedded_hal_nb::serial::Error for ReadErrorType {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        use embedded_hal_nb::serial::ErrorKind;
        match self {
            ReadErrorType::Overrun => ErrorKind::Overrun,
            ReadErrorType::Noise => ErrorKind::Noise,
            ReadErrorType::Framing => ErrorKind::FrameFormat,
            ReadErrorType::Parity => ErrorKind::Parity,
        }
    }
}

impl embedded_io::Error for ReadErrorType {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// Console pins: which PORT0 pins carry RX and TX, and on which mux.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LpuartPins {
    /// RX pin index on PORT0
    pub rx: u8,
    /// TX pin index on PORT0
    pub tx: u8,
    /// Mux selecting the LPUART function
    pub mux: crate::port::PinMux,
}

/// State of the LPUART Peripheral.
pub trait State: Sealed {}

/// LPUART is enabled.
pub struct Enabled;

/// LPUART is disabled.
pub struct Disabled;

impl State for Enabled {}
impl Sealed for Enabled {}
impl State for Disabled {}
impl Sealed for Disabled {}

/// Oversampling ratio and modulo divisor for a baudrate.
///
/// Walks every oversampling ratio from 4 to 32 and keeps the pair with the
/// smallest error; on a tie the larger ratio wins.
pub(crate) fn calculate_baudrate_dividers(
    wanted_baudrate: HertzU32,
    frequency: HertzU32,
) -> Result<(u8, u16), Error> {
    let baud = wanted_baudrate.to_Hz();
    let clk = frequency.to_Hz();
    if baud == 0 {
        return Err(Error::BadArgument);
    }

    let mut best: Option<(u8, u16, u32)> = None;
    for osr in 4u32..=32 {
        let sbr = ((clk as u64 * 10 / (baud as u64 * osr as u64) + 5) / 10).clamp(1, 0x1FFF) as u32;
        let actual = clk / (osr * sbr);
        let diff = actual.abs_diff(baud);
        if best.map_or(true, |(_, _, d)| diff <= d) {
            best = Some((osr as u8, sbr as u16, diff));
        }
    }

    match best {
        Some((osr, sbr, diff)) if diff <= (baud / 100) * 3 => Ok((osr, sbr)),
        _ => Err(Error::BadArgument),
    }
}
