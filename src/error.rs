//! Error type for driver operations

use core::fmt::{Debug, Display, Formatter};

/// Errors returned by [`Epd2in13b`](crate::Epd2in13b) operations.
///
/// Generic over the SPI device error and the GPIO pin error of the chosen
/// HAL. Transport errors are passed through unchanged; the protocol has no
/// idempotent replay point mid-sequence, so nothing is retried here.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<SpiErr, PinErr> {
    /// Encountered an SPI error
    Spi(SpiErr),

    /// Encountered an error on one of the GPIO lines
    Pin(PinErr),

    /// The busy line did not release within the configured poll limit
    BusyTimeout,

    /// The panel is in deep sleep; a wake_up (reset + init) is required
    /// before any further command is valid
    Asleep,

    /// The panel has been reset but not initialised yet
    Uninitialized,

    /// The deep sleep command only accepts the check code `0xA5`; anything
    /// else is silently ignored by the controller and therefore refused
    /// here before touching the bus
    InvalidCheckCode(u8),

    /// The requested operation is not available in the current orientation
    UnsupportedOrientation,
}

impl<SpiErr, PinErr> Display for Error<SpiErr, PinErr>
where
    SpiErr: Debug,
    PinErr: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(err) => write!(f, "SPI error: {err:?}"),
            Self::Pin(err) => write!(f, "GPIO error: {err:?}"),
            Self::BusyTimeout => write!(f, "busy line stuck beyond the poll limit"),
            Self::Asleep => write!(f, "panel is in deep sleep, wake_up required"),
            Self::Uninitialized => write!(f, "panel is reset but not initialised"),
            Self::InvalidCheckCode(code) => {
                write!(f, "deep sleep check code must be 0xA5, got {code:#04x}")
            }
            Self::UnsupportedOrientation => {
                write!(f, "operation not supported in this orientation")
            }
        }
    }
}

impl<SpiErr, PinErr> core::error::Error for Error<SpiErr, PinErr>
where
    SpiErr: Debug,
    PinErr: Debug,
{
}
