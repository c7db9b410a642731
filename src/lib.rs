//! A driver for the Waveshare 2.13" (B) bichromal E-Ink display via SPI
//!
//! The panel has two independent 1-bit-per-pixel channels (black and red)
//! which the on-glass controller combines into black, white and red regions.
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/~1
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - The vendor module is driven at 4 MHz
//!
//! The driver talks to an [`SpiDevice`](embedded_hal::spi::SpiDevice), so
//! chip-select handling lives in the HAL: every command or data transfer is
//! exactly one bus transaction with CS asserted around it and nothing else.
//!
//! ### Other....
//!
//! - Buffersize: each channel buffer is always `(width + 7) / 8 * height`
//!   bytes, packed most-significant-bit first per row
//! - The BUSY line polarity on this module is 1 = busy, 0 = idle. Some
//!   controller revisions invert this; it is configurable via
//!   [`BusyPolarity`](config::BusyPolarity) instead of being assumed.
//!
//! # Example
//!
//! ```ignore
//! use epd2in13b::prelude::*;
//!
//! // Setup the driver, this resets and initialises the panel
//! let mut epd = Epd2in13b::new(&mut spi, busy, dc, rst, &mut delay, Config::portrait())?;
//!
//! // Draw into the owned channel buffers
//! epd.black_buffer_mut().fill(Color::Blank);
//! epd.red_buffer_mut().fill(Color::Blank);
//! epd.set_pixel(10, 20, TriColor::Black);
//! epd.set_pixel(11, 20, TriColor::Chromatic);
//!
//! // Push both buffers and trigger a full refresh
//! epd.display(&mut spi, &mut delay)?;
//!
//! // Enter deep sleep; a wake_up (reset + init) is needed afterwards
//! epd.sleep(&mut spi, &mut delay)?;
//! ```
#![no_std]
#![deny(missing_docs)]

pub mod buffer;

pub mod color;

mod command;

pub mod config;

pub mod error;

#[cfg(feature = "graphics")]
mod graphics;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod epd;

pub use crate::epd::{Epd2in13b, HEIGHT, WIDTH};

pub mod prelude {
    //! Convenient re-exports of everything needed to drive the panel
    pub use crate::buffer::PixelBuffer;
    pub use crate::color::{Color, TriColor};
    pub use crate::config::{BusyPolarity, Config, Orientation};
    pub use crate::epd::{DriverState, Epd2in13b};
    pub use crate::error::Error;
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// Computes the needed buffer length for one channel. Takes the width and
/// height of the geometry in pixels.
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width + 7) / 8 * height
}
