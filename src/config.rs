//! Driver configuration: panel orientation and busy-line handling

use crate::buffer_len;
use crate::epd::{HEIGHT, WIDTH};

/// Orientation of the 104x212 panel.
///
/// Both orientations speak the identical protocol; landscape additionally
/// programs the data entry mode register during init. Buffers are stored in
/// transfer order for either orientation, so no transformation happens on
/// the way out.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Orientation {
    /// 104 wide, 212 tall (native)
    #[default]
    Portrait,
    /// 212 wide, 104 tall
    Landscape,
}

impl Orientation {
    /// Width of the display in pixels for this orientation
    pub fn width(self) -> u32 {
        match self {
            Orientation::Portrait => WIDTH,
            Orientation::Landscape => HEIGHT,
        }
    }

    /// Height of the display in pixels for this orientation
    pub fn height(self) -> u32 {
        match self {
            Orientation::Portrait => HEIGHT,
            Orientation::Landscape => WIDTH,
        }
    }

    /// Number of bytes per packed row, rows are padded to full bytes
    pub fn bytes_per_row(self) -> usize {
        (self.width() as usize + 7) / 8
    }

    /// Length in bytes of one channel buffer for this orientation
    pub fn buffer_len(self) -> usize {
        buffer_len(self.width() as usize, self.height() as usize)
    }
}

/// Which level of the BUSY input means "controller is busy".
///
/// The vendor sample code for this module reads 1 = busy, but some
/// controller revisions invert the line. Getting this wrong turns every
/// busy-wait into either a no-op or an endless loop, so it is a
/// configuration value rather than a constant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BusyPolarity {
    /// High level means busy (vendor sample behaviour)
    #[default]
    ActiveHigh,
    /// Low level means busy
    ActiveLow,
}

/// Construction-time configuration for [`Epd2in13b`](crate::Epd2in13b)
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Panel orientation
    pub orientation: Orientation,
    /// Busy line polarity
    pub busy_polarity: BusyPolarity,
    /// Number of us the busy-wait loop sleeps between polls
    pub poll_delay_us: u32,
    /// Upper bound on busy polls before giving up with
    /// [`Error::BusyTimeout`](crate::error::Error::BusyTimeout).
    ///
    /// `None` polls forever, matching the vendor protocol; a stuck busy
    /// line then has to be caught by an external watchdog.
    pub poll_limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            orientation: Orientation::Portrait,
            busy_polarity: BusyPolarity::ActiveHigh,
            poll_delay_us: 10_000,
            poll_limit: None,
        }
    }
}

impl Config {
    /// Configuration for the native portrait orientation
    pub fn portrait() -> Self {
        Config::default()
    }

    /// Configuration for the rotated landscape orientation
    pub fn landscape() -> Self {
        Config {
            orientation: Orientation::Landscape,
            ..Config::default()
        }
    }

    /// Sets the busy line polarity
    pub fn busy_polarity(mut self, polarity: BusyPolarity) -> Self {
        self.busy_polarity = polarity;
        self
    }

    /// Sets the sleep time between busy polls in us
    pub fn poll_delay_us(mut self, delay_us: u32) -> Self {
        self.poll_delay_us = delay_us;
        self
    }

    /// Bounds the busy-wait loop to at most `polls` reads
    pub fn poll_limit(mut self, polls: u32) -> Self {
        self.poll_limit = Some(polls);
        self
    }
}
