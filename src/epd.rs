//! Driver for the Waveshare 2.13" (B) E-Ink display
//!
//! The controller keeps its real state machine on-chip; apart from the
//! ready/sleeping distinction the driver is a replayer of fixed command
//! sequences, synchronised against the panel's busy line. Getting the
//! ordering or the busy-waits wrong corrupts the image or hangs the module,
//! so every sequence here follows the vendor protocol byte for byte.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::buffer::PixelBuffer;
use crate::color::TriColor;
use crate::command::Command;
use crate::config::{Config, Orientation};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Width of the native (portrait) panel in pixels
pub const WIDTH: u32 = 104;
/// Height of the native (portrait) panel in pixels
pub const HEIGHT: u32 = 212;

// Panel setting payload from the vendor sample for this module
const PANEL_SETTING_DATA: [u8; 2] = [0x0F, 0x89];
// Data entry mode used by the rotated variant
const LANDSCAPE_DATA_ENTRY_MODE: u8 = 0x07;
// The controller only honours a deep sleep request carrying this byte
const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

const VCOM_DATA_INTERVAL: u8 = 0x07;
const WHITE_BORDER: u8 = 0x70;
const BLACK_BORDER: u8 = 0x30;
const CHROMATIC_BORDER: u8 = 0xB0;
const FLOATING_BORDER: u8 = 0xF0;

// Reset pulse and settle times, the controller needs the full durations
const RESET_SETTLE_MS: u32 = 50;
const RESET_PULSE_MS: u32 = 2;
// The busy line is only guaranteed asserted some time after the refresh
// command, so the wait starts after this delay
const REFRESH_KICKOFF_DELAY_MS: u32 = 100;
// Power rail settle time before pulling reset low on the way into deep sleep
const SLEEP_SETTLE_MS: u32 = 2000;

/// Lifecycle state of the driver.
///
/// Everything else lives on-chip; this only exists to refuse commands the
/// unpowered or uninitialised controller would ignore or mangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DriverState {
    /// Hardware reset has run (or nothing has) but the init sequence has not
    Uninitialized,
    /// Reset + init done, the panel accepts data and refresh commands
    Ready,
    /// Deep sleep entered; only a reset + init (wake_up) is valid now
    Sleeping,
}

/// Epd2in13b driver
///
/// Owns one [`PixelBuffer`] per channel. Drawing mutates the buffers,
/// [`display`](Epd2in13b::display) pushes both of them to the panel and
/// triggers a full refresh.
pub struct Epd2in13b<SPI, BUSY, DC, RST> {
    interface: DisplayInterface<SPI, BUSY, DC, RST>,
    orientation: Orientation,
    state: DriverState,
    black: PixelBuffer,
    red: PixelBuffer,
}

impl<SPI, BUSY, DC, RST, PinErr> Epd2in13b<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    /// Creates the driver and brings the panel up.
    ///
    /// This runs the hardware reset and the full init sequence, so the
    /// returned driver is ready for drawing and [`display`](Epd2in13b::display).
    pub fn new<DELAY: DelayNs>(
        spi: &mut SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: &mut DELAY,
        config: Config,
    ) -> Result<Self, Error<SPI::Error, PinErr>> {
        let interface = DisplayInterface::new(
            busy,
            dc,
            rst,
            config.busy_polarity,
            config.poll_delay_us,
            config.poll_limit,
        );

        let mut epd = Epd2in13b {
            interface,
            orientation: config.orientation,
            state: DriverState::Uninitialized,
            black: PixelBuffer::new(config.orientation),
            red: PixelBuffer::new(config.orientation),
        };

        epd.init(spi, delay)?;

        Ok(epd)
    }

    /// Hardware reset: high 50ms, low 2ms, high 50ms.
    ///
    /// Runs unconditionally and leaves the controller waiting for an init
    /// sequence; the driver drops back to [`DriverState::Uninitialized`].
    pub fn reset<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.interface
            .reset(delay, RESET_SETTLE_MS, RESET_PULSE_MS)?;
        self.state = DriverState::Uninitialized;
        Ok(())
    }

    /// Resets the panel and replays the init sequence.
    ///
    /// Valid from any state; this is the only way out of deep sleep.
    pub fn init<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.reset(delay)?;

        // power on, the only init step that engages the busy line
        self.interface.cmd(spi, Command::PowerOn)?;
        self.interface.wait_until_idle(delay)?;

        self.interface
            .cmd_with_data(spi, Command::PanelSetting, &PANEL_SETTING_DATA)?;

        self.send_resolution(spi)?;

        // the sole protocol difference between the two orientations
        if self.orientation == Orientation::Landscape {
            self.interface.cmd_with_data(
                spi,
                Command::DataEntryModeSetting,
                &[LANDSCAPE_DATA_ENTRY_MODE],
            )?;
        }

        self.interface.cmd_with_data(
            spi,
            Command::VcomAndDataIntervalSetting,
            &[WHITE_BORDER | VCOM_DATA_INTERVAL],
        )?;

        self.state = DriverState::Ready;
        Ok(())
    }

    /// Wakes the device up from deep sleep by resetting and reinitialising it
    pub fn wake_up<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.init(spi, delay)
    }

    /// Transfers both channel buffers and triggers a full refresh.
    ///
    /// Blocks until the panel reports idle again.
    pub fn display<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.ensure_ready()?;

        self.interface.cmd(spi, Command::DataStartTransmission1)?;
        self.interface.data(spi, self.black.bytes())?;

        self.interface.cmd(spi, Command::DataStartTransmission2)?;
        self.interface.data(spi, self.red.bytes())?;

        self.turn_on_display(spi, delay)
    }

    /// Black/white-only update: the black buffer is transferred as usual,
    /// the red channel receives an all-blank fill.
    ///
    /// Suppressing the red channel trades color for noticeably less
    /// flashing during the refresh. Only supported in portrait orientation.
    pub fn display_fast_monochrome<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.ensure_ready()?;
        if self.orientation != Orientation::Portrait {
            return Err(Error::UnsupportedOrientation);
        }

        self.interface.cmd(spi, Command::DataStartTransmission1)?;
        self.interface.data(spi, self.black.bytes())?;

        // blank out the red channel without touching the owned buffer
        self.interface.cmd(spi, Command::DataStartTransmission2)?;
        self.interface
            .data_x_times(spi, 0xFF, self.black.len() as u32)?;

        self.turn_on_display(spi, delay)
    }

    /// Pushes a constant fill byte per channel and refreshes.
    ///
    /// The owned buffers are left untouched, only transient fill data goes
    /// out. `0xFF` is blank, `0x00` full ink.
    pub fn clear<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        black_fill: u8,
        red_fill: u8,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.ensure_ready()?;

        let len = self.black.len() as u32;

        self.interface.cmd(spi, Command::DataStartTransmission1)?;
        self.interface.data_x_times(spi, black_fill, len)?;

        self.interface.cmd(spi, Command::DataStartTransmission2)?;
        self.interface.data_x_times(spi, red_fill, len)?;

        self.turn_on_display(spi, delay)
    }

    /// Enters deep sleep, the lowest-power state of the module.
    ///
    /// Afterwards only [`wake_up`](Epd2in13b::wake_up) (or `reset` + `init`)
    /// brings the panel back; everything else is rejected.
    pub fn sleep<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.sleep_with_check_code(spi, delay, DEEP_SLEEP_CHECK_CODE)
    }

    /// Like [`sleep`](Epd2in13b::sleep) with an explicit check code.
    ///
    /// The controller ignores a deep sleep request with any code other than
    /// `0xA5`, so such a request is refused here before any byte goes out.
    pub fn sleep_with_check_code<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        check_code: u8,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        if check_code != DEEP_SLEEP_CHECK_CODE {
            return Err(Error::InvalidCheckCode(check_code));
        }
        self.ensure_ready()?;

        self.interface.cmd_with_data(
            spi,
            Command::VcomAndDataIntervalSetting,
            &[FLOATING_BORDER | VCOM_DATA_INTERVAL],
        )?;

        self.interface.cmd(spi, Command::PowerOff)?;
        self.interface.wait_until_idle(delay)?;

        self.interface
            .cmd_with_data(spi, Command::DeepSleep, &[check_code])?;

        // let the power rails settle before the module exit
        delay.delay_ms(SLEEP_SETTLE_MS);
        self.interface.module_exit()?;

        self.state = DriverState::Sleeping;
        Ok(())
    }

    /// Set the outer border of the display to the chosen color
    pub fn set_border_color(
        &mut self,
        spi: &mut SPI,
        color: TriColor,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.ensure_ready()?;
        let border = match color {
            TriColor::Black => BLACK_BORDER,
            TriColor::White => WHITE_BORDER,
            TriColor::Chromatic => CHROMATIC_BORDER,
        };
        self.interface.cmd_with_data(
            spi,
            Command::VcomAndDataIntervalSetting,
            &[border | VCOM_DATA_INTERVAL],
        )
    }

    /// Checks if the panel is still busy
    pub fn is_busy(&mut self) -> Result<bool, Error<SPI::Error, PinErr>> {
        self.interface.is_busy()
    }

    /// Triggers the refresh cycle and waits for it to finish
    fn turn_on_display<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.interface.cmd(spi, Command::DisplayRefresh)?;
        delay.delay_ms(REFRESH_KICKOFF_DELAY_MS);
        self.interface.wait_until_idle(delay)
    }

    /// Resolution payload is the native panel geometry in both orientations
    fn send_resolution(&mut self, spi: &mut SPI) -> Result<(), Error<SPI::Error, PinErr>> {
        self.interface.cmd_with_data(
            spi,
            Command::ResolutionSetting,
            &[WIDTH as u8, (HEIGHT >> 8) as u8, HEIGHT as u8],
        )
    }

    fn ensure_ready(&self) -> Result<(), Error<SPI::Error, PinErr>> {
        match self.state {
            DriverState::Ready => Ok(()),
            DriverState::Sleeping => Err(Error::Asleep),
            DriverState::Uninitialized => Err(Error::Uninitialized),
        }
    }
}

/// Buffer access and drawing, no bus involved
impl<SPI, BUSY, DC, RST> Epd2in13b<SPI, BUSY, DC, RST> {
    /// Get the width of the display in the configured orientation
    pub fn width(&self) -> u32 {
        self.orientation.width()
    }

    /// Get the height of the display in the configured orientation
    pub fn height(&self) -> u32 {
        self.orientation.height()
    }

    /// The configured orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Read-only access to the black channel buffer
    pub fn black_buffer(&self) -> &PixelBuffer {
        &self.black
    }

    /// Mutable access to the black channel buffer
    pub fn black_buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.black
    }

    /// Read-only access to the red channel buffer
    pub fn red_buffer(&self) -> &PixelBuffer {
        &self.red
    }

    /// Mutable access to the red channel buffer
    pub fn red_buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.red
    }

    /// Sets one logical pixel across both channels.
    ///
    /// Out of range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: TriColor) {
        self.black.set_pixel(x, y, color.black_channel());
        self.red.set_pixel(x, y, color.red_channel());
    }
}
