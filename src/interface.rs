use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::command::Command;
use crate::config::BusyPolarity;
use crate::error::Error;

/// The hardware connection to the panel: SPI plus BUSY/DC/RST lines.
///
/// The [`SpiDevice`] contract guarantees that every `write` is a single bus
/// transaction with chip-select asserted around exactly that transfer, which
/// is what the controller requires for its command/data framing.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// Busy status line, polarity is configurable
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    busy_polarity: BusyPolarity,
    /// number of us the idle loop should sleep on
    poll_delay_us: u32,
    /// maximum number of busy polls before giving up, `None` polls forever
    poll_limit: Option<u32>,
}

impl<SPI, BUSY, DC, RST, PinErr> DisplayInterface<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    pub(crate) fn new(
        busy: BUSY,
        dc: DC,
        rst: RST,
        busy_polarity: BusyPolarity,
        poll_delay_us: u32,
        poll_limit: Option<u32>,
    ) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            busy,
            dc,
            rst,
            busy_polarity,
            poll_delay_us,
            poll_limit,
        }
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd(
        &mut self,
        spi: &mut SPI,
        command: Command,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        // low for commands
        self.dc.set_low().map_err(Error::Pin)?;

        // Transfer the command over spi
        self.write(spi, &[command.address()])
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(
        &mut self,
        spi: &mut SPI,
        data: &[u8],
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        // high for data
        self.dc.set_high().map_err(Error::Pin)?;

        self.write(spi, data)
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data(
        &mut self,
        spi: &mut SPI,
        command: Command,
        data: &[u8],
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: u32,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        // high for data
        self.dc.set_high().map_err(Error::Pin)?;
        // Transfer data (u8) over spi
        for _ in 0..repetitions {
            self.write(spi, &[val])?;
        }
        Ok(())
    }

    // spi write helper/abstraction function
    fn write(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), Error<SPI::Error, PinErr>> {
        // transfer spi data
        // Be careful!! Linux has a default limit of 4096 bytes per spi transfer
        // see https://raspberrypi.stackexchange.com/questions/65595/spi-transfer-fails-with-buffer-size-greater-than-4096
        if cfg!(target_os = "linux") {
            for data_chunk in data.chunks(4096) {
                spi.write(data_chunk).map_err(Error::Spi)?;
            }
            Ok(())
        } else {
            spi.write(data).map_err(Error::Spi)
        }
    }

    /// Waits until the busy line reports idle.
    ///
    /// Polls every `poll_delay_us`; with a poll limit configured a stuck
    /// line surfaces as [`Error::BusyTimeout`] instead of hanging forever.
    pub(crate) fn wait_until_idle<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        let mut polls: u32 = 0;
        while self.is_busy()? {
            polls += 1;
            if let Some(limit) = self.poll_limit {
                if polls >= limit {
                    return Err(Error::BusyTimeout);
                }
            }
            delay.delay_us(self.poll_delay_us);
        }
        Ok(())
    }

    /// Checks if the device is still busy
    pub(crate) fn is_busy(&mut self) -> Result<bool, Error<SPI::Error, PinErr>> {
        match self.busy_polarity {
            BusyPolarity::ActiveHigh => self.busy.is_high().map_err(Error::Pin),
            BusyPolarity::ActiveLow => self.busy.is_low().map_err(Error::Pin),
        }
    }

    /// Resets the device.
    ///
    /// The controller needs a minimum low pulse width and settle time on
    /// either side; the timings come in from the caller and must not be
    /// shortened.
    pub(crate) fn reset<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
        settle_ms: u32,
        pulse_ms: u32,
    ) -> Result<(), Error<SPI::Error, PinErr>> {
        self.rst.set_high().map_err(Error::Pin)?;
        delay.delay_ms(settle_ms);

        self.rst.set_low().map_err(Error::Pin)?;
        delay.delay_ms(pulse_ms);

        self.rst.set_high().map_err(Error::Pin)?;
        delay.delay_ms(settle_ms);
        Ok(())
    }

    /// Drives the reset line low, the lowest-power state of the module
    pub(crate) fn module_exit(&mut self) -> Result<(), Error<SPI::Error, PinErr>> {
        self.rst.set_low().map_err(Error::Pin)
    }
}
