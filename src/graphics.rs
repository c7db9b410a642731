//! embedded-graphics support
//!
//! Two draw targets are provided: the driver itself takes [`TriColor`] and
//! fans each pixel out into both channel buffers, a single [`PixelBuffer`]
//! takes [`BinaryColor`] for callers that want to compose a channel on its
//! own. Neither target can fail; out of range pixels are dropped.

use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::prelude::*;

use crate::buffer::PixelBuffer;
use crate::color::{Color, TriColor};
use crate::epd::Epd2in13b;

impl<SPI, BUSY, DC, RST> DrawTarget for Epd2in13b<SPI, BUSY, DC, RST> {
    type Color = TriColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }
}

impl<SPI, BUSY, DC, RST> OriginDimensions for Epd2in13b<SPI, BUSY, DC, RST> {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl DrawTarget for PixelBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, Color::from(color));
            }
        }
        Ok(())
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
