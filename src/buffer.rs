//! Owned, packed 1-bit-per-pixel channel buffer
//!
//! The driver holds one [`PixelBuffer`] per channel. Drawing code mutates it
//! through [`fill`](PixelBuffer::fill), [`set_pixel`](PixelBuffer::set_pixel)
//! or a length-checked bulk [`overwrite`](PixelBuffer::overwrite); the
//! transfer path only ever sees the read-only [`bytes`](PixelBuffer::bytes)
//! view. Pixels are packed most-significant-bit first, row major (HLSB),
//! which is also the order the controller consumes them in.

use bit_field::BitField;

use crate::buffer_len;
use crate::color::Color;
use crate::config::Orientation;
use crate::epd::{HEIGHT, WIDTH};

// Landscape rows pad 212 pixels up to 27 bytes, making it the larger of the
// two plane sizes. The backing storage always holds the larger one; the live
// region is cut to the configured geometry.
const MAX_PLANE_LEN: usize = buffer_len(HEIGHT as usize, WIDTH as usize);

/// Error found during bulk writes into a [`PixelBuffer`]
#[derive(Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The provided data does not match the channel buffer length exactly
    LengthMismatch {
        /// Length the configured geometry requires
        expected: usize,
        /// Length of the data that was provided
        provided: usize,
    },
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthMismatch { expected, provided } => write!(
                f,
                "buffer length mismatch: expected {expected} bytes, got {provided}"
            ),
        }
    }
}

impl core::error::Error for BufferError {}

/// A packed 1-bit-per-pixel bitmap for one panel channel
pub struct PixelBuffer {
    bytes: [u8; MAX_PLANE_LEN],
    orientation: Orientation,
}

impl PixelBuffer {
    /// Creates a blank (all white) buffer for the given orientation
    pub(crate) fn new(orientation: Orientation) -> Self {
        PixelBuffer {
            bytes: [Color::Blank.get_byte_value(); MAX_PLANE_LEN],
            orientation,
        }
    }

    /// Width of the buffer in pixels
    pub fn width(&self) -> u32 {
        self.orientation.width()
    }

    /// Height of the buffer in pixels
    pub fn height(&self) -> u32 {
        self.orientation.height()
    }

    /// Length of the packed buffer in bytes, `bytes_per_row * height`
    pub fn len(&self) -> usize {
        self.orientation.buffer_len()
    }

    /// Always false, the buffer holds a full frame
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read-only view of the packed bytes, ready for transfer
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Sets every pixel of the channel to `color`
    pub fn fill(&mut self, color: Color) {
        let len = self.len();
        self.bytes[..len].fill(color.get_byte_value());
    }

    /// Sets a single pixel. Out of range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let index = y as usize * self.orientation.bytes_per_row() + x as usize / 8;
        // HLSB: leftmost pixel sits in the most significant bit
        let bit = 7 - (x as usize % 8);
        self.bytes[index].set_bit(bit, color == Color::Blank);
    }

    /// Reads a single pixel back, `None` if out of range
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let index = y as usize * self.orientation.bytes_per_row() + x as usize / 8;
        let bit = 7 - (x as usize % 8);
        if self.bytes[index].get_bit(bit) {
            Some(Color::Blank)
        } else {
            Some(Color::Colored)
        }
    }

    /// Replaces the whole channel content with already packed data.
    ///
    /// `data` must be exactly [`len`](PixelBuffer::len) bytes; anything else
    /// is rejected instead of being truncated or padded.
    pub fn overwrite(&mut self, data: &[u8]) -> Result<(), BufferError> {
        let expected = self.len();
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                provided: data.len(),
            });
        }
        self.bytes[..expected].copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_len() {
        let buffer = PixelBuffer::new(Orientation::Portrait);
        assert_eq!(buffer.len(), 2756);
        assert_eq!(buffer.bytes().len(), 2756);
    }

    #[test]
    fn landscape_len() {
        let buffer = PixelBuffer::new(Orientation::Landscape);
        assert_eq!(buffer.len(), 27 * 104);
        assert_eq!(buffer.bytes().len(), 2808);
    }

    #[test]
    fn starts_blank() {
        let buffer = PixelBuffer::new(Orientation::Portrait);
        assert!(buffer.bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn fill_colored() {
        let mut buffer = PixelBuffer::new(Orientation::Portrait);
        buffer.fill(Color::Colored);
        assert!(buffer.bytes().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn set_pixel_msb_first() {
        let mut buffer = PixelBuffer::new(Orientation::Portrait);

        // leftmost pixel of the first row clears the MSB
        buffer.set_pixel(0, 0, Color::Colored);
        assert_eq!(buffer.bytes()[0], 0x7F);

        // pixel 7 clears the LSB of the same byte
        buffer.set_pixel(7, 0, Color::Colored);
        assert_eq!(buffer.bytes()[0], 0x7E);

        // pixel 8 starts the next byte
        buffer.set_pixel(8, 0, Color::Colored);
        assert_eq!(buffer.bytes()[1], 0x7F);

        // setting back to blank restores the bit
        buffer.set_pixel(0, 0, Color::Blank);
        assert_eq!(buffer.bytes()[0], 0xFE);
    }

    #[test]
    fn set_pixel_row_stride() {
        let mut buffer = PixelBuffer::new(Orientation::Portrait);
        buffer.set_pixel(0, 1, Color::Colored);
        assert_eq!(buffer.bytes()[13], 0x7F);
        assert_eq!(buffer.bytes()[0], 0xFF);
    }

    #[test]
    fn set_pixel_out_of_range_is_ignored() {
        let mut buffer = PixelBuffer::new(Orientation::Portrait);
        buffer.set_pixel(104, 0, Color::Colored);
        buffer.set_pixel(0, 212, Color::Colored);
        assert!(buffer.bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn get_pixel_round_trip() {
        let mut buffer = PixelBuffer::new(Orientation::Landscape);
        assert_eq!(buffer.get_pixel(211, 103), Some(Color::Blank));
        buffer.set_pixel(211, 103, Color::Colored);
        assert_eq!(buffer.get_pixel(211, 103), Some(Color::Colored));
        assert_eq!(buffer.get_pixel(212, 0), None);
        assert_eq!(buffer.get_pixel(0, 104), None);
    }

    #[test]
    fn overwrite_checks_length() {
        let mut buffer = PixelBuffer::new(Orientation::Portrait);
        assert_eq!(
            buffer.overwrite(&[0u8; 100]),
            Err(BufferError::LengthMismatch {
                expected: 2756,
                provided: 100,
            })
        );

        let data = [0xAAu8; 2756];
        assert_eq!(buffer.overwrite(&data), Ok(()));
        assert!(buffer.bytes().iter().all(|&b| b == 0xAA));
    }
}
