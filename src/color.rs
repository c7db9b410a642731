//! Color types for the two-channel (black/red) panel

/// State of a single pixel inside one 1-bit channel.
///
/// The controller treats a cleared bit as "ink here" and a set bit as blank,
/// so [`Color::Colored`] encodes to `0` and [`Color::Blank`] to `1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// The pixel is active in this channel (black on the black channel, red
    /// on the red channel)
    Colored,
    /// The pixel is blank in this channel
    Blank,
}

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(self) -> u8 {
        match self {
            Color::Colored => 0u8,
            Color::Blank => 1u8,
        }
    }

    /// Gets a full byte of eight colored or eight blank pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::Colored => 0x00,
            Color::Blank => 0xff,
        }
    }

    /// Returns the inverse of the color
    pub fn inverse(self) -> Color {
        match self {
            Color::Colored => Color::Blank,
            Color::Blank => Color::Colored,
        }
    }
}

/// Logical color of a pixel spanning both channels.
///
/// The panel renders a red pixel wherever the red channel is active,
/// regardless of the black channel, so [`TriColor::Chromatic`] leaves the
/// black channel blank.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TriColor {
    /// Both channels blank
    White,
    /// Black channel active
    Black,
    /// Red channel active; red overrides black on the panel
    Chromatic,
}

impl TriColor {
    /// The state this color gives the black channel
    pub fn black_channel(self) -> Color {
        match self {
            TriColor::Black => Color::Colored,
            TriColor::White | TriColor::Chromatic => Color::Blank,
        }
    }

    /// The state this color gives the red channel
    pub fn red_channel(self) -> Color {
        match self {
            TriColor::Chromatic => Color::Colored,
            TriColor::White | TriColor::Black => Color::Blank,
        }
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::pixelcolor::PixelColor for TriColor {
    type Raw = ();
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(value: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        use embedded_graphics_core::pixelcolor::BinaryColor;
        match value {
            BinaryColor::On => Color::Colored,
            BinaryColor::Off => Color::Blank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values() {
        assert_eq!(Color::Colored.get_bit_value(), 0u8);
        assert_eq!(Color::Blank.get_bit_value(), 1u8);
    }

    #[test]
    fn byte_values() {
        assert_eq!(Color::Colored.get_byte_value(), 0x00);
        assert_eq!(Color::Blank.get_byte_value(), 0xff);
    }

    #[test]
    fn inverse() {
        assert_eq!(Color::Colored.inverse(), Color::Blank);
        assert_eq!(Color::Blank.inverse(), Color::Colored);
    }

    #[test]
    fn tricolor_channels() {
        assert_eq!(TriColor::White.black_channel(), Color::Blank);
        assert_eq!(TriColor::White.red_channel(), Color::Blank);

        assert_eq!(TriColor::Black.black_channel(), Color::Colored);
        assert_eq!(TriColor::Black.red_channel(), Color::Blank);

        // red wins on the panel, the black channel stays blank
        assert_eq!(TriColor::Chromatic.black_channel(), Color::Blank);
        assert_eq!(TriColor::Chromatic.red_channel(), Color::Colored);
    }
}
