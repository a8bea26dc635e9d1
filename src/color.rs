//! B/W Color for EPDs

use embedded_graphics::pixelcolor::BinaryColor;

/// Only for the Black/White-Displays
///
/// `BinaryColor::On` maps to white (bit set), `BinaryColor::Off` to black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    /// Black color, bit cleared
    Black,
    /// White color, bit set
    #[default]
    White,
}

/// Drawing color for black pixels with `embedded-graphics`
#[allow(non_upper_case_globals)]
pub const Black: BinaryColor = BinaryColor::Off;
/// Drawing color for white pixels with `embedded-graphics`
#[allow(non_upper_case_globals)]
pub const White: BinaryColor = BinaryColor::On;

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(self) -> u8 {
        match self {
            Color::White => 1u8,
            Color::Black => 0u8,
        }
    }

    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }

    /// Returns the inverse of the given color.
    ///
    /// Black returns White and White returns Black
    pub fn inverse(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::White,
            BinaryColor::Off => Color::Black,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(c: Color) -> BinaryColor {
        match c {
            Color::White => BinaryColor::On,
            Color::Black => BinaryColor::Off,
        }
    }
}
