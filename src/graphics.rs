//! Frame buffer and rotation handling
//!
//! The buffer is always laid out in the native orientation of the panel: row-major,
//! 8 pixels per byte, most significant bit first, bit set for white. Drawing happens in
//! logical coordinates which are mapped according to the [`DisplayRotation`].

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::color::Color;
use crate::panels::buffer_len;

/// Displayrotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Single pixel drawing capability.
///
/// Shape rasterization (lines, text, images) lives elsewhere and only ever calls
/// [`PixelPlane::set_pixel`]; `embedded-graphics` reaches it through `DrawTarget`.
pub trait PixelPlane {
    /// Logical width after rotation
    fn width(&self) -> u16;

    /// Logical height after rotation
    fn height(&self) -> u16;

    /// Set one logical pixel, coordinates outside the plane are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// Packed 1 bit per pixel image of the whole panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
    width: u16,
    height: u16,
    rotation: DisplayRotation,
}

impl FrameBuffer {
    /// Allocate a white buffer for a panel of `width` x `height` native pixels
    pub fn new(width: u16, height: u16) -> Self {
        FrameBuffer {
            buffer: vec![
                Color::White.get_byte_value();
                buffer_len(width as usize, height as usize)
            ],
            width,
            height,
            rotation: DisplayRotation::default(),
        }
    }

    /// Returns the buffer
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Native width of the panel
    pub fn native_width(&self) -> u16 {
        self.width
    }

    /// Native height of the panel
    pub fn native_height(&self) -> u16 {
        self.height
    }

    /// Sets the rotation of the display
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get the current rotation of the display
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        self.buffer.fill(color.get_byte_value());
    }

    /// Read back a logical pixel, `None` outside the plane
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (index, bit) = self.position(x, y)?;
        Some(if self.buffer[index] & bit != 0 {
            Color::White
        } else {
            Color::Black
        })
    }

    /// Byte index and bit mask of a logical pixel, `None` outside the plane
    pub fn position(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let width = u32::from(self.width);
        let height = u32::from(self.height);
        if outside_display(x, y, width, height, self.rotation) {
            return None;
        }
        let (index, bit) = find_position(x as u32, y as u32, width, height, self.rotation);
        Some((index as usize, bit))
    }
}

impl PixelPlane for FrameBuffer {
    fn width(&self) -> u16 {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => self.width,
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => self.height,
        }
    }

    fn height(&self) -> u16 {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => self.height,
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => self.width,
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, bit)) = self.position(x, y) else {
            return;
        };
        match color {
            Color::White => self.buffer[index] |= bit,
            Color::Black => self.buffer[index] &= !bit,
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(
            u32::from(PixelPlane::width(self)),
            u32::from(PixelPlane::height(self)),
        )
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

// Checks if a pos is outside the defined display
fn outside_display(x: i32, y: i32, width: u32, height: u32, rotation: DisplayRotation) -> bool {
    if x < 0 || y < 0 {
        return true;
    }
    let (x, y) = (x as u32, y as u32);
    match rotation {
        DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => x >= width || y >= height,
        DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => y >= width || x >= height,
    }
}

fn find_rotation(x: u32, y: u32, width: u32, height: u32, rotation: DisplayRotation) -> (u32, u32) {
    match rotation {
        DisplayRotation::Rotate0 => (x, y),
        DisplayRotation::Rotate90 => (width - 1 - y, x),
        DisplayRotation::Rotate180 => (width - 1 - x, height - 1 - y),
        DisplayRotation::Rotate270 => (y, height - 1 - x),
    }
}

#[rustfmt::skip]
//returns index position in the u8-slice and the bit-position inside that u8
fn find_position(x: u32, y: u32, width: u32, height: u32, rotation: DisplayRotation) -> (u32, u8) {
    let (nx, ny) = find_rotation(x, y, width, height, rotation);
    (
        nx / 8 + width.div_ceil(8) * ny,
        0x80 >> (nx % 8)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
    use std::collections::HashSet;

    const ROTATIONS: [DisplayRotation; 4] = [
        DisplayRotation::Rotate0,
        DisplayRotation::Rotate90,
        DisplayRotation::Rotate180,
        DisplayRotation::Rotate270,
    ];

    #[test]
    fn new_buffer_is_white() {
        let fb = FrameBuffer::new(80, 128);
        assert_eq!(fb.buffer().len(), 1280);
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn buffer_len_rounds_up_partial_bytes() {
        let fb = FrameBuffer::new(13, 3);
        assert_eq!(fb.buffer().len(), 6);
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.fill(Color::Black);
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
        assert_eq!(fb.pixel(79, 127), Some(Color::Black));

        fb.fill(Color::White);
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
        assert_eq!(fb.pixel(0, 0), Some(Color::White));
    }

    #[test]
    fn msb_first_bits() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.set_pixel(0, 0, Color::Black);
        assert_eq!(fb.buffer()[0], 0x7F);
        fb.set_pixel(7, 0, Color::Black);
        assert_eq!(fb.buffer()[0], 0x7E);
        fb.set_pixel(8, 1, Color::Black);
        assert_eq!(fb.buffer()[11], 0x7F);
        fb.set_pixel(0, 0, Color::White);
        assert_eq!(fb.buffer()[0], 0xFE);
    }

    #[test]
    fn last_pixel_hits_last_byte() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.set_pixel(79, 127, Color::Black);
        assert_eq!(fb.buffer()[1279], 0xFE);
    }

    #[test]
    fn rotation_90_maps_origin_to_top_right() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.set_rotation(DisplayRotation::Rotate90);
        assert_eq!((fb.width(), fb.height()), (128, 80));

        fb.set_pixel(0, 0, Color::Black);
        assert_eq!(fb.position(0, 0), Some((9, 0x01)));
        assert_eq!(fb.buffer()[9], 0xFE);
        assert_eq!(fb.pixel(0, 0), Some(Color::Black));
    }

    #[test]
    fn rotation_corners() {
        let fb = |rotation| {
            let mut fb = FrameBuffer::new(80, 128);
            fb.set_rotation(rotation);
            fb
        };
        // native (0, 127): last row, first byte
        assert_eq!(fb(DisplayRotation::Rotate270).position(0, 0), Some((1270, 0x80)));
        // native (79, 127)
        assert_eq!(fb(DisplayRotation::Rotate180).position(0, 0), Some((1279, 0x01)));
        // native (0, 0)
        assert_eq!(fb(DisplayRotation::Rotate180).position(79, 127), Some((0, 0x80)));
    }

    #[test]
    fn mapping_is_a_bijection() {
        for rotation in ROTATIONS {
            let mut fb = FrameBuffer::new(80, 128);
            fb.set_rotation(rotation);
            let mut seen = HashSet::new();
            for y in 0..i32::from(fb.height()) {
                for x in 0..i32::from(fb.width()) {
                    let (index, bit) = fb.position(x, y).unwrap();
                    assert!(index < fb.buffer().len());
                    assert!(seen.insert((index, bit)), "{rotation:?} ({x}, {y}) collides");
                }
            }
            assert_eq!(seen.len(), 80 * 128);
        }
    }

    #[test]
    fn out_of_range_is_ignored() {
        for rotation in ROTATIONS {
            let mut fb = FrameBuffer::new(80, 128);
            fb.set_rotation(rotation);
            let (w, h) = (i32::from(fb.width()), i32::from(fb.height()));
            for (x, y) in [(-1, 0), (0, -1), (w, 0), (0, h), (w, h), (i32::MIN, i32::MAX)] {
                fb.set_pixel(x, y, Color::Black);
                assert_eq!(fb.pixel(x, y), None);
            }
            assert!(fb.buffer().iter().all(|&b| b == 0xFF), "{rotation:?}");
        }
    }

    #[test]
    fn draw_line_with_embedded_graphics() {
        let mut fb = FrameBuffer::new(80, 128);
        Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 1))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.buffer()[0], 0x00);
        assert!(fb.buffer().iter().skip(1).all(|&b| b == 0xFF));
    }

    #[test]
    fn draw_clipped_rectangle_rotated() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.set_rotation(DisplayRotation::Rotate270);
        assert_eq!(fb.size(), Size::new(128, 80));

        // half of it lies outside the plane
        Rectangle::new(Point::new(120, 72), Size::new(16, 16))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut fb)
            .unwrap();

        let black = fb.buffer().iter().map(|b| b.count_zeros()).sum::<u32>();
        assert_eq!(black, 8 * 8);
    }

    #[test]
    fn draw_target_clear_fills() {
        let mut fb = FrameBuffer::new(80, 128);
        fb.clear(BinaryColor::Off).unwrap();
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
    }
}
