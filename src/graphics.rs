//! Graphics support via embedded-graphics
//!
//! [`Canvas`] borrows a [`PixelBuffer`] and implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait, so
//! any embedded-graphics primitive can be drawn into a frame. Coordinates are
//! logical and go through [`pixel_offset`] for the canvas rotation. Drawing
//! only touches memory; pass the buffer to
//! [`LedMatrix::show_frame`](crate::LedMatrix::show_frame) to put it on the
//! LEDs.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use sense_hat_led::{Canvas, NamedColor, PixelBuffer, Rotation};
//!
//! let mut frame = PixelBuffer::default();
//! let mut canvas = Canvas::new(&mut frame, Rotation::Rotate0);
//!
//! let _ = Line::new(Point::new(0, 0), Point::new(7, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(NamedColor::Green.packed(), 1))
//!     .draw(&mut canvas);
//!
//! assert_eq!(frame.get(3, 3), Some(NamedColor::Green.packed()));
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::buffer::PixelBuffer;
use crate::color::PackedColor;
use crate::config::Rotation;
use crate::rotation::{SIZE, pixel_offset};

/// Drawing surface over a frame
#[derive(Debug)]
pub struct Canvas<'a> {
    buffer: &'a mut PixelBuffer,
    rotation: Rotation,
}

impl<'a> Canvas<'a> {
    /// Draw into `buffer`, mapping coordinates through `rotation`
    pub fn new(buffer: &'a mut PixelBuffer, rotation: Rotation) -> Self {
        Self { buffer, rotation }
    }

    /// Rotation applied to drawn pixels
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the rotation for subsequent drawing
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Set a single logical pixel
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PackedColor) {
        let (x, y) = (x as usize, y as usize);
        if x >= SIZE || y >= SIZE {
            return;
        }
        self.buffer.set_linear(pixel_offset(x, y, self.rotation), color);
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = PackedColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.set_pixel(x as u32, y as u32, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(SIZE as u32, SIZE as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    const RED: PackedColor = NamedColor::Red.packed();

    #[test]
    fn test_canvas_size() {
        let mut frame = PixelBuffer::default();
        let canvas = Canvas::new(&mut frame, Rotation::Rotate90);
        assert_eq!(canvas.size(), Size::new(8, 8));
    }

    #[test]
    fn test_draw_applies_rotation() {
        let mut frame = PixelBuffer::default();
        let mut canvas = Canvas::new(&mut frame, Rotation::Rotate180);
        Pixel(Point::new(0, 0), RED).draw(&mut canvas).unwrap();
        assert_eq!(frame.get_linear(63), Some(RED));
        assert_eq!(frame.get_linear(0), Some(PackedColor::OFF));
    }

    #[test]
    fn test_pixels_outside_matrix_are_clipped() {
        let mut frame = PixelBuffer::default();
        let mut canvas = Canvas::new(&mut frame, Rotation::Rotate0);
        Rectangle::new(Point::new(-2, -2), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(RED))
            .draw(&mut canvas)
            .unwrap();
        assert!(frame.is_filled_with(RED));
    }

    #[test]
    fn test_rectangle() {
        let mut frame = PixelBuffer::default();
        let mut canvas = Canvas::new(&mut frame, Rotation::Rotate0);
        Rectangle::new(Point::new(2, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(RED))
            .draw(&mut canvas)
            .unwrap();

        let lit = frame.cells().iter().filter(|&&c| c == RED).count();
        assert_eq!(lit, 6);
        assert_eq!(frame.get(2, 1), Some(RED));
        assert_eq!(frame.get(4, 2), Some(RED));
        assert_eq!(frame.get(5, 2), Some(PackedColor::OFF));
    }

    #[test]
    fn test_clear_fills_frame() {
        let mut frame = PixelBuffer::default();
        let mut canvas = Canvas::new(&mut frame, Rotation::Rotate270);
        canvas.clear(NamedColor::Blue.packed()).unwrap();
        assert!(frame.is_filled_with(NamedColor::Blue.packed()));
    }

    #[test]
    fn test_rgb888_colors_convert() {
        use embedded_graphics::pixelcolor::Rgb888;

        let mut frame = PixelBuffer::default();
        let mut canvas = Canvas::new(&mut frame, Rotation::Rotate0);
        let color: PackedColor = Rgb888::new(255, 0, 0).into();
        Pixel(Point::new(1, 0), color).draw(&mut canvas).unwrap();
        assert_eq!(frame.get(1, 0), Some(RED));
    }
}
