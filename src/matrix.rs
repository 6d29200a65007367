//! High-level LED matrix driver
//!
//! [`LedMatrix`] ties the pieces together: it owns the [`Display`], the
//! [`GlyphStore`] and the display state ([`Config`]) that every render call
//! reads. All operations take `&mut self`, so one matrix can never run two
//! renders at once; to stop a scroll from another thread, cancel its
//! [`CancelToken`] and wait for the call to return before starting the next.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sense_hat_led::{
//!     Builder, DeviceLocator, Display, FontFile, GlyphStore, LedMatrix, NamedColor, StdDelay,
//! };
//!
//! let display = Display::from_located(DeviceLocator::default().locate());
//! let glyphs = GlyphStore::new(FontFile::default());
//! let config = match Builder::new().foreground(NamedColor::Yellow.into()).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut matrix = LedMatrix::new(display, glyphs, config);
//! let _ = matrix.show_letter("A");
//! let _ = matrix.scroll_message("Hello!", &mut StdDelay);
//! ```

use embedded_hal::delay::DelayNs;

use crate::buffer::PixelBuffer;
use crate::color::PackedColor;
use crate::config::{Config, MAX_FRAME_PERIOD_MS, Rotation};
use crate::display::Display;
use crate::error::Error;
use crate::font::FontSource;
use crate::glyph::{Glyph, GlyphStore};
use crate::interface::DisplayInterface;
use crate::rotation::{CELLS, SIZE, glyph_offset, pixel_offset};
use crate::scroll::{CancelToken, ScrollAnimator, ScrollState};

type MatrixResult<I, F, T = ()> = core::result::Result<
    T,
    Error<<I as DisplayInterface>::Error, <F as FontSource>::Error>,
>;

/// Paint `glyph` as a static letter
///
/// Cells that [`glyph_offset`] maps outside the glyph, or onto an unlit glyph
/// cell, get `background`.
pub fn letter_frame(
    glyph: &Glyph,
    rotation: Rotation,
    foreground: PackedColor,
    background: PackedColor,
) -> PixelBuffer {
    let mut frame = PixelBuffer::filled(background);
    for scan in 0..CELLS {
        if glyph_offset(scan, rotation).is_some_and(|cell| glyph.is_lit(cell)) {
            frame.set_linear(scan, foreground);
        }
    }
    frame
}

/// Sense HAT LED matrix with its display state
#[derive(Debug)]
pub struct LedMatrix<I, F> {
    display: Display<I>,
    glyphs: GlyphStore<F>,
    config: Config,
}

impl<I, F> LedMatrix<I, F>
where
    I: DisplayInterface,
    F: FontSource,
{
    /// Create a matrix from its device, font and initial state
    pub fn new(display: Display<I>, glyphs: GlyphStore<F>, config: Config) -> Self {
        Self {
            display,
            glyphs,
            config,
        }
    }

    /// Current display state
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutably borrow the display
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Set the color used for lit glyph pixels
    pub fn set_foreground(&mut self, color: PackedColor) {
        self.config.foreground = color;
    }

    /// Set the background color and paint the whole matrix with it
    pub fn set_background(&mut self, color: PackedColor) -> MatrixResult<I, F> {
        self.config.background = color;
        self.fill(color)
    }

    /// Set the rotation used by rotated pixels, letters and scrolling
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.config.rotation = rotation;
    }

    /// Set the pause between scroll frames
    ///
    /// Periods above [`MAX_FRAME_PERIOD_MS`] are clamped to it.
    pub fn set_frame_period_ms(&mut self, ms: u32) {
        if ms > MAX_FRAME_PERIOD_MS {
            log::debug!("clamping frame period {ms}ms to {MAX_FRAME_PERIOD_MS}ms");
        }
        self.config.frame_period_ms = ms.min(MAX_FRAME_PERIOD_MS);
    }

    /// Set one LED in the board's native orientation
    ///
    /// Coordinates outside `0..8` are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: PackedColor) -> MatrixResult<I, F> {
        if x >= SIZE || y >= SIZE {
            log::debug!("ignoring pixel ({x}, {y}) outside the matrix");
            return Ok(());
        }
        self.write_cell(pixel_offset(x, y, Rotation::Rotate0), color)
    }

    /// Set one LED, applying the configured rotation
    ///
    /// Coordinates outside `0..8` are ignored.
    pub fn set_pixel_rotated(
        &mut self,
        x: usize,
        y: usize,
        color: PackedColor,
    ) -> MatrixResult<I, F> {
        if x >= SIZE || y >= SIZE {
            log::debug!("ignoring pixel ({x}, {y}) outside the matrix");
            return Ok(());
        }
        self.write_cell(pixel_offset(x, y, self.config.rotation), color)
    }

    /// Paint every LED with `color`
    pub fn fill(&mut self, color: PackedColor) -> MatrixResult<I, F> {
        self.show_frame(&PixelBuffer::filled(color))
    }

    /// Paint every LED with the foreground color
    pub fn fill_foreground(&mut self) -> MatrixResult<I, F> {
        self.fill(self.config.foreground)
    }

    /// Turn every LED off
    pub fn clear(&mut self) -> MatrixResult<I, F> {
        self.fill(PackedColor::OFF)
    }

    /// Flush a prepared frame as is
    pub fn show_frame(&mut self, frame: &PixelBuffer) -> MatrixResult<I, F> {
        self.display.flush(frame).map_err(Error::Device)
    }

    /// Show a single character using the configured state
    ///
    /// Does nothing unless `letter` is exactly one character.
    pub fn show_letter(&mut self, letter: &str) -> MatrixResult<I, F> {
        let Config {
            rotation,
            foreground,
            background,
            ..
        } = self.config;
        self.show_letter_with(letter, rotation, foreground, background)
    }

    /// Show a single character with explicit rotation and colors
    ///
    /// Does nothing unless `letter` is exactly one character.
    pub fn show_letter_with(
        &mut self,
        letter: &str,
        rotation: Rotation,
        foreground: PackedColor,
        background: PackedColor,
    ) -> MatrixResult<I, F> {
        let mut chars = letter.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            log::debug!("ignoring letter {letter:?}: expected exactly one character");
            return Ok(());
        };
        let glyph = self.glyphs.lookup(ch).map_err(Error::Font)?;
        self.show_frame(&letter_frame(&glyph, rotation, foreground, background))
    }

    /// Scroll `message` across the matrix using the configured state
    ///
    /// Blocks until the message has left the matrix.
    pub fn scroll_message<D: DelayNs>(
        &mut self,
        message: &str,
        delay: &mut D,
    ) -> MatrixResult<I, F, ScrollState> {
        let Config {
            rotation,
            foreground,
            background,
            ..
        } = self.config;
        self.scroll_message_with(message, rotation, foreground, background, delay, None)
    }

    /// Scroll `message` with explicit rotation and colors
    ///
    /// Blocks until the message has left the matrix or `cancel` is triggered,
    /// pausing for the configured frame period after every frame.
    pub fn scroll_message_with<D: DelayNs>(
        &mut self,
        message: &str,
        rotation: Rotation,
        foreground: PackedColor,
        background: PackedColor,
        delay: &mut D,
        cancel: Option<&CancelToken>,
    ) -> MatrixResult<I, F, ScrollState> {
        let frame_period_ms = self.config.frame_period_ms.min(MAX_FRAME_PERIOD_MS);
        let mut animator = ScrollAnimator::new(message, rotation, foreground, background);
        animator.run(
            &mut self.glyphs,
            &mut self.display,
            delay,
            frame_period_ms,
            cancel,
        )
    }

    fn write_cell(&mut self, cell: usize, color: PackedColor) -> MatrixResult<I, F> {
        self.display.write_cell(cell, color).map_err(Error::Device)
    }
}
