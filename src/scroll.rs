//! Scrolling text animation
//!
//! A [`ScrollAnimator`] moves a message across the matrix one glyph line at a
//! time. Each step shifts the frame by one column (or row, at 90° and 270°),
//! fills the vacated edge with the next line of the current glyph and flushes
//! the frame.
//!
//! Every character takes 6 steps: five glyph strips plus one blank line that
//! separates letters. Two blank characters follow the message so the last
//! letter leaves the matrix completely.
//!
//! ## States
//!
//! ```text
//! Idle --start--> Painting --step--> Scrolling --last step--> Done
//!                                        \--cancel--> Cancelled
//! ```
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::{Display, GlyphStore, NamedColor, PackedColor, Rotation};
//! use sense_hat_led::scroll::{ScrollAnimator, ScrollState};
//! # use sense_hat_led::DisplayInterface;
//! # struct Screen;
//! # impl DisplayInterface for Screen {
//! #     type Error = core::convert::Infallible;
//! #     fn write_at(&mut self, _offset: u64, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let font = vec![0u8; 10_378];
//! let mut glyphs = GlyphStore::new(font);
//! let mut display = Display::new(Screen);
//!
//! let mut animator = ScrollAnimator::new(
//!     "Hi",
//!     Rotation::Rotate0,
//!     NamedColor::Green.packed(),
//!     PackedColor::OFF,
//! );
//! assert_eq!(animator.total_steps(), (2 + 2) * 6);
//!
//! let _ = animator.start(&mut display);
//! while animator.state() != ScrollState::Done {
//!     if animator.step(&mut glyphs, &mut display).is_err() {
//!         break;
//!     }
//! }
//! ```

use core::str::Chars;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::buffer::PixelBuffer;
use crate::color::PackedColor;
use crate::config::Rotation;
use crate::display::Display;
use crate::error::Error;
use crate::font::FontSource;
use crate::glyph::{Glyph, GlyphStore};
use crate::interface::DisplayInterface;
use crate::rotation::{SIZE, scroll_edge, scroll_insert_offset};

/// Glyph lines revealed per character
pub const LINES_PER_CHAR: usize = 6;

/// Blank characters appended after the message
pub const TRAILING_BLANKS: usize = 2;

type ScrollResult<I, F> = core::result::Result<
    ScrollState,
    Error<<I as DisplayInterface>::Error, <F as FontSource>::Error>,
>;

/// Where an animation is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    /// Created, nothing drawn yet
    Idle,
    /// Background painted, no glyph line shown yet
    Painting,
    /// Glyph lines are moving across the matrix
    Scrolling,
    /// The message has scrolled off completely
    Done,
    /// Stopped early through a [`CancelToken`]
    Cancelled,
}

impl ScrollState {
    /// Whether the animation has ended
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

/// Cooperative stop request for a running animation
///
/// Checked between frames. Share it with another thread through an `Arc` or
/// a `static` to stop a long message early.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// A token that has not been cancelled
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Ask the animation to stop before its next frame
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether a stop was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear a stop request so the token can be reused
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

/// Frame-by-frame text scroller
#[derive(Debug)]
pub struct ScrollAnimator<'a> {
    chars: Chars<'a>,
    glyph: Glyph,
    line: usize,
    rotation: Rotation,
    foreground: PackedColor,
    background: PackedColor,
    frame: PixelBuffer,
    state: ScrollState,
    steps_taken: usize,
    total_steps: usize,
}

impl<'a> ScrollAnimator<'a> {
    /// Prepare to scroll `message`
    pub fn new(
        message: &'a str,
        rotation: Rotation,
        foreground: PackedColor,
        background: PackedColor,
    ) -> Self {
        let total_steps = (message.chars().count() + TRAILING_BLANKS) * LINES_PER_CHAR;
        Self {
            chars: message.chars(),
            glyph: Glyph::BLANK,
            line: 0,
            rotation,
            foreground,
            background,
            frame: PixelBuffer::filled(background),
            state: ScrollState::Idle,
            steps_taken: 0,
            total_steps,
        }
    }

    /// Current state
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Frame as last flushed
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    /// Steps performed so far
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Steps needed to scroll the whole message off the matrix
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Paint the background and flush it
    ///
    /// Does nothing unless the animator is `Idle`.
    pub fn start<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
    ) -> Result<ScrollState, I::Error> {
        if self.state != ScrollState::Idle {
            return Ok(self.state);
        }
        log::debug!(
            "scrolling {} steps at {} degrees",
            self.total_steps,
            self.rotation.degrees()
        );
        self.frame.fill(self.background);
        display.flush(&self.frame)?;
        self.state = ScrollState::Painting;
        Ok(self.state)
    }

    /// Advance by one glyph line and flush
    ///
    /// Starts the animation first if it is still `Idle`; does nothing once
    /// finished.
    ///
    /// A step that fails leaves the animator as it was, so it can be retried.
    pub fn step<I, F>(
        &mut self,
        glyphs: &mut GlyphStore<F>,
        display: &mut Display<I>,
    ) -> ScrollResult<I, F>
    where
        I: DisplayInterface,
        F: FontSource,
    {
        match self.state {
            ScrollState::Idle => {
                self.start(display).map_err(Error::Device)?;
            }
            ScrollState::Done | ScrollState::Cancelled => return Ok(self.state),
            ScrollState::Painting | ScrollState::Scrolling => {}
        }

        let mut chars = self.chars.clone();
        let glyph = if self.line == 0 {
            chars
                .next()
                .map_or(Ok(Glyph::BLANK), |ch| glyphs.lookup(ch))
                .map_err(Error::Font)?
        } else {
            self.glyph
        };

        let mut frame = self.frame;
        frame.shift(scroll_edge(self.rotation), self.background);
        for line_pos in 0..SIZE {
            let color = if glyph.is_lit_on_line(self.line, line_pos) {
                self.foreground
            } else {
                self.background
            };
            frame.set_linear(scroll_insert_offset(line_pos, self.rotation), color);
        }
        display.flush(&frame).map_err(Error::Device)?;

        self.chars = chars;
        self.glyph = glyph;
        self.frame = frame;
        self.line = (self.line + 1) % LINES_PER_CHAR;
        self.steps_taken += 1;
        self.state = if self.steps_taken >= self.total_steps {
            log::debug!("scroll finished after {} steps", self.steps_taken);
            ScrollState::Done
        } else {
            ScrollState::Scrolling
        };
        Ok(self.state)
    }

    /// Stop the animation; later steps do nothing
    pub fn cancel(&mut self) {
        if !self.state.is_finished() {
            log::debug!("scroll cancelled after {} steps", self.steps_taken);
            self.state = ScrollState::Cancelled;
        }
    }

    /// Run the animation to completion
    ///
    /// Waits `frame_period_ms` after every flush using `delay`, and checks
    /// `cancel` before each frame. Blocks the calling thread throughout.
    pub fn run<I, F, D>(
        &mut self,
        glyphs: &mut GlyphStore<F>,
        display: &mut Display<I>,
        delay: &mut D,
        frame_period_ms: u32,
        cancel: Option<&CancelToken>,
    ) -> ScrollResult<I, F>
    where
        I: DisplayInterface,
        F: FontSource,
        D: DelayNs,
    {
        let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

        if cancelled() {
            self.cancel();
            return Ok(self.state);
        }
        self.start(display).map_err(Error::Device)?;

        while !self.state.is_finished() {
            if cancelled() {
                self.cancel();
                break;
            }
            self.step(glyphs, display)?;
            if frame_period_ms > 0 {
                delay.delay_ms(frame_period_ms);
            }
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;
    use crate::font::FontError;
    use crate::mocks::{FailingInterface, FontBuilder, HookDelay, MockDelay, MockInterface};
    use alloc::vec::Vec;

    const FG: PackedColor = NamedColor::Red.packed();
    const BG: PackedColor = NamedColor::Blue.packed();

    /// 'I' lights pixel 3 of every strip, '.' only pixel 3 of strip 0
    fn font() -> Vec<u8> {
        FontBuilder::new()
            .glyph('I', &[3, 11, 19, 27, 35])
            .glyph('.', &[3])
            .build()
    }

    fn run_steps(animator: &mut ScrollAnimator<'_>, steps: usize) -> Display<MockInterface> {
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        animator.start(&mut display).unwrap();
        for _ in 0..steps {
            animator.step(&mut glyphs, &mut display).unwrap();
        }
        display
    }

    #[test]
    fn test_start_paints_background() {
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        assert_eq!(animator.state(), ScrollState::Idle);

        let display = run_steps(&mut animator, 0);
        assert_eq!(animator.state(), ScrollState::Painting);
        let device = display.interface().unwrap();
        assert_eq!(device.writes.len(), 1);
        assert!(device.cells().iter().all(|&c| c == BG.raw()));
    }

    #[test]
    fn test_first_line_enters_at_right_edge() {
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        run_steps(&mut animator, 1);
        assert_eq!(animator.state(), ScrollState::Scrolling);

        // strip 0 pixel 3 is line position 4
        let frame = animator.frame();
        assert_eq!(frame.get(7, 4), Some(FG));
        for y in (0..SIZE).filter(|&y| y != 4) {
            assert_eq!(frame.get(7, y), Some(BG));
        }
        assert_eq!(frame.get(6, 4), Some(BG));
    }

    #[test]
    fn test_lines_move_left_each_step() {
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        run_steps(&mut animator, 3);
        let frame = animator.frame();
        for x in 5..SIZE {
            assert_eq!(frame.get(x, 4), Some(FG), "column {x}");
        }
        assert_eq!(frame.get(4, 4), Some(BG));
    }

    #[test]
    fn test_sixth_line_is_blank_gap() {
        let mut animator = ScrollAnimator::new("II", Rotation::Rotate0, FG, BG);
        run_steps(&mut animator, 7);
        let frame = animator.frame();
        // step 6 inserted the gap, step 7 the next letter's first strip
        assert_eq!(frame.get(6, 4), Some(BG));
        assert_eq!(frame.get(7, 4), Some(FG));
        assert_eq!(frame.get(5, 4), Some(FG));
    }

    #[test]
    fn test_each_rotation_inserts_on_its_trailing_edge() {
        let cases = [
            (Rotation::Rotate0, (7, 4)),
            (Rotation::Rotate90, (3, 7)),
            (Rotation::Rotate180, (0, 3)),
            (Rotation::Rotate270, (4, 0)),
        ];
        for (rotation, (x, y)) in cases {
            let mut animator = ScrollAnimator::new("I", rotation, FG, BG);
            run_steps(&mut animator, 1);
            let frame = animator.frame();
            assert_eq!(frame.get(x, y), Some(FG), "{rotation:?}");
            let lit = frame.cells().iter().filter(|&&c| c == FG).count();
            assert_eq!(lit, 1, "{rotation:?}");
        }
    }

    #[test]
    fn test_each_rotation_moves_away_from_trailing_edge() {
        let cases = [
            (Rotation::Rotate0, (6, 4)),
            (Rotation::Rotate90, (3, 6)),
            (Rotation::Rotate180, (1, 3)),
            (Rotation::Rotate270, (4, 1)),
        ];
        for (rotation, (x, y)) in cases {
            let mut animator = ScrollAnimator::new(".", rotation, FG, BG);
            run_steps(&mut animator, 2);
            let frame = animator.frame();
            assert_eq!(frame.get(x, y), Some(FG), "{rotation:?}");
            let lit = frame.cells().iter().filter(|&&c| c == FG).count();
            assert_eq!(lit, 1, "{rotation:?}");
        }
    }

    #[test]
    fn test_single_character_scrolls_off_completely() {
        for rotation in Rotation::ALL {
            let mut animator = ScrollAnimator::new("I", rotation, FG, BG);
            assert_eq!(animator.total_steps(), (1 + 2) * 6);
            let steps = animator.total_steps();
            let display = run_steps(&mut animator, steps);
            assert_eq!(animator.state(), ScrollState::Done);
            assert!(animator.frame().is_filled_with(BG), "{rotation:?}");

            let device = display.interface().unwrap();
            assert_eq!(device.writes.len(), 1 + 18);
            assert!(device.writes.iter().all(|(offset, data)| *offset == 0 && data.len() == 128));
        }
    }

    #[test]
    fn test_steps_after_done_do_nothing() {
        let mut animator = ScrollAnimator::new("", Rotation::Rotate0, FG, BG);
        let display = run_steps(&mut animator, 20);
        assert_eq!(animator.steps_taken(), 12);
        assert_eq!(display.interface().unwrap().writes.len(), 13);
    }

    #[test]
    fn test_step_from_idle_starts_first() {
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        animator.step(&mut glyphs, &mut display).unwrap();
        assert_eq!(display.interface().unwrap().writes.len(), 2);
    }

    #[test]
    fn test_run_paces_every_frame() {
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        let mut delay = MockDelay::default();
        let mut animator = ScrollAnimator::new("I.", Rotation::Rotate90, FG, BG);

        let state = animator
            .run(&mut glyphs, &mut display, &mut delay, 100, None)
            .unwrap();
        assert_eq!(state, ScrollState::Done);
        assert_eq!(delay.calls, 24);
        assert_eq!(delay.total_ns, 24 * 100_000_000);
        assert_eq!(display.interface().unwrap().writes.len(), 25);
    }

    #[test]
    fn test_run_without_pacing() {
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        let mut delay = MockDelay::default();
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        animator.run(&mut glyphs, &mut display, &mut delay, 0, None).unwrap();
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_run_stops_when_cancelled() {
        let token = CancelToken::new();
        let hook = |calls: usize| {
            if calls == 5 {
                token.cancel();
            }
        };
        let mut delay = HookDelay { calls: 0, hook: &hook };
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        let mut animator = ScrollAnimator::new("III", Rotation::Rotate0, FG, BG);

        let state = animator
            .run(&mut glyphs, &mut display, &mut delay, 100, Some(&token))
            .unwrap();
        assert_eq!(state, ScrollState::Cancelled);
        assert_eq!(animator.steps_taken(), 5);
        assert_eq!(display.interface().unwrap().writes.len(), 6);

        // further steps are ignored
        assert_eq!(
            animator.step(&mut glyphs, &mut display).unwrap(),
            ScrollState::Cancelled
        );
    }

    #[test]
    fn test_run_with_cancelled_token_draws_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(MockInterface::default());
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        let state = animator
            .run(&mut glyphs, &mut display, &mut MockDelay::default(), 100, Some(&token))
            .unwrap();
        assert_eq!(state, ScrollState::Cancelled);
        assert!(display.interface().unwrap().writes.is_empty());

        token.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_device_error_stops_run() {
        let mut glyphs = GlyphStore::new(font());
        let mut display = Display::new(FailingInterface {
            remaining: 3,
            attempts: 0,
        });
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        let result = animator.run(&mut glyphs, &mut display, &mut MockDelay::default(), 0, None);
        assert!(matches!(result, Err(Error::Device(_))));
        assert_eq!(display.interface().unwrap().attempts, 4);
    }

    #[test]
    fn test_font_error_stops_run() {
        let mut glyphs = GlyphStore::new(&[0u8; 16][..]);
        let mut display = Display::new(MockInterface::default());
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        let result = animator.run(&mut glyphs, &mut display, &mut MockDelay::default(), 0, None);
        assert!(matches!(
            result,
            Err(Error::Font(FontError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_failed_flush_can_be_retried() {
        let mut glyphs = GlyphStore::new(font());
        // background plus the six lines of 'I' succeed, line 0 of '.' fails
        let mut display = Display::new(FailingInterface {
            remaining: 7,
            attempts: 0,
        });
        let mut animator = ScrollAnimator::new("I.", Rotation::Rotate0, FG, BG);
        animator.start(&mut display).unwrap();
        for _ in 0..6 {
            animator.step(&mut glyphs, &mut display).unwrap();
        }
        let shown = *animator.frame();

        let result = animator.step(&mut glyphs, &mut display);
        assert!(matches!(result, Err(Error::Device(_))));
        assert_eq!(animator.state(), ScrollState::Scrolling);
        assert_eq!(animator.steps_taken(), 6);
        assert_eq!(*animator.frame(), shown);

        display.interface_mut().unwrap().remaining = usize::MAX;
        animator.step(&mut glyphs, &mut display).unwrap();
        assert_eq!(animator.steps_taken(), 7);
        let frame = animator.frame();
        // '.' strip 0 enters at the right edge, the gap after 'I' beside it
        assert_eq!(frame.get(7, 4), Some(FG));
        assert_eq!(frame.get(6, 4), Some(BG));
        assert_eq!(frame.get(5, 4), Some(FG));
    }

    #[test]
    fn test_failed_font_read_keeps_message_position() {
        let mut display = Display::new(MockInterface::default());
        let mut animator = ScrollAnimator::new("I", Rotation::Rotate0, FG, BG);
        let mut short = GlyphStore::new(&[0u8; 16][..]);
        assert!(animator.step(&mut short, &mut display).is_err());
        assert_eq!(animator.steps_taken(), 0);

        let mut glyphs = GlyphStore::new(font());
        animator.step(&mut glyphs, &mut display).unwrap();
        assert_eq!(animator.frame().get(7, 4), Some(FG));
    }
}
