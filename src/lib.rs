//! Raspberry Pi Sense HAT LED Matrix Driver
//!
//! A driver for the 8x8 RGB LED matrix of the Sense HAT, which the kernel
//! exposes as a 128-byte framebuffer (or the emulator as a shared memory
//! file).
//!
//! ## Features
//!
//! - `no_std` core: rendering only needs a [`DisplayInterface`], a
//!   [`FontSource`] and an `embedded-hal` v1.0 delay
//! - Single pixels, fills, static letters and scrolling text
//! - Rotation support (0°, 90°, 180°, 270°)
//! - `std` feature: device file, font file, thread delay, device discovery
//!   and emulator sensors
//! - `graphics` feature: `embedded-graphics` canvas over a frame
//!
//! ## Usage
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use sense_hat_led::{
//!     Builder, Display, DisplayInterface, GlyphStore, LedMatrix, NamedColor, Rotation,
//!     ScrollState,
//! };
//!
//! # struct MockDevice([u8; 128]);
//! # impl DisplayInterface for MockDevice {
//! #     type Error = Infallible;
//! #     fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), Self::Error> {
//! #         let start = offset as usize;
//! #         self.0[start..start + data.len()].copy_from_slice(data);
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let font = vec![0u8; 10_378];
//! # let mut delay = MockDelay;
//! let config = match Builder::new()
//!     .rotation(Rotation::Rotate90)
//!     .foreground(NamedColor::Green.packed())
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let display = Display::new(MockDevice([0; 128]));
//! let mut matrix = LedMatrix::new(display, GlyphStore::new(font), config);
//!
//! let _ = matrix.set_pixel(0, 0, NamedColor::Red.packed());
//! let _ = matrix.show_letter("A");
//! assert!(matches!(matrix.scroll_message("Hi", &mut delay), Ok(ScrollState::Done)));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate alloc;

/// Buffered 8x8 frames
pub mod buffer;
/// Packed device colors and the named palette
pub mod color;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Font resource abstraction
pub mod font;
/// Character glyphs and the font layout
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;
/// LED matrix driver with display state
pub mod matrix;
/// Coordinate rotation utilities
pub mod rotation;
/// Frame-paced text scrolling
pub mod scroll;

/// Thread-sleeping delay (requires `std` feature)
#[cfg(feature = "std")]
pub mod delay;
/// Framebuffer discovery (requires `std` feature)
#[cfg(feature = "std")]
pub mod discovery;
/// Emulator sensor readings (requires `std` feature)
#[cfg(feature = "std")]
pub mod sensors;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mocks;

pub use buffer::PixelBuffer;
pub use color::{NamedColor, PackedColor};
pub use config::{Builder, Config, DEFAULT_FRAME_PERIOD_MS, MAX_FRAME_PERIOD_MS, Rotation};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use font::{FontError, FontSource};
pub use glyph::{Glyph, GlyphStore};
pub use interface::{DisplayInterface, FRAME_BYTES};
pub use matrix::LedMatrix;
pub use scroll::{CancelToken, ScrollAnimator, ScrollState};

#[cfg(feature = "std")]
pub use delay::StdDelay;
#[cfg(feature = "std")]
pub use discovery::{DeviceKind, DeviceLocator, LocatedDevice};
#[cfg(feature = "std")]
pub use font::{DEFAULT_FONT_PATH, FontFile};
#[cfg(feature = "std")]
pub use interface::DeviceFile;
#[cfg(feature = "std")]
pub use sensors::EmulatorSensors;

#[cfg(feature = "graphics")]
pub use graphics::Canvas;
