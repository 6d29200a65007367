//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and render operations ([`Error`]).
//!
//! Unknown color names, unknown characters, out-of-range coordinates and
//! multi-character letters are not errors: they default, clamp or do nothing.
//! Only the two collaborators, the framebuffer device and the font resource,
//! can fail a render.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::{Builder, BuilderError, Rotation};
//!
//! // Only right angles are supported
//! let result = Rotation::from_degrees(45);
//! assert!(matches!(result, Err(BuilderError::UnsupportedRotation { degrees: 45 })));
//!
//! // Frame period is bounded
//! let result = Builder::new().frame_period_ms(60_000).build();
//! assert!(result.is_err());
//! ```

use core::fmt::Debug;

/// Errors that can occur while rendering
///
/// Generic over the device and font error types so callers can match on the
/// underlying I/O failure.
#[derive(Debug)]
pub enum Error<DeviceErr, FontErr> {
    /// Writing to the framebuffer device failed
    Device(DeviceErr),
    /// Reading glyph data from the font resource failed
    Font(FontErr),
}

impl<DeviceErr: Debug, FontErr: Debug> core::fmt::Display for Error<DeviceErr, FontErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Device(e) => write!(f, "Framebuffer device error: {e:?}"),
            Self::Font(e) => write!(f, "Font resource error: {e:?}"),
        }
    }
}

impl<DeviceErr: Debug, FontErr: Debug> core::error::Error for Error<DeviceErr, FontErr> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Rotation other than 0, 90, 180 or 270 degrees
    UnsupportedRotation {
        /// Requested rotation
        degrees: u16,
    },
    /// Frame period above the accepted maximum
    FramePeriodTooLong {
        /// Requested period in milliseconds
        ms: u32,
        /// Maximum period in milliseconds
        max: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedRotation { degrees } => {
                write!(f, "Unsupported rotation {degrees} (expected 0, 90, 180 or 270)")
            }
            Self::FramePeriodTooLong { ms, max } => {
                write!(f, "Frame period {ms}ms exceeds maximum of {max}ms")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
