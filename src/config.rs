//! Display configuration types and builder

use crate::color::{NamedColor, PackedColor};
pub use crate::error::BuilderError;

/// Default delay between scroll frames in milliseconds
pub const DEFAULT_FRAME_PERIOD_MS: u32 = 100;

/// Longest accepted delay between scroll frames in milliseconds
pub const MAX_FRAME_PERIOD_MS: u32 = 10_000;

/// Matrix rotation relative to the board's native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees
    Rotate270,
}

impl Rotation {
    /// Every supported rotation
    pub const ALL: [Self; 4] = [
        Self::Rotate0,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
    ];

    /// Parse a rotation given in degrees
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::UnsupportedRotation` for anything other than
    /// 0, 90, 180 or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self, BuilderError> {
        match degrees {
            0 => Ok(Self::Rotate0),
            90 => Ok(Self::Rotate90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Rotate270),
            _ => Err(BuilderError::UnsupportedRotation { degrees }),
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = BuilderError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

/// Display state consulted by every render call
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Rotation applied to rotated pixel writes, letters and scrolling
    pub rotation: Rotation,
    /// Color of lit glyph pixels
    pub foreground: PackedColor,
    /// Color of everything else
    pub background: PackedColor,
    /// Pause after each scroll frame in milliseconds
    ///
    /// Scrolling never waits longer than [`MAX_FRAME_PERIOD_MS`] per frame.
    pub frame_period_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation: Rotation::Rotate0,
            foreground: NamedColor::White.packed(),
            background: PackedColor::OFF,
            frame_period_ms: DEFAULT_FRAME_PERIOD_MS,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use sense_hat_led::{Builder, NamedColor, Rotation};
///
/// let config = match Builder::new()
///     .rotation(Rotation::Rotate90)
///     .foreground(NamedColor::Cyan.into())
///     .frame_period_ms(50)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotation.degrees(), 90);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Set foreground color
    pub fn foreground(mut self, color: PackedColor) -> Self {
        self.config.foreground = color;
        self
    }

    /// Set background color
    pub fn background(mut self, color: PackedColor) -> Self {
        self.config.background = color;
        self
    }

    /// Set the pause after each scroll frame; 0 disables pacing
    pub fn frame_period_ms(mut self, ms: u32) -> Self {
        self.config.frame_period_ms = ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::FramePeriodTooLong` if the frame period exceeds
    /// [`MAX_FRAME_PERIOD_MS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let ms = self.config.frame_period_ms;
        if ms > MAX_FRAME_PERIOD_MS {
            return Err(BuilderError::FramePeriodTooLong {
                ms,
                max: MAX_FRAME_PERIOD_MS,
            });
        }
        Ok(self.config)
    }
}
