//! Packed color words for the Sense HAT LED matrix
//!
//! This module defines [`PackedColor`], the 16-bit word the framebuffer stores
//! per LED, and [`NamedColor`], the fixed palette exposed to callers.
//!
//! ## Color Representation
//!
//! Each channel is truncated to its high 3 bits and packed into one word:
//!
//! | Bits    | Channel |
//! |---------|---------|
//! | 12..10  | Blue    |
//! | 7..5    | Red     |
//! | 2..0    | Green   |
//!
//! On the wire the word is big-endian: `[high, low]`.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::{NamedColor, PackedColor};
//!
//! let red = PackedColor::from_rgb(255, 0, 0);
//! assert_eq!(red.raw(), 0x00E0);
//! assert_eq!(red, NamedColor::Red.packed());
//! assert_eq!(red.to_be_bytes(), [0x00, 0xE0]);
//!
//! // Unknown names never fail, they turn the LED off
//! assert_eq!(PackedColor::from_name("chartreuse"), PackedColor::OFF);
//! ```

/// Mask of the bits a packed color word may occupy
const PACKED_MASK: u16 = 0x7FFF;

/// A color in the device's packed 3-bit-per-channel format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedColor(u16);

impl PackedColor {
    /// All channels off
    pub const OFF: Self = Self(0);

    /// Encode an 8-bit RGB triple
    ///
    /// Each channel keeps only its high 3 bits (`channel / 32`), so the
    /// result is `blue3 * 1024 + red3 * 32 + green3`.
    ///
    /// ## Example
    ///
    /// ```
    /// use sense_hat_led::PackedColor;
    ///
    /// assert_eq!(PackedColor::from_rgb(255, 255, 255).raw(), 0x1CE7);
    /// assert_eq!(PackedColor::from_rgb(31, 31, 31).raw(), 0);
    /// ```
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r3 = (r >> 5) as u16;
        let g3 = (g >> 5) as u16;
        let b3 = (b >> 5) as u16;
        Self((b3 << 10) | (r3 << 5) | g3)
    }

    /// Encode channel values that may fall outside `0..=255`
    ///
    /// Values are clamped into range before encoding.
    pub fn from_rgb_saturating(r: i32, g: i32, b: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Self::from_rgb(clamp(r), clamp(g), clamp(b))
    }

    /// Look up a palette color by name, defaulting to [`PackedColor::OFF`]
    pub fn from_name(name: &str) -> Self {
        NamedColor::from_name(name).packed()
    }

    /// Reassemble a word from its big-endian wire bytes
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes) & PACKED_MASK)
    }

    /// Create a color from a raw packed word
    ///
    /// Bits outside the 15-bit packed range are dropped.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & PACKED_MASK)
    }

    /// Raw packed word
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Big-endian wire bytes `[high, low]`
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<NamedColor> for PackedColor {
    fn from(color: NamedColor) -> Self {
        color.packed()
    }
}

/// Fixed palette offered to callers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// LED off
    #[default]
    Off,
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Yellow
    Yellow,
    /// Cyan
    Cyan,
    /// Magenta
    Magenta,
    /// White
    White,
}

impl NamedColor {
    /// Every palette entry, in menu order
    pub const ALL: [Self; 8] = [
        Self::Off,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Cyan,
        Self::Magenta,
        Self::White,
    ];

    /// Parse a palette name; anything unrecognized is [`NamedColor::Off`]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == name)
            .unwrap_or(Self::Off)
    }

    /// Lowercase palette name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::White => "white",
        }
    }

    /// Packed word for this palette entry
    pub const fn packed(self) -> PackedColor {
        let raw = match self {
            Self::Off => 0x0000,
            Self::Red => 0x00E0,
            Self::Green => 0x0007,
            Self::Blue => 0x1C00,
            Self::Yellow => 0x00E7,
            Self::Cyan => 0x1C07,
            Self::Magenta => 0x1CE0,
            Self::White => 0x1CE7,
        };
        PackedColor(raw)
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for PackedColor {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for PackedColor {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::from_rgb(color.r(), color.g(), color.b())
    }
}
