//! Font resource abstraction
//!
//! Glyph bitmaps come from a flat binary resource (on the board, the bitmap
//! `sense_hat_text.bmp` shipped with the system). The [`FontSource`] trait
//! gives [`GlyphStore`](crate::glyph::GlyphStore) positioned reads into it.
//!
//! Implementations are provided for in-memory byte slices and vectors, and,
//! with the `std` feature, for [`FontFile`], which opens the file for every
//! read and closes it before returning.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::font::FontSource;
//!
//! let mut font: &[u8] = &[1, 2, 3, 4];
//! let mut buf = [0u8; 2];
//! assert!(font.read_exact_at(1, &mut buf).is_ok());
//! assert_eq!(buf, [2, 3]);
//! assert!(font.read_exact_at(3, &mut buf).is_err());
//! ```

use core::fmt::Debug;

/// Positioned read access to a font resource
pub trait FontSource {
    /// Error type for read operations
    type Error: Debug;

    /// Fill `buf` from the resource starting at byte `offset`
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be read or holds fewer than
    /// `offset + buf.len()` bytes.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: FontSource + ?Sized> FontSource for &mut T {
    type Error = T::Error;

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_exact_at(offset, buf)
    }
}

/// Errors from in-memory font resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// The requested span runs past the end of the resource
    OutOfRange {
        /// Requested start offset
        offset: u64,
        /// Requested length
        len: usize,
        /// Resource size
        size: usize,
    },
}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { offset, len, size } => write!(
                f,
                "Font read of {len} bytes at {offset} exceeds resource size {size}"
            ),
        }
    }
}

impl core::error::Error for FontError {}

fn read_slice(data: &[u8], offset: u64, buf: &mut [u8]) -> Result<(), FontError> {
    let out_of_range = FontError::OutOfRange {
        offset,
        len: buf.len(),
        size: data.len(),
    };
    let start = usize::try_from(offset).map_err(|_| out_of_range)?;
    let end = start.checked_add(buf.len()).ok_or(out_of_range)?;
    let span = data.get(start..end).ok_or(out_of_range)?;
    buf.copy_from_slice(span);
    Ok(())
}

impl FontSource for &[u8] {
    type Error = FontError;

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        read_slice(*self, offset, buf)
    }
}

impl<const N: usize> FontSource for [u8; N] {
    type Error = FontError;

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        read_slice(self.as_slice(), offset, buf)
    }
}

#[cfg(any(test, feature = "std"))]
impl FontSource for alloc::vec::Vec<u8> {
    type Error = FontError;

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        read_slice(self.as_slice(), offset, buf)
    }
}

#[cfg(feature = "std")]
pub use file::{DEFAULT_FONT_PATH, FontFile};

#[cfg(feature = "std")]
mod file {
    use std::fs::File;
    use std::io::{Read, Seek, SeekFrom};
    use std::path::{Path, PathBuf};

    use super::FontSource;

    /// Where the system installs the LED matrix font
    pub const DEFAULT_FONT_PATH: &str = "/usr/lib/scratch3/sense_hat_text.bmp";

    /// Font resource backed by a file on disk
    ///
    /// The file is opened for each read and closed when the read returns,
    /// on success and on error alike.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FontFile {
        path: PathBuf,
    }

    impl FontFile {
        /// Font file at `path`
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Path of the font file
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Default for FontFile {
        fn default() -> Self {
            Self::new(DEFAULT_FONT_PATH)
        }
    }

    impl FontSource for FontFile {
        type Error = std::io::Error;

        fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
            let mut file = File::open(&self.path)?;
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(buf)
        }
    }
}
