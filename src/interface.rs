//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait for the framebuffer
//! device backing the LED matrix, and, with the `std` feature, the
//! [`DeviceFile`] implementation.
//!
//! ## Device protocol
//!
//! The device is a flat 128-byte range, not a stream. Cell `n` occupies bytes
//! `2n` and `2n + 1`, holding its packed color big-endian. A full frame is one
//! 128-byte write at offset 0; a single pixel is one 2-byte write at `2n`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sense_hat_led::{DeviceFile, DisplayInterface};
//!
//! let mut device = DeviceFile::new("/dev/fb1");
//!
//! // Light the top-left LED red
//! let _ = device.write_at(0, &[0x00, 0xE0]);
//! ```

use core::fmt::Debug;

/// Size of the device's addressable range in bytes
pub const FRAME_BYTES: usize = 128;

/// Trait for the framebuffer device behind the matrix
///
/// Implementations must treat each call as a complete, bounded write at an
/// absolute offset.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write `data` at byte `offset`
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened or written.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: DisplayInterface + ?Sized> DisplayInterface for &mut T {
    type Error = T::Error;

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_at(offset, data)
    }
}

#[cfg(feature = "std")]
pub use file::DeviceFile;

#[cfg(feature = "std")]
mod file {
    use std::fs::OpenOptions;
    use std::io::{Seek, SeekFrom, Write};
    use std::path::{Path, PathBuf};

    use super::DisplayInterface;

    /// Framebuffer device addressed through a filesystem path
    ///
    /// Works for `/dev/fbN` on hardware and for the emulator's shared memory
    /// screen file. The file is opened for every write and closed when the
    /// write returns, so a device reset between frames is picked up and a
    /// failed write never leaves a handle behind.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DeviceFile {
        path: PathBuf,
    }

    impl DeviceFile {
        /// Device at `path`
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Path of the device
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl DisplayInterface for DeviceFile {
        type Error = std::io::Error;

        fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), Self::Error> {
            let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
            file.seek(SeekFrom::Start(offset))?;
            file.write_all(data)?;
            file.flush()
        }
    }
}
