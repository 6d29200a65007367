//! Core display operations

use crate::buffer::PixelBuffer;
use crate::color::PackedColor;
use crate::interface::DisplayInterface;
use crate::rotation::CELLS;

/// Writes frames and single cells to the framebuffer device
///
/// A `Display` may be detached, meaning no device was found. Every write to
/// a detached display succeeds without doing anything, so callers can render
/// unconditionally.
#[derive(Debug)]
pub struct Display<I> {
    /// Hardware interface, if a device is present
    interface: Option<I>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a Display writing to `interface`
    pub fn new(interface: I) -> Self {
        Self {
            interface: Some(interface),
        }
    }

    /// Create a Display with no device behind it
    pub fn detached() -> Self {
        Self { interface: None }
    }

    /// Whether a device is present
    pub fn is_attached(&self) -> bool {
        self.interface.is_some()
    }

    /// Borrow the interface, if any
    pub fn interface(&self) -> Option<&I> {
        self.interface.as_ref()
    }

    /// Mutably borrow the interface, if any
    pub fn interface_mut(&mut self) -> Option<&mut I> {
        self.interface.as_mut()
    }

    /// Remove and return the interface, leaving the display detached
    pub fn detach(&mut self) -> Option<I> {
        self.interface.take()
    }

    /// Write a whole frame to the device
    ///
    /// Issues a single 128-byte write at offset 0.
    pub fn flush(&mut self, buffer: &PixelBuffer) -> Result<(), I::Error> {
        let Some(interface) = self.interface.as_mut() else {
            log::trace!("no device attached, dropping frame");
            return Ok(());
        };
        log::trace!("flushing frame");
        interface.write_at(0, &buffer.bytes())
    }

    /// Write one cell to the device
    ///
    /// Issues a single 2-byte write at `2 * cell`. Cells outside `0..64` are
    /// ignored.
    pub fn write_cell(&mut self, cell: usize, color: PackedColor) -> Result<(), I::Error> {
        if cell >= CELLS {
            log::debug!("ignoring write to cell {cell} outside the matrix");
            return Ok(());
        }
        let Some(interface) = self.interface.as_mut() else {
            log::trace!("no device attached, dropping cell {cell}");
            return Ok(());
        };
        interface.write_at((cell * 2) as u64, &color.to_be_bytes())
    }
}

#[cfg(feature = "std")]
impl Display<crate::interface::DeviceFile> {
    /// Create a Display for a discovered device, detached if none was found
    pub fn from_located(located: Option<crate::discovery::LocatedDevice>) -> Self {
        match located {
            Some(device) => Self::new(crate::interface::DeviceFile::new(device.path)),
            None => Self::detached(),
        }
    }
}
