//! In-memory frame for the LED matrix
//!
//! [`PixelBuffer`] holds the 64 packed color words of one frame in the
//! device's storage order (`y * 8 + x`, unrotated). Rotation is applied by the
//! caller when choosing which cell to write.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::{NamedColor, PixelBuffer};
//!
//! let mut frame = PixelBuffer::filled(NamedColor::Blue.packed());
//! frame.set(7, 0, NamedColor::Red.packed());
//!
//! let bytes = frame.bytes();
//! assert_eq!(bytes[0..2], [0x1C, 0x00]);
//! assert_eq!(bytes[14..16], [0x00, 0xE0]);
//! ```

use crate::color::PackedColor;
use crate::interface::FRAME_BYTES;
use crate::rotation::{CELLS, SIZE, Shift};

/// A full 8x8 frame of packed colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    cells: [PackedColor; CELLS],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::filled(PackedColor::OFF)
    }
}

impl PixelBuffer {
    /// A frame with every cell set to `color`
    pub const fn filled(color: PackedColor) -> Self {
        Self {
            cells: [color; CELLS],
        }
    }

    /// Set the cell at `(x, y)`
    ///
    /// Coordinates outside `0..8` leave the frame untouched.
    pub fn set(&mut self, x: usize, y: usize, color: PackedColor) {
        if x >= SIZE || y >= SIZE {
            log::debug!("ignoring pixel ({x}, {y}) outside the matrix");
            return;
        }
        self.cells[y * SIZE + x] = color;
    }

    /// Set the cell at linear `offset`
    ///
    /// Offsets outside `0..64` leave the frame untouched.
    pub fn set_linear(&mut self, offset: usize, color: PackedColor) {
        if let Some(cell) = self.cells.get_mut(offset) {
            *cell = color;
        } else {
            log::debug!("ignoring cell {offset} outside the matrix");
        }
    }

    /// Color of the cell at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<PackedColor> {
        if x >= SIZE || y >= SIZE {
            return None;
        }
        Some(self.cells[y * SIZE + x])
    }

    /// Color of the cell at linear `offset`
    pub fn get_linear(&self, offset: usize) -> Option<PackedColor> {
        self.cells.get(offset).copied()
    }

    /// Set every cell to `color`
    pub fn fill(&mut self, color: PackedColor) {
        self.cells.fill(color);
    }

    /// Whether every cell holds `color`
    pub fn is_filled_with(&self, color: PackedColor) -> bool {
        self.cells.iter().all(|&cell| cell == color)
    }

    /// All cells in storage order
    pub fn cells(&self) -> &[PackedColor; CELLS] {
        &self.cells
    }

    /// Move the whole frame one column or row
    ///
    /// The line that moves off the edge is dropped and the vacated line on
    /// the opposite edge is set to `vacated`.
    pub fn shift(&mut self, direction: Shift, vacated: PackedColor) {
        match direction {
            Shift::Left => {
                for row in self.cells.chunks_exact_mut(SIZE) {
                    row.copy_within(1.., 0);
                    row[SIZE - 1] = vacated;
                }
            }
            Shift::Right => {
                for row in self.cells.chunks_exact_mut(SIZE) {
                    row.copy_within(..SIZE - 1, 1);
                    row[0] = vacated;
                }
            }
            Shift::Up => {
                self.cells.copy_within(SIZE.., 0);
                self.cells[CELLS - SIZE..].fill(vacated);
            }
            Shift::Down => {
                self.cells.copy_within(..CELLS - SIZE, SIZE);
                self.cells[..SIZE].fill(vacated);
            }
        }
    }

    /// Serialize to the device's wire format
    ///
    /// Cell `n` becomes bytes `2n` and `2n + 1`, big-endian.
    pub fn bytes(&self) -> [u8; FRAME_BYTES] {
        let mut bytes = [0u8; FRAME_BYTES];
        for (pair, cell) in bytes.chunks_exact_mut(2).zip(self.cells.iter()) {
            pair.copy_from_slice(&cell.to_be_bytes());
        }
        bytes
    }
}
