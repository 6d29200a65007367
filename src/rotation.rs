//! Coordinate rotation utilities
//!
//! This module maps logical positions to physical framebuffer cells for each
//! [`Rotation`]. The framebuffer stores 64 cells row-major (`y * 8 + x`) in
//! the board's native orientation.
//!
//! Three mappings are provided:
//!
//! - [`pixel_offset`]: a logical `(x, y)` to a framebuffer cell, used for
//!   single-pixel writes.
//! - [`glyph_offset`]: a framebuffer cell to a cell of the 8x8 glyph grid, used
//!   when painting a static letter. Glyphs only occupy 5 strips of the grid,
//!   so the mapping is not a plain rotation and many cells map to background.
//! - [`scroll_edge`] and [`scroll_insert_offset`]: where a scroll frame moves
//!   and where the newly revealed line of a glyph lands.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::{rotation::pixel_offset, Rotation};
//!
//! assert_eq!(pixel_offset(0, 0, Rotation::Rotate0), 0);
//! assert_eq!(pixel_offset(0, 0, Rotation::Rotate90), 7);
//! assert_eq!(pixel_offset(0, 0, Rotation::Rotate180), 63);
//! assert_eq!(pixel_offset(0, 0, Rotation::Rotate270), 56);
//! ```

use crate::config::Rotation;

/// Matrix width and height in cells
pub const SIZE: usize = 8;

/// Number of cells in the matrix
pub const CELLS: usize = SIZE * SIZE;

/// Map a logical pixel to its framebuffer cell
///
/// # Arguments
///
/// * `x` - Column, 0 to 7
/// * `y` - Row, 0 to 7
/// * `rotation` - Rotation mode
///
/// Callers must keep `x` and `y` inside `0..8`.
pub const fn pixel_offset(x: usize, y: usize, rotation: Rotation) -> usize {
    match rotation {
        Rotation::Rotate0 => y * SIZE + x,
        Rotation::Rotate90 => x * SIZE + (SIZE - 1 - y),
        Rotation::Rotate180 => CELLS - 1 - (y * SIZE + x),
        Rotation::Rotate270 => (SIZE - 1 - x) * SIZE + y,
    }
}

/// Map a framebuffer cell to the glyph cell painted there
///
/// Returns `None` where the letter leaves background, i.e. outside the five
/// strips the font stores per character.
///
/// The per-rotation formulas follow the font sheet's physical layout and are
/// deliberately not symmetric.
pub const fn glyph_offset(scan_index: usize, rotation: Rotation) -> Option<usize> {
    let x = scan_index % SIZE;
    let y = scan_index / SIZE;
    match rotation {
        Rotation::Rotate0 => {
            if x > 4 {
                None
            } else {
                Some((x + 1) * SIZE - 1 - y)
            }
        }
        Rotation::Rotate90 => {
            if scan_index < 40 {
                Some(scan_index)
            } else {
                None
            }
        }
        Rotation::Rotate180 => {
            if x < 3 {
                None
            } else {
                Some((SIZE - 1 - x) * SIZE + y)
            }
        }
        Rotation::Rotate270 => {
            if scan_index > 24 {
                Some(CELLS - 1 - scan_index)
            } else {
                None
            }
        }
    }
}

/// Direction a scroll frame moves its contents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Columns move left, new column enters at the right
    Left,
    /// Columns move right, new column enters at the left
    Right,
    /// Rows move up, new row enters at the bottom
    Up,
    /// Rows move down, new row enters at the top
    Down,
}

/// Scroll direction for a rotation
///
/// 0° scrolls right-to-left, 90° bottom-to-top, 180° left-to-right and 270°
/// top-to-bottom.
pub const fn scroll_edge(rotation: Rotation) -> Shift {
    match rotation {
        Rotation::Rotate0 => Shift::Left,
        Rotation::Rotate90 => Shift::Up,
        Rotation::Rotate180 => Shift::Right,
        Rotation::Rotate270 => Shift::Down,
    }
}

/// Framebuffer cell receiving pixel `line_pos` of a newly revealed glyph line
///
/// `line_pos` runs 0 to 7 along the glyph line, starting from the letter's
/// top as it reads at `rotation`.
pub const fn scroll_insert_offset(line_pos: usize, rotation: Rotation) -> usize {
    match rotation {
        Rotation::Rotate0 => line_pos * SIZE + (SIZE - 1),
        Rotation::Rotate90 => (SIZE - 1) * SIZE + (SIZE - 1 - line_pos),
        Rotation::Rotate180 => (SIZE - 1 - line_pos) * SIZE,
        Rotation::Rotate270 => line_pos,
    }
}
