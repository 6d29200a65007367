//! Glyph lookup from the LED matrix font
//!
//! The font resource stores one 80-byte record per character, starting at
//! [`GLYPH_TABLE_OFFSET`]. Records are indexed in reverse alphabet order:
//! the character at position `p` of [`ALPHABET`] lives in record `90 - p`.
//!
//! Each record holds 5 strips of 8 pixels, 2 bytes per pixel, stored bottom
//! strip first. A pixel is lit when its first byte is `0xFF`.
//!
//! ## Glyph layout
//!
//! A [`Glyph`] is an 8x8 grid; cell `strip * 8 + pixel` holds pixel `pixel`
//! of strip `strip`. Strips 5 to 7 are always background, which gives one
//! blank column between scrolled letters.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::glyph::{glyph_index, record_offset};
//!
//! assert_eq!(glyph_index('A'), 65);
//! assert_eq!(record_offset(glyph_index('A')), 3098 + 65 * 80);
//!
//! // Characters missing from the font fall back to the last record (space)
//! assert_eq!(glyph_index('€'), 90);
//! ```

use crate::font::FontSource;
use crate::rotation::SIZE;

/// Characters in the font, in font sheet order
pub const ALPHABET: &str =
    " +-*/!\"#$><0123456789.=)(ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz?,;:|@%[&_']\\~";

/// Byte offset of the first glyph record in the font resource
pub const GLYPH_TABLE_OFFSET: u64 = 3098;

/// Size of one glyph record in bytes
pub const GLYPH_RECORD_LEN: usize = 80;

/// Number of pixel strips stored per glyph
pub const GLYPH_STRIPS: usize = 5;

/// Size of one strip in bytes
const STRIP_LEN: usize = 16;

/// Highest glyph record index
pub const LAST_GLYPH_INDEX: usize = 90;

/// Byte value marking a lit pixel
const LIT: u8 = 0xFF;

/// Position of `ch` in [`ALPHABET`], if present
pub fn alphabet_position(ch: char) -> Option<usize> {
    ALPHABET.chars().position(|c| c == ch)
}

/// Glyph record index for `ch`
///
/// Computed as `90 - position`, clamped to `0..=90`. Characters outside the
/// alphabet count as position `-1` and therefore clamp to 90.
pub fn glyph_index(ch: char) -> usize {
    let position = alphabet_position(ch).map_or(-1, |p| p as i64);
    (LAST_GLYPH_INDEX as i64 - position).clamp(0, LAST_GLYPH_INDEX as i64) as usize
}

/// Byte offset of glyph record `index`
pub const fn record_offset(index: usize) -> u64 {
    GLYPH_TABLE_OFFSET + (index * GLYPH_RECORD_LEN) as u64
}

/// Byte offset of strip `strip` of glyph record `index`
///
/// Strips are stored bottom first, so strip 0 sits 64 bytes into the record.
pub const fn strip_offset(index: usize, strip: usize) -> u64 {
    record_offset(index) + (64 - strip * STRIP_LEN) as u64
}

/// An 8x8 monochrome glyph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Glyph {
    bits: u64,
}

impl Glyph {
    /// A glyph with no lit cells
    pub const BLANK: Self = Self { bits: 0 };

    /// Build a glyph from lit cell indices; indices outside `0..64` are ignored
    pub fn from_cells(cells: impl IntoIterator<Item = usize>) -> Self {
        let bits = cells
            .into_iter()
            .filter(|&cell| cell < SIZE * SIZE)
            .fold(0u64, |bits, cell| bits | (1 << cell));
        Self { bits }
    }

    /// Decode a raw 80-byte font record
    ///
    /// `record` is in file order, bottom strip first.
    pub fn from_record(record: &[u8; GLYPH_RECORD_LEN]) -> Self {
        let mut bits = 0u64;
        for strip in 0..GLYPH_STRIPS {
            let start = 64 - strip * STRIP_LEN;
            let strip_bytes = &record[start..start + STRIP_LEN];
            for (pixel, pair) in strip_bytes.chunks_exact(2).enumerate() {
                if pair[0] == LIT {
                    bits |= 1 << (strip * SIZE + pixel);
                }
            }
        }
        Self { bits }
    }

    /// Whether glyph cell `cell` is lit; cells outside `0..64` are background
    pub const fn is_lit(&self, cell: usize) -> bool {
        cell < SIZE * SIZE && self.bits & (1 << cell) != 0
    }

    /// Whether the cell at `(row, col)` is lit
    pub const fn is_lit_at(&self, row: usize, col: usize) -> bool {
        row < SIZE && col < SIZE && self.is_lit(row * SIZE + col)
    }

    /// Whether pixel `line_pos` of scroll line `line` is lit
    ///
    /// Scroll lines are glyph strips read top-down, so `line_pos` 0 is the
    /// last pixel of the strip.
    pub const fn is_lit_on_line(&self, line: usize, line_pos: usize) -> bool {
        line < SIZE && line_pos < SIZE && self.is_lit(line * SIZE + (SIZE - 1 - line_pos))
    }

    /// Number of lit cells
    pub const fn lit_count(&self) -> u32 {
        self.bits.count_ones()
    }
}

/// Resolves characters to glyphs from a font resource
///
/// The resource is only read; one store can serve any number of lookups.
#[derive(Debug)]
pub struct GlyphStore<F> {
    font: F,
}

impl<F: FontSource> GlyphStore<F> {
    /// Create a store over `font`
    pub fn new(font: F) -> Self {
        Self { font }
    }

    /// Load the glyph for `ch`
    ///
    /// Unknown characters resolve to the last record instead of failing.
    ///
    /// # Errors
    ///
    /// Returns the font's error if the record cannot be read.
    pub fn lookup(&mut self, ch: char) -> Result<Glyph, F::Error> {
        let index = glyph_index(ch);
        let mut record = [0u8; GLYPH_RECORD_LEN];
        self.font.read_exact_at(record_offset(index), &mut record)?;
        log::trace!("glyph {ch:?} -> record {index}");
        Ok(Glyph::from_record(&record))
    }

    /// Borrow the underlying font resource
    pub fn font(&self) -> &F {
        &self.font
    }

    /// Consume the store, returning the font resource
    pub fn into_inner(self) -> F {
        self.font
    }
}
