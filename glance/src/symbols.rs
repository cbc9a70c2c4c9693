//! Symbol tables mapping cell-block bit patterns to display characters.
//!
//! A [`SymbolTable`] assigns one string to every possible boolean pattern of a
//! `rows x cols` cell block. The pattern is read left-to-right, top-to-bottom
//! with the top-left cell as the least significant bit, so a table for an
//! `r x c` resolution has exactly `2^(r*c)` entries: index 0 is the all-blank
//! block, the last index the all-filled block.
//!
//! # Presets
//!
//! Built-in tables are generated from the standard Unicode constructions:
//!
//! | name        | resolution | glyphs                               |
//! |-------------|------------|--------------------------------------|
//! | `block-1x2` | 1x2        | half blocks `▌ ▐ █`                  |
//! | `block-2x1` | 2x1        | half blocks `▀ ▄ █`                  |
//! | `block-2x2` | 2x2        | quadrants `▖ ▗ ▘ ▝ ...`              |
//! | `block-3x2` | 3x2        | sextants `🬀 ... 🬻` (the default)     |
//! | `dot-3x2`   | 3x2        | 6-dot braille                        |
//! | `dot-4x2`   | 4x2        | 8-dot braille                        |

use crate::error::{Error, Result};

/// Upper bound on cells per symbol; keeps table sizes sane (2^16 entries).
pub const MAX_CELLS: usize = 16;

/// How many grid rows and columns one symbol visually encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub rows: usize,
    pub cols: usize,
}

impl Resolution {
    /// Number of cells in one symbol block.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// A validated lookup table from block bit patterns to symbol strings.
///
/// Construction is the configuration-error surface of the engine: a table
/// that reaches the encoder is always well-formed, so validation runs once
/// here and never per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    resolution: Resolution,
    symbols: Vec<String>,
}

impl SymbolTable {
    /// Create a table, validating the resolution and entry count.
    ///
    /// Fails fast with [`Error::Resolution`] for a non-positive (or oversized)
    /// resolution and [`Error::SymbolCount`] when `symbols.len()` is not
    /// `2^(rows*cols)`.
    pub fn new(resolution: Resolution, symbols: Vec<String>) -> Result<Self> {
        if resolution.rows == 0 || resolution.cols == 0 || resolution.cells() > MAX_CELLS {
            return Err(Error::Resolution {
                rows: resolution.rows,
                cols: resolution.cols,
                max_cells: MAX_CELLS,
            });
        }
        let expected = 1usize << resolution.cells();
        if symbols.len() != expected {
            return Err(Error::SymbolCount {
                rows: resolution.rows,
                cols: resolution.cols,
                expected,
                got: symbols.len(),
            });
        }
        Ok(Self {
            resolution,
            symbols,
        })
    }

    /// Look up a preset table by name (see the module table).
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "block-1x2" => Ok(Self::block_1x2()),
            "block-2x1" => Ok(Self::block_2x1()),
            "block-2x2" => Ok(Self::block_2x2()),
            "block-3x2" => Ok(Self::block_3x2()),
            "dot-3x2" => Ok(Self::dot_3x2()),
            "dot-4x2" => Ok(Self::dot_4x2()),
            _ => Err(Error::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Symbol for a block pattern index. Indices from the encoder are always
    /// in range; out-of-range lookups fall back to a blank cell.
    pub fn symbol(&self, index: usize) -> &str {
        self.symbols.get(index).map_or(" ", String::as_str)
    }

    /// Left/right half blocks, one grid row and two columns per symbol.
    pub fn block_1x2() -> Self {
        from_chars(Resolution { rows: 1, cols: 2 }, &[' ', '▌', '▐', '█'])
    }

    /// Upper/lower half blocks, two grid rows and one column per symbol.
    pub fn block_2x1() -> Self {
        from_chars(Resolution { rows: 2, cols: 1 }, &[' ', '▀', '▄', '█'])
    }

    /// Quadrant blocks covering all 16 patterns of a 2x2 cell block.
    pub fn block_2x2() -> Self {
        from_chars(
            Resolution { rows: 2, cols: 2 },
            &[
                ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
            ],
        )
    }

    /// Sextant blocks covering all 64 patterns of a 3x2 cell block.
    ///
    /// This is the default table: the densest packing available from solid
    /// block characters.
    pub fn block_3x2() -> Self {
        let symbols = (0..64u32).map(|i| sextant(i).to_string()).collect();
        unchecked(Resolution { rows: 3, cols: 2 }, symbols)
    }

    /// 6-dot braille, one dot per cell of a 3x2 block.
    pub fn dot_3x2() -> Self {
        braille(3, &[0, 3, 1, 4, 2, 5])
    }

    /// 8-dot braille, one dot per cell of a 4x2 block.
    pub fn dot_4x2() -> Self {
        braille(4, &[0, 3, 1, 4, 2, 5, 6, 7])
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::block_3x2()
    }
}

/// Internal constructor for generated presets, which are valid by
/// construction.
fn unchecked(resolution: Resolution, symbols: Vec<String>) -> SymbolTable {
    debug_assert_eq!(symbols.len(), 1 << resolution.cells());
    SymbolTable {
        resolution,
        symbols,
    }
}

fn from_chars(resolution: Resolution, chars: &[char]) -> SymbolTable {
    unchecked(resolution, chars.iter().map(|c| c.to_string()).collect())
}

/// Sextant character for a 3x2 bit pattern.
///
/// The Symbols for Legacy Computing block assigns codepoints in binary cell
/// order starting at U+1FB00, but reuses the pre-existing half and full
/// block characters instead of duplicating them, leaving two gaps in the
/// sequence.
fn sextant(index: u32) -> char {
    const LEFT_COLUMN: u32 = 0b010101;
    const RIGHT_COLUMN: u32 = 0b101010;
    match index {
        0 => ' ',
        LEFT_COLUMN => '▌',
        RIGHT_COLUMN => '▐',
        63 => '█',
        _ => {
            let mut cp = 0x1FB00 + index - 1;
            if index > LEFT_COLUMN {
                cp -= 1;
            }
            if index > RIGHT_COLUMN {
                cp -= 1;
            }
            char::from_u32(cp).unwrap_or(' ')
        },
    }
}

/// Braille table for a `rows x 2` block.
///
/// `dot_bits[cell]` is the braille dot bit for each cell in block order;
/// braille numbers its dots down the left column first, then the right, with
/// dots 7 and 8 appended as a fourth row, so the permutation is not the
/// identity.
fn braille(rows: usize, dot_bits: &[u32]) -> SymbolTable {
    let cells = rows * 2;
    let mut symbols = Vec::with_capacity(1 << cells);
    for index in 0..(1u32 << cells) {
        let mut dots = 0;
        for (cell, bit) in dot_bits.iter().enumerate() {
            if index & (1 << cell) != 0 {
                dots |= 1 << bit;
            }
        }
        symbols.push(char::from_u32(0x2800 + dots).unwrap_or(' ').to_string());
    }
    unchecked(Resolution { rows, cols: 2 }, symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_entry_count() {
        let err = SymbolTable::new(
            Resolution { rows: 1, cols: 2 },
            vec![" ".into(), "█".into()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::SymbolCount {
                rows: 1,
                cols: 2,
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn rejects_zero_resolution() {
        let err = SymbolTable::new(Resolution { rows: 0, cols: 2 }, vec![]).unwrap_err();
        assert!(matches!(err, Error::Resolution { rows: 0, cols: 2, .. }));
    }

    #[test]
    fn rejects_oversized_resolution() {
        let err = SymbolTable::new(Resolution { rows: 5, cols: 4 }, vec![]).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn unknown_preset_name() {
        let err = SymbolTable::from_name("block-9x9").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownPreset {
                name: "block-9x9".into()
            }
        );
    }

    #[test]
    fn half_block_table_matches_expected_glyphs() {
        let table = SymbolTable::block_1x2();
        assert_eq!(table.symbol(0), " ");
        assert_eq!(table.symbol(1), "▌");
        assert_eq!(table.symbol(2), "▐");
        assert_eq!(table.symbol(3), "█");
    }

    #[test]
    fn sextant_reuses_half_and_full_blocks() {
        let table = SymbolTable::block_3x2();
        assert_eq!(table.symbol(0), " ");
        assert_eq!(table.symbol(0b010101), "▌");
        assert_eq!(table.symbol(0b101010), "▐");
        assert_eq!(table.symbol(63), "█");
    }

    #[test]
    fn sextant_sequence_skips_reused_codepoints() {
        let table = SymbolTable::block_3x2();
        // First and last codepoints of the legacy computing sextant run.
        assert_eq!(table.symbol(1), "\u{1FB00}");
        assert_eq!(table.symbol(62), "\u{1FB3B}");
        // After the left-column gap the sequence continues without a hole.
        assert_eq!(table.symbol(20), "\u{1FB13}");
        assert_eq!(table.symbol(22), "\u{1FB14}");
    }

    #[test]
    fn braille_permutes_dot_bits() {
        let table = SymbolTable::dot_4x2();
        assert_eq!(table.symbol(0), "\u{2800}");
        // Top-left cell is braille dot 1, top-right is dot 4.
        assert_eq!(table.symbol(0b01), "\u{2801}");
        assert_eq!(table.symbol(0b10), "\u{2808}");
        // Bottom row maps to dots 7 and 8.
        assert_eq!(table.symbol(0b0100_0000), "\u{2840}");
        assert_eq!(table.symbol(0b1000_0000), "\u{2880}");
        assert_eq!(table.symbol(0xFF), "\u{28FF}");
    }

    #[test]
    fn braille_six_dot_table() {
        let table = SymbolTable::dot_3x2();
        assert_eq!(table.resolution().cells(), 6);
        assert_eq!(table.symbol(0b111111), "\u{283F}");
    }

    #[test]
    fn default_is_sextant_table() {
        let table = SymbolTable::default();
        assert_eq!(
            table.resolution(),
            Resolution { rows: 3, cols: 2 }
        );
    }

    #[test]
    fn preset_lookup_round_trips_names() {
        for name in [
            "block-1x2",
            "block-2x1",
            "block-2x2",
            "block-3x2",
            "dot-3x2",
            "dot-4x2",
        ] {
            assert!(SymbolTable::from_name(name).is_ok(), "preset {name}");
        }
    }
}
