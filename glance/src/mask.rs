//! Occupancy masks derived from buffer text.
//!
//! A [`Mask`] records, per line and per display column, whether something
//! non-blank occupies that cell. It is the first stage of the rasterization
//! pipeline: everything downstream operates on booleans and never sees the
//! original text.
//!
//! Tabs are expanded to the next tab stop before classification so that
//! indented code keeps its visual shape in the overview. Classification is
//! per Unicode codepoint, not per byte, so a multi-byte character occupies
//! exactly one cell.

/// Boolean occupancy grid, one row per input line.
///
/// Rows are jagged: each row is as long as its (tab-expanded) source line,
/// and the rescaler treats missing trailing cells as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    rows: Vec<Vec<bool>>,
}

impl Mask {
    /// Build a mask from text lines.
    ///
    /// Empty lines produce empty rows; empty input produces an empty mask.
    /// Never fails.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], tab_width: usize) -> Self {
        let rows = lines
            .iter()
            .map(|line| occupancy_row(line.as_ref(), tab_width))
            .collect();
        Self { rows }
    }

    /// Build a mask from raw byte lines.
    ///
    /// Lines that are valid UTF-8 are classified per codepoint like
    /// [`Mask::from_lines`]. A line with an invalid encoding is recovered by
    /// falling back to whole-byte classification for that line (one cell per
    /// byte, ASCII whitespace counts as blank, no tab expansion).
    pub fn from_byte_lines<B: AsRef<[u8]>>(lines: &[B], tab_width: usize) -> Self {
        let rows = lines
            .iter()
            .map(|line| {
                let bytes = line.as_ref();
                match std::str::from_utf8(bytes) {
                    Ok(text) => occupancy_row(text, tab_width),
                    Err(_) => bytes.iter().map(|b| !b.is_ascii_whitespace()).collect(),
                }
            })
            .collect();
        Self { rows }
    }

    /// Number of source lines.
    pub fn source_rows(&self) -> usize {
        self.rows.len()
    }

    /// Maximum (tab-expanded) row length across the mask.
    pub fn source_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }
}

/// Classify one line into occupancy cells, expanding tabs as it goes.
///
/// A tab advances the cell position to the next multiple of `tab_width`,
/// filling the skipped cells with blanks. A zero tab width degrades to
/// treating the tab as a single blank cell.
fn occupancy_row(line: &str, tab_width: usize) -> Vec<bool> {
    let mut cells = Vec::with_capacity(line.len());
    for ch in line.chars() {
        if ch == '\t' {
            let next_stop = if tab_width == 0 {
                cells.len() + 1
            } else {
                (cells.len() / tab_width + 1) * tab_width
            };
            cells.resize(next_stop, false);
        } else {
            cells.push(!ch.is_whitespace());
        }
    }
    cells
}
