//! Lossy downscaling of occupancy masks into fixed-size grids.
//!
//! Rescaling maps every mask cell into exactly one output cell via forward
//! `floor` scaling on both axes, and an output cell is set when *any* of its
//! source cells is set. This keeps "some non-blank content here" visible no
//! matter how aggressive the reduction is; blank output cells are genuinely
//! blank regions of the buffer.
//!
//! The binning is integer arithmetic throughout: `out = in * output / source`
//! with the division last, so no ratio can round an output row out of
//! existence.

use crate::mask::Mask;
use tracing::trace;

/// Dense row-major boolean grid produced by [`rescale`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell lookup; positions beyond the grid edge read as blank, which is
    /// what block tiling relies on for partial blocks.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            false
        }
    }

    fn set(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = true;
    }
}

/// Rescale a mask into an `output_rows x output_cols` grid by OR-reduction.
///
/// Callers are expected to have already capped the output extents at the
/// source extents (see `EncodeOptions`), so each source cell maps to exactly
/// one output cell and upscaling never occurs. A zero extent on either axis
/// of the mask or of the request yields an all-blank grid of the requested
/// size.
pub fn rescale(mask: &Mask, output_rows: usize, output_cols: usize) -> Grid {
    let source_rows = mask.source_rows();
    let source_cols = mask.source_cols();
    let mut grid = Grid::new(output_rows, output_cols);

    if source_rows == 0 || source_cols == 0 || output_rows == 0 || output_cols == 0 {
        return grid;
    }

    trace!(
        source_rows,
        source_cols,
        output_rows,
        output_cols,
        "rescaling mask"
    );

    for (row, cells) in mask.rows().iter().enumerate() {
        let out_row = row * output_rows / source_rows;
        for (col, &occupied) in cells.iter().enumerate() {
            if occupied {
                let out_col = col * output_cols / source_cols;
                grid.set(out_row, out_col);
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_rows(grid: &Grid) -> Vec<Vec<bool>> {
        (0..grid.rows())
            .map(|r| (0..grid.cols()).map(|c| grid.get(r, c)).collect())
            .collect()
    }

    fn t(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == 't').collect()
    }

    #[test]
    fn identity_when_extents_match() {
        let mask = Mask::from_lines(&["ab", " b"], 8);
        let grid = rescale(&mask, 2, 2);
        assert_eq!(grid_rows(&grid), vec![t("tt"), t("ft")]);
    }

    #[test]
    fn or_reduction_preserves_any_content() {
        // Two source rows fold into one output row; content from either
        // survives.
        let mask = Mask::from_lines(&["a ", " b"], 8);
        let grid = rescale(&mask, 1, 2);
        assert_eq!(grid_rows(&grid), vec![t("tt")]);
    }

    #[test]
    fn worked_example_grid() {
        let mask = Mask::from_lines(&["aaaaa", " b b", "", " d d", "e e"], 8);
        let grid = rescale(&mask, 3, 4);
        assert_eq!(grid_rows(&grid), vec![t("tttt"), t("tftf"), t("ttff")]);
    }

    #[test]
    fn jagged_rows_pad_with_blank() {
        let mask = Mask::from_lines(&["abcd", "a"], 8);
        let grid = rescale(&mask, 2, 4);
        assert_eq!(grid_rows(&grid), vec![t("tttt"), t("tfff")]);
    }

    #[test]
    fn zero_source_rows() {
        let mask = Mask::from_lines::<&str>(&[], 8);
        let grid = rescale(&mask, 0, 0);
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.cols(), 0);
    }

    #[test]
    fn blank_only_mask_keeps_requested_extent() {
        let mask = Mask::from_lines(&["   ", "   "], 8);
        let grid = rescale(&mask, 2, 3);
        assert_eq!(grid_rows(&grid), vec![t("fff"), t("fff")]);
    }

    #[test]
    fn every_output_row_receives_a_bin_at_extreme_ratios() {
        // Regression pin for the forward-binning formula: with two source
        // rows and two output rows, each source row must land in its own
        // output row no matter how the ratio was computed.
        let mask = Mask::from_lines(&["a", "b"], 8);
        let grid = rescale(&mask, 2, 1);
        assert_eq!(grid_rows(&grid), vec![t("t"), t("t")]);

        // And under reduction, the last source row always lands in the last
        // output row: floor((n-1) * out / n) == out - 1 for out <= n.
        for source_rows in 1..60usize {
            for output_rows in 1..=source_rows {
                assert_eq!(
                    (source_rows - 1) * output_rows / source_rows,
                    output_rows - 1,
                    "source {source_rows} output {output_rows}"
                );
            }
        }
    }

    #[test]
    fn out_of_bounds_reads_are_blank() {
        let mask = Mask::from_lines(&["a"], 8);
        let grid = rescale(&mask, 1, 1);
        assert!(grid.get(0, 0));
        assert!(!grid.get(5, 5));
    }
}
