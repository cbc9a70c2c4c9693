//! Cached scale factors for O(1) line <-> row conversion.
//!
//! Every rasterization produces a [`ScaleCache`] alongside its rows; the two
//! are bundled so the cache can never describe a different frame than the one
//! on screen. Consumers (scrollbar placement, jump-to-line) convert through
//! the cache without re-running the pipeline.
//!
//! The forward conversion uses the same integer binning as the rescaler
//! (`(line - 1) * rescaled_rows / source_rows`, division last), so a line
//! always maps to the rendered row it was actually drawn on.
//!
//! The two conversions are deliberately *not* exact inverses: the forward
//! mapping is many-to-one under downscaling, so composing them can move a
//! position by up to `resolution_row * ceil(source_rows / rescaled_rows)`
//! source lines. Tests assert that bound, not equality.

/// Scale factors of the most recent rasterization.
///
/// All line and row numbers here are 1-based, matching editor-facing line
/// numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleCache {
    /// Lines in the source buffer.
    pub source_rows: usize,
    /// Rows of the rescaled grid (<= `source_rows`).
    pub rescaled_rows: usize,
    /// Grid rows per rendered row (the symbol resolution's row count).
    pub resolution_row: usize,
    /// Rows in the rendered output.
    pub rendered_rows: usize,
}

impl ScaleCache {
    /// Map a 1-based source line to the 1-based rendered row it falls in.
    ///
    /// Degenerate single-line or empty buffers behave as identity (always
    /// row 1); otherwise the result is clamped to `1..=rendered_rows`.
    pub fn source_to_rendered(&self, source_line: usize) -> usize {
        if self.source_rows == 0 {
            return 1;
        }
        let rescaled_row =
            source_line.saturating_sub(1) * self.rescaled_rows / self.source_rows + 1;
        let rendered_row = (rescaled_row - 1) / self.resolution_row.max(1) + 1;
        rendered_row.clamp(1, self.rendered_rows.max(1))
    }

    /// Map a 1-based rendered row back to the first 1-based source line that
    /// maps into it.
    pub fn rendered_to_source(&self, rendered_row: usize) -> usize {
        if self.source_rows == 0 || self.rescaled_rows == 0 {
            return 1;
        }
        let rescaled_row = rendered_row.saturating_sub(1) * self.resolution_row.max(1) + 1;
        let source_line =
            ((rescaled_row - 1) * self.source_rows).div_ceil(self.rescaled_rows) + 1;
        source_line.clamp(1, self.source_rows)
    }

    /// Worst-case drift, in source lines, of a round trip through both
    /// conversions.
    pub fn round_trip_bound(&self) -> usize {
        if self.rescaled_rows == 0 {
            return self.source_rows.max(1);
        }
        self.resolution_row.max(1) * self.source_rows.div_ceil(self.rescaled_rows)
    }
}
