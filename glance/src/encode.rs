//! Rasterization entry point: text lines to symbol rows.
//!
//! [`encode`] runs the full pipeline -- mask, rescale, symbol packing -- and
//! returns a [`Rendered`] frame bundling the row strings with the
//! [`ScaleCache`] they were produced under. The two travel together so a
//! consumer can never pair rows from one frame with scale factors from
//! another.
//!
//! All defaults are resolved up front by [`EncodeOptionsBuilder`]; the
//! pipeline stages themselves never default anything. Symbol tables are
//! validated at construction ([`SymbolTable::new`]), so by the time options
//! exist they are known good and encoding cannot fail.

use crate::{
    mask::Mask,
    rescale::{rescale, Grid},
    scale::ScaleCache,
    symbols::SymbolTable,
};
use tracing::debug;

/// Output capacity along one axis, in rendered cells.
///
/// `Cells(0)` is a valid degenerate value for the column axis: it means no
/// content column is available, and rasterization collapses to
/// indicator-only rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unbounded,
    Cells(usize),
}

impl Limit {
    /// Grid extent for this limit: the source extent, capped at
    /// `cells * resolution` when bounded.
    fn cap(self, source: usize, resolution: usize) -> usize {
        match self {
            Limit::Unbounded => source,
            Limit::Cells(cells) => source.min(cells.saturating_mul(resolution)),
        }
    }

    fn is_zero(self) -> bool {
        matches!(self, Limit::Cells(0))
    }
}

/// Fully-resolved rasterization parameters.
///
/// Built once via [`EncodeOptions::builder`]; immutable per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    max_rows: Limit,
    max_cols: Limit,
    tab_width: usize,
    symbols: SymbolTable,
}

impl EncodeOptions {
    pub fn builder() -> EncodeOptionsBuilder {
        EncodeOptionsBuilder::default()
    }

    pub fn max_rows(&self) -> Limit {
        self.max_rows
    }

    pub fn max_cols(&self) -> Limit {
        self.max_cols
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder resolving all rasterization defaults in one place.
///
/// Defaults: unbounded rows and columns, tab width 8, the 3x2 sextant
/// symbol table.
#[derive(Debug, Clone)]
pub struct EncodeOptionsBuilder {
    max_rows: Limit,
    max_cols: Limit,
    tab_width: usize,
    symbols: Option<SymbolTable>,
}

impl Default for EncodeOptionsBuilder {
    fn default() -> Self {
        Self {
            max_rows: Limit::Unbounded,
            max_cols: Limit::Unbounded,
            tab_width: 8,
            symbols: None,
        }
    }
}

impl EncodeOptionsBuilder {
    /// Cap the output at `rows` rendered rows.
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Limit::Cells(rows);
        self
    }

    /// Cap the output at `cols` rendered columns. Zero selects the
    /// degenerate indicator-only mode.
    pub fn max_cols(mut self, cols: usize) -> Self {
        self.max_cols = Limit::Cells(cols);
        self
    }

    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Use a caller-supplied (already validated) symbol table.
    pub fn symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn build(self) -> EncodeOptions {
        EncodeOptions {
            max_rows: self.max_rows,
            max_cols: self.max_cols,
            tab_width: self.tab_width,
            symbols: self.symbols.unwrap_or_default(),
        }
    }
}

/// One rasterized frame: symbol rows plus the scale factors that produced
/// them. Recomputed atomically; never mix fields across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// One string per rendered row, top to bottom.
    pub rows: Vec<String>,
    /// Scale factors for line <-> row conversion against these rows.
    pub scale: ScaleCache,
}

/// Rasterize text lines into symbol rows.
pub fn encode<S: AsRef<str>>(lines: &[S], options: &EncodeOptions) -> Rendered {
    encode_mask(&Mask::from_lines(lines, options.tab_width), options)
}

/// Rasterize a pre-built mask (the byte-input path builds its mask via
/// [`Mask::from_byte_lines`] and comes through here).
pub fn encode_mask(mask: &Mask, options: &EncodeOptions) -> Rendered {
    let source_rows = mask.source_rows();
    if source_rows == 0 {
        return Rendered::default();
    }

    if options.max_cols.is_zero() || options.max_rows.is_zero() {
        return indicator_only(source_rows, options);
    }

    let resolution = options.symbols.resolution();
    let output_rows = options.max_rows.cap(source_rows, resolution.rows);
    let output_cols = options.max_cols.cap(mask.source_cols(), resolution.cols);

    let grid = rescale(mask, output_rows, output_cols);
    let rows = encode_grid(&grid, &options.symbols);

    let scale = ScaleCache {
        source_rows,
        rescaled_rows: output_rows,
        resolution_row: resolution.rows,
        rendered_rows: rows.len(),
    };
    debug!(
        source_rows,
        rescaled_rows = output_rows,
        rendered_rows = rows.len(),
        "encoded frame"
    );

    Rendered { rows, scale }
}

/// Degenerate frame for a zero-capacity request: one empty string per row
/// position, with a scale cache built from a one-column stand-in so
/// indicator placement still works.
fn indicator_only(source_rows: usize, options: &EncodeOptions) -> Rendered {
    let rescaled_rows = options.max_rows.cap(source_rows, 1);
    let scale = ScaleCache {
        source_rows,
        rescaled_rows,
        resolution_row: 1,
        rendered_rows: rescaled_rows,
    };
    debug!(source_rows, rescaled_rows, "indicator-only frame");
    Rendered {
        rows: vec![String::new(); rescaled_rows],
        scale,
    }
}

/// Pack a grid into symbol strings, one per block-row.
///
/// Blocks tile the grid from the top-left; cells beyond the grid edge read
/// as blank, which conceptually pads partial blocks at the bottom and right.
/// Within a block the top-left cell is the least significant bit of the
/// table index.
fn encode_grid(grid: &Grid, table: &SymbolTable) -> Vec<String> {
    let resolution = table.resolution();
    let block_rows = grid.rows().div_ceil(resolution.rows);
    let block_cols = grid.cols().div_ceil(resolution.cols);

    let mut rows = Vec::with_capacity(block_rows);
    for block_row in 0..block_rows {
        let mut line = String::with_capacity(block_cols * 3);
        for block_col in 0..block_cols {
            let mut index = 0usize;
            let mut bit = 0;
            for cell_row in 0..resolution.rows {
                for cell_col in 0..resolution.cols {
                    let row = block_row * resolution.rows + cell_row;
                    let col = block_col * resolution.cols + cell_col;
                    if grid.get(row, col) {
                        index |= 1 << bit;
                    }
                    bit += 1;
                }
            }
            line.push_str(table.symbol(index));
        }
        rows.push(line);
    }
    rows
}
