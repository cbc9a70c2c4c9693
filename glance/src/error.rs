//! Error types for the overview engine.
//!
//! Only configuration mistakes are hard errors: a symbol table whose
//! cardinality does not match its resolution, a non-positive resolution, or
//! an unknown preset name. These are programming errors and surface
//! immediately, before any encoding runs.
//!
//! Degenerate inputs (empty buffers, zero-width targets) are not errors --
//! they arise routinely from ordinary host states and are absorbed into
//! well-defined empty outputs by the components themselves.

use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while configuring the overview engine
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum Error {
    /// Symbol table cardinality does not match its resolution
    #[snafu(display(
        "symbol table has {got} entries but a {rows}x{cols} resolution requires {expected}"
    ))]
    SymbolCount {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },

    /// Symbol resolution outside the supported range
    #[snafu(display("symbol resolution must be 1..={max_cells} cells, got {rows}x{cols}"))]
    Resolution {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },

    /// Symbol preset name not recognized
    #[snafu(display("unknown symbol preset {name:?}"))]
    UnknownPreset { name: String },
}
