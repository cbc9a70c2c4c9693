//! Configuration for the overview engine, loaded from `glance.toml`.
//!
//! Every field has a default, so an empty (or absent) file yields a working
//! configuration. [`Config::encode_options`] resolves the file values into
//! validated [`EncodeOptions`]; an unknown preset name or malformed table
//! surfaces there, before any rasterization runs.

use crate::{
    encode::EncodeOptions,
    symbols::SymbolTable,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Overview configuration, deserialized from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tab stop width used when building occupancy masks.
    pub tab_width: usize,

    /// Symbol preset name (see [`SymbolTable::from_name`]).
    pub symbols: String,

    /// Maximum rendered rows; absent means unbounded.
    pub max_rows: Option<usize>,

    /// Maximum rendered columns; absent means unbounded, zero means
    /// indicator-only.
    pub max_cols: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 8,
            symbols: "block-3x2".to_string(),
            max_rows: None,
            max_cols: None,
        }
    }
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path >
    /// defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    /// Resolve into validated encode options. Fails fast on an unknown
    /// symbol preset.
    pub fn encode_options(&self) -> crate::Result<EncodeOptions> {
        let symbols = SymbolTable::from_name(&self.symbols)?;
        let mut builder = EncodeOptions::builder()
            .tab_width(self.tab_width)
            .symbols(symbols);
        if let Some(rows) = self.max_rows {
            builder = builder.max_rows(rows);
        }
        if let Some(cols) = self.max_cols {
            builder = builder.max_cols(cols);
        }
        Ok(builder.build())
    }
}
