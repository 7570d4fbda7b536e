//! Metrics configuration.
//!
//! Loaded once, when the process-wide metrics are first needed:
//!
//! 1. `SPARK_TEXT_METRICS` names an optional TOML file.
//! 2. `SPARK_TEXT_AMBIGUOUS` (`narrow` | `wide`) and
//!    `SPARK_TEXT_WIDE_COLUMNS` override the file.
//!
//! ```toml
//! narrow_columns = 1
//! wide_columns = 2
//! ambiguous = "narrow"
//!
//! [kinds]
//! regional_pair = "narrow"
//!
//! [sequences]
//! "👁️‍🗨️" = 4
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::LayoutError;
use crate::layout::text_measure::{ClusterKind, GlyphClass};

pub const CONFIG_PATH_ENV: &str = "SPARK_TEXT_METRICS";
pub const AMBIGUOUS_ENV: &str = "SPARK_TEXT_AMBIGUOUS";
pub const WIDE_COLUMNS_ENV: &str = "SPARK_TEXT_WIDE_COLUMNS";

/// Errors raised while building metrics from configuration.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to read metrics config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metrics config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{field} must be at least 1 column")]
    ZeroColumns { field: &'static str },

    #[error("wide_columns ({wide}) is smaller than narrow_columns ({narrow})")]
    WideNarrowerThanNarrow { narrow: usize, wide: usize },

    #[error("unknown cluster kind {0:?}")]
    UnknownKind(String),
}

impl From<MetricsError> for LayoutError {
    fn from(err: MetricsError) -> Self {
        LayoutError::Unavailable(err.to_string())
    }
}

/// How East Asian ambiguous characters are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousWidth {
    #[default]
    Narrow,
    Wide,
}

impl AmbiguousWidth {
    fn parse(var: &'static str, value: &str) -> Result<Self, MetricsError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "narrow" | "1" => Ok(Self::Narrow),
            "wide" | "2" => Ok(Self::Wide),
            _ => Err(MetricsError::InvalidEnv {
                var,
                value: value.to_string(),
            }),
        }
    }
}

/// Column counts and correction overrides for the rendering target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub narrow_columns: usize,
    pub wide_columns: usize,
    pub ambiguous: AmbiguousWidth,
    /// Cluster kind corrections replacing the built-in entries, keyed by
    /// kind name (`zwj`, `regional_pair`, `keycap`, ...).
    pub kinds: BTreeMap<String, GlyphClass>,
    /// Exact cluster overrides in columns.
    pub sequences: BTreeMap<String, usize>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            narrow_columns: 1,
            wide_columns: 2,
            ambiguous: AmbiguousWidth::Narrow,
            kinds: BTreeMap::new(),
            sequences: BTreeMap::new(),
        }
    }
}

impl MetricsConfig {
    /// Load from the file named by `SPARK_TEXT_METRICS` (if any), then apply
    /// environment overrides.
    pub fn load() -> Result<Self, MetricsError> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, MetricsError> {
        debug!(path = %path.display(), "loading text metrics config");
        let raw = fs::read_to_string(path).map_err(|source| MetricsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, MetricsError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides, reading variables through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), MetricsError> {
        if let Some(value) = lookup(AMBIGUOUS_ENV) {
            self.ambiguous = AmbiguousWidth::parse(AMBIGUOUS_ENV, &value)?;
        }
        if let Some(value) = lookup(WIDE_COLUMNS_ENV) {
            self.wide_columns = value.trim().parse().map_err(|_| MetricsError::InvalidEnv {
                var: WIDE_COLUMNS_ENV,
                value: value.clone(),
            })?;
        }
        Ok(())
    }

    /// Kind overrides with their names resolved.
    pub fn kind_overrides(&self) -> Result<Vec<(ClusterKind, GlyphClass)>, MetricsError> {
        self.kinds
            .iter()
            .map(|(name, class)| {
                ClusterKind::from_name(name)
                    .map(|kind| (kind, *class))
                    .ok_or_else(|| MetricsError::UnknownKind(name.clone()))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.narrow_columns == 0 {
            return Err(MetricsError::ZeroColumns {
                field: "narrow_columns",
            });
        }
        if self.wide_columns == 0 {
            return Err(MetricsError::ZeroColumns {
                field: "wide_columns",
            });
        }
        if self.wide_columns < self.narrow_columns {
            return Err(MetricsError::WideNarrowerThanNarrow {
                narrow: self.narrow_columns,
                wide: self.wide_columns,
            });
        }
        self.kind_overrides()?;
        Ok(())
    }
}
