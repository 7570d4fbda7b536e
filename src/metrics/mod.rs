//! Font metrics: how many columns a glyph occupies on the rendering target.
//!
//! All width decisions flow through one [`FontMetrics`] source. The
//! process-wide source is created lazily on the first measurement, exactly
//! once, and is immutable afterwards:
//!
//! ```text
//! first measure() ──► METRICS.get_or_init ──► MetricsConfig::load()
//!                          │                       │
//!                          │              Ok ──────┴────── Err
//!                          ▼               │                │
//!                    &'static dyn      TableMetrics    Unavailable
//!                    FontMetrics       (stored)        (stored, every
//!                                                       later call fails)
//! ```
//!
//! Call [`install_metrics`] before the first measurement to use a custom
//! source. Tests build a [`TextLayout`](crate::TextLayout) over a local
//! [`TableMetrics`] instead of touching the global.

mod config;

pub use config::{
    AMBIGUOUS_ENV, AmbiguousWidth, CONFIG_PATH_ENV, MetricsConfig, MetricsError, WIDE_COLUMNS_ENV,
};

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::{LayoutError, Result};
use crate::layout::text_measure::{CorrectionTable, GlyphClass};

/// Source of truth for glyph column counts.
pub trait FontMetrics: Send + Sync {
    /// Columns occupied by a narrow glyph.
    fn narrow_columns(&self) -> usize {
        1
    }

    /// Columns occupied by a wide glyph.
    fn wide_columns(&self) -> usize {
        2
    }

    /// Whether East Asian ambiguous characters render wide.
    fn ambiguous_wide(&self) -> bool {
        false
    }

    /// Corrections for composite grapheme clusters.
    fn corrections(&self) -> &CorrectionTable;

    #[inline]
    fn columns(&self, class: GlyphClass) -> usize {
        match class {
            GlyphClass::Zero => 0,
            GlyphClass::Narrow => self.narrow_columns(),
            GlyphClass::Wide => self.wide_columns(),
        }
    }
}

/// Table-driven metrics: Unicode East Asian Width plus a correction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetrics {
    narrow_columns: usize,
    wide_columns: usize,
    ambiguous_wide: bool,
    corrections: CorrectionTable,
}

impl Default for TableMetrics {
    fn default() -> Self {
        Self {
            narrow_columns: 1,
            wide_columns: 2,
            ambiguous_wide: false,
            corrections: CorrectionTable::builtin(),
        }
    }
}

impl TableMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build metrics from configuration, layering overrides on the built-in
    /// correction table.
    pub fn from_config(config: &MetricsConfig) -> std::result::Result<Self, MetricsError> {
        config.validate()?;

        let mut corrections = CorrectionTable::builtin();
        for (kind, class) in config.kind_overrides()? {
            corrections = corrections.with_kind(kind, class);
        }
        for (sequence, columns) in &config.sequences {
            corrections = corrections.with_sequence(sequence.clone(), *columns);
        }

        Ok(Self {
            narrow_columns: config.narrow_columns,
            wide_columns: config.wide_columns,
            ambiguous_wide: config.ambiguous == AmbiguousWidth::Wide,
            corrections,
        })
    }

    pub fn with_columns(mut self, narrow: usize, wide: usize) -> Self {
        self.narrow_columns = narrow;
        self.wide_columns = wide;
        self
    }

    pub fn with_ambiguous_wide(mut self, wide: bool) -> Self {
        self.ambiguous_wide = wide;
        self
    }

    pub fn with_corrections(mut self, corrections: CorrectionTable) -> Self {
        self.corrections = corrections;
        self
    }
}

impl FontMetrics for TableMetrics {
    fn narrow_columns(&self) -> usize {
        self.narrow_columns
    }

    fn wide_columns(&self) -> usize {
        self.wide_columns
    }

    fn ambiguous_wide(&self) -> bool {
        self.ambiguous_wide
    }

    fn corrections(&self) -> &CorrectionTable {
        &self.corrections
    }
}

type Slot = std::result::Result<Box<dyn FontMetrics>, LayoutError>;

/// A once-initialised metrics holder.
///
/// The first caller of [`get_or_init`](Self::get_or_init) or
/// [`install`](Self::install) decides the contents. Racing initialisers may
/// run, but only one result is stored and every caller observes it.
pub struct MetricsCell {
    slot: OnceLock<Slot>,
}

impl Default for MetricsCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetricsCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.get() {
            None => "uninitialized",
            Some(Ok(_)) => "ready",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("MetricsCell").field("state", &state).finish()
    }
}

impl MetricsCell {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Store `metrics` if nothing has been stored yet.
    pub fn install(&self, metrics: Box<dyn FontMetrics>) -> Result<()> {
        self.slot
            .set(Ok(metrics))
            .map_err(|_| LayoutError::AlreadyInitialized)?;
        debug!("text metrics installed");
        Ok(())
    }

    /// The stored metrics, running `init` if the cell is empty.
    ///
    /// A failed `init` is stored too: later calls return
    /// [`LayoutError::Unavailable`] without retrying.
    pub fn get_or_init<F>(&self, init: F) -> Result<&dyn FontMetrics>
    where
        F: FnOnce() -> std::result::Result<Box<dyn FontMetrics>, MetricsError>,
    {
        let slot = self.slot.get_or_init(|| match init() {
            Ok(metrics) => {
                debug!(
                    narrow = metrics.narrow_columns(),
                    wide = metrics.wide_columns(),
                    ambiguous_wide = metrics.ambiguous_wide(),
                    "text metrics initialised"
                );
                Ok(metrics)
            }
            Err(err) => {
                warn!(error = %err, "text metrics initialisation failed");
                Err(err.into())
            }
        });
        match slot {
            Ok(metrics) => Ok(metrics.as_ref()),
            Err(err) => Err(err.clone()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

static METRICS: MetricsCell = MetricsCell::new();

fn load_default() -> std::result::Result<Box<dyn FontMetrics>, MetricsError> {
    let config = MetricsConfig::load()?;
    Ok(Box::new(TableMetrics::from_config(&config)?))
}

/// Install process-wide metrics. Fails once metrics have been initialised.
pub fn install_metrics(metrics: impl FontMetrics + 'static) -> Result<()> {
    METRICS.install(Box::new(metrics))
}

/// The process-wide metrics, initialised from [`MetricsConfig::load`] on
/// first use.
pub fn global_metrics() -> Result<&'static dyn FontMetrics> {
    METRICS.get_or_init(load_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tracing_test::traced_test;

    use crate::layout::text_measure::ClusterKind;

    #[test]
    fn default_table_metrics() {
        let metrics = TableMetrics::default();
        assert_eq!(metrics.columns(GlyphClass::Zero), 0);
        assert_eq!(metrics.columns(GlyphClass::Narrow), 1);
        assert_eq!(metrics.columns(GlyphClass::Wide), 2);
        assert!(!metrics.ambiguous_wide());
    }

    #[test]
    fn from_config_applies_overrides() {
        let config = MetricsConfig::from_toml_str(
            "ambiguous = \"wide\"\n[kinds]\nzwj = \"narrow\"\n[sequences]\n\"ab\" = 7\n",
        )
        .unwrap();
        let metrics = TableMetrics::from_config(&config).unwrap();
        assert!(metrics.ambiguous_wide());
        assert_eq!(metrics.corrections().sequence("ab"), Some(7));
        let zwj = metrics
            .corrections()
            .kind_for(crate::layout::text_measure::ClusterTraits::ZWJ);
        assert_eq!(zwj, Some((ClusterKind::Zwj, GlyphClass::Narrow)));
    }

    #[test]
    #[traced_test]
    fn cell_initialises_once() {
        let cell = MetricsCell::new();
        let calls = AtomicUsize::new(0);
        let init = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TableMetrics::default()) as Box<dyn FontMetrics>)
        };

        assert!(!cell.is_initialized());
        assert_eq!(cell.get_or_init(init).unwrap().wide_columns(), 2);
        assert_eq!(cell.get_or_init(init).unwrap().wide_columns(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(logs_contain("text metrics initialised"));
    }

    #[test]
    #[traced_test]
    fn failed_init_is_sticky() {
        let cell = MetricsCell::new();
        let err = cell
            .get_or_init(|| Err(MetricsError::ZeroColumns { field: "wide_columns" }))
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::Unavailable(_)));
        assert!(logs_contain("text metrics initialisation failed"));

        // A later, valid initialiser is never consulted.
        let again = cell
            .get_or_init(|| Ok(Box::new(TableMetrics::default()) as Box<dyn FontMetrics>))
            .err()
            .unwrap();
        assert_eq!(again, err);
    }

    #[test]
    fn install_after_init_rejected() {
        let cell = MetricsCell::new();
        cell.install(Box::new(TableMetrics::default().with_columns(1, 3)))
            .unwrap();
        let err = cell.install(Box::new(TableMetrics::default())).unwrap_err();
        assert_eq!(err, LayoutError::AlreadyInitialized);

        let metrics = cell
            .get_or_init(|| Ok(Box::new(TableMetrics::default()) as Box<dyn FontMetrics>))
            .unwrap();
        assert_eq!(metrics.wide_columns(), 3);
    }

    #[test]
    fn racing_threads_agree() {
        let cell = Arc::new(MetricsCell::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    let metrics = cell
                        .get_or_init(move || {
                            Ok(Box::new(TableMetrics::default().with_columns(1, 2 + i))
                                as Box<dyn FontMetrics>)
                        })
                        .unwrap();
                    metrics.wide_columns()
                })
            })
            .collect();

        let seen: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seen.windows(2).all(|w| w[0] == w[1]), "{seen:?}");
    }
}
