//! # spark-text
//!
//! Terminal text layout for Rust.
//!
//! Measures, truncates, wraps and centers text the way a terminal displays
//! it: wide East Asian glyphs take two columns, emoji sequences take one
//! wide cell, and ANSI escape sequences take none.
//!
//! ## Architecture
//!
//! ```text
//! text ──► escape scanner ──► grapheme clusters ──► classifier ──► columns
//!                                                       │
//!                                         FontMetrics (narrow / wide
//!                                         columns, correction table)
//! ```
//!
//! Every width decision flows through a [`FontMetrics`] source. The free
//! functions ([`measure`], [`truncate`], [`wrap`], [`center`]) use the
//! process-wide source, configured from `SPARK_TEXT_*` environment variables
//! on first use; [`TextLayout`] binds the same operations to any source.
//!
//! ## Modules
//!
//! - [`layout`] - Width measurement, truncation, wrapping, centering, borders
//! - [`metrics`] - Font metrics, configuration, process-wide source
//! - [`renderable`] - Content with a `(columns, rows)` layout contract
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use spark_text::{TableMetrics, TextLayout};
//!
//! let metrics = TableMetrics::default();
//! let layout = TextLayout::new(&metrics);
//!
//! assert_eq!(layout.measure("한글"), 4);
//! assert_eq!(layout.truncate("⮕⮕⮕⮕", 7), "⮕ … ⮕");
//! assert_eq!(layout.wrap("abcdef", 4).unwrap(), vec!["abcd", "ef"]);
//! ```

pub mod error;
pub mod layout;
pub mod metrics;
pub mod renderable;

pub use error::{LayoutError, Result};

pub use layout::{
    BorderStyle, Centerable, TextLayout, center, measure, truncate, wrap,
    text_measure::{ELLIPSIS_MARKER, strip_ansi},
};

pub use metrics::{
    FontMetrics, MetricsConfig, MetricsError, TableMetrics, global_metrics, install_metrics,
};

pub use renderable::{Composite, Renderable};
