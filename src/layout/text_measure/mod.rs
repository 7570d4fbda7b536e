//! Text measurement for terminal rendering.
//!
//! Provides Unicode-aware width measurement, ANSI escape sequence scanning,
//! width-bounded truncation and wrapping.
//!
//! # Capabilities
//!
//! - **Width calculation**: terminal cell width for any Unicode text
//! - **Escape runs**: CSI, OSC, DCS and two-byte sequences measure as zero
//!   and pass through layout untouched; malformed ones are plain text
//! - **Grapheme awareness**: never breaks inside a grapheme cluster
//! - **Emoji sequences**: ZWJ families, skin tones, flags and keycaps are
//!   corrected through an overridable table
//! - **Text wrapping**: character-break and word-break modes
//! - **Text truncation**: middle truncation with `" … "`, end truncation
//!   with a configurable suffix
//!
//! # Implementation
//!
//! Uses `unicode-width` (East Asian Width tables) and `unicode-segmentation`
//! (UAX #29 grapheme and word boundaries) as the foundation. Every width is
//! scaled by the [`FontMetrics`](crate::metrics::FontMetrics) in use.

mod ansi;
mod classify;
mod corrections;
mod truncate;
mod width;
mod wrap;

pub use ansi::{Run, Runs, scan, strip_ansi};
pub use classify::{GlyphClass, classify};
pub use corrections::{ClusterKind, ClusterTraits, CorrectionTable};
pub use truncate::{ELLIPSIS_MARKER, truncate_end, truncate_middle};
pub use width::{
    WidthMeasurement, char_width, grapheme_width, is_line_separator, measure_runs, split_lines,
    string_width, strip_line_separators,
};
pub use wrap::{measure_text_height, wrap_text, wrap_text_word};
