//! Width-bounded truncation.
//!
//! Two shapes:
//! - [`truncate_middle`] keeps a head and a tail around `" … "`
//! - [`truncate_end`] keeps a head followed by a suffix
//!
//! Both cut only at grapheme boundaries and never drop or split escape
//! sequences, so styling survives the cut.

use tracing::trace;

use super::ansi::{Token, tokens};
use super::width::{grapheme_width, string_width};
use crate::metrics::FontMetrics;

/// Marker inserted between head and tail.
pub const ELLIPSIS_MARKER: &str = " … ";

/// Truncate `text` to at most `limit` columns by removing its middle.
///
/// Text that fits is returned unchanged. Otherwise the budget left after the
/// marker is split between head and tail, the head taking the odd column.
/// Escape runs before the cut stay with the head; escape runs from the
/// removed middle are emitted after the marker so the tail keeps its style.
///
/// When `limit` is narrower than the marker the text is cut to `limit`
/// columns without a marker.
pub fn truncate_middle(text: &str, limit: usize, metrics: &dyn FontMetrics) -> String {
    let width = string_width(text, metrics);
    if width <= limit {
        return text.to_string();
    }

    let marker_width = string_width(ELLIPSIS_MARKER, metrics);
    if limit < marker_width {
        return cut_to_width(text, limit, "", metrics);
    }

    let budget = limit - marker_width;
    let tail_budget = budget / 2;
    let head_budget = budget - tail_budget;

    let tokens: Vec<Token<'_>> = tokens(text).collect();
    let head_end = head_extent(&tokens, head_budget, metrics);
    let tail_start = tail_extent(&tokens, tail_budget, metrics).max(head_end);

    let mut out = String::with_capacity(text.len() + ELLIPSIS_MARKER.len());
    for token in &tokens[..head_end] {
        out.push_str(token.as_str());
    }
    out.push_str(ELLIPSIS_MARKER);
    for token in &tokens[head_end..tail_start] {
        if let Token::Escape(e) = token {
            out.push_str(e);
        }
    }
    for token in &tokens[tail_start..] {
        out.push_str(token.as_str());
    }

    trace!(width, limit, head_budget, tail_budget, "truncated middle");
    out
}

/// Truncate `text` to at most `limit` columns, keeping the head and
/// appending `suffix`.
///
/// If the suffix alone is wider than `limit`, the suffix itself is cut.
pub fn truncate_end(text: &str, limit: usize, suffix: &str, metrics: &dyn FontMetrics) -> String {
    let width = string_width(text, metrics);
    if width <= limit {
        return text.to_string();
    }

    let suffix_width = string_width(suffix, metrics);
    if suffix_width > limit {
        return cut_to_width(suffix, limit, "", metrics);
    }

    trace!(width, limit, "truncated end");
    cut_to_width(text, limit - suffix_width, suffix, metrics)
}

/// Keep graphemes up to `limit` columns, insert `insert`, then every escape
/// run from the removed remainder.
fn cut_to_width(text: &str, limit: usize, insert: &str, metrics: &dyn FontMetrics) -> String {
    let tokens: Vec<Token<'_>> = tokens(text).collect();
    let head_end = head_extent(&tokens, limit, metrics);

    let mut out = String::with_capacity(text.len() + insert.len());
    for token in &tokens[..head_end] {
        out.push_str(token.as_str());
    }
    out.push_str(insert);
    for token in &tokens[head_end..] {
        if let Token::Escape(e) = token {
            out.push_str(e);
        }
    }
    out
}

/// Number of leading tokens whose graphemes fit in `budget` columns.
///
/// Escapes preceding the first grapheme that does not fit are included.
fn head_extent(tokens: &[Token<'_>], budget: usize, metrics: &dyn FontMetrics) -> usize {
    let mut used = 0;
    for (i, token) in tokens.iter().enumerate() {
        if let Token::Grapheme(g) = token {
            let w = grapheme_width(g, metrics);
            if used + w > budget {
                return i;
            }
            used += w;
        }
    }
    tokens.len()
}

/// Index of the first trailing token kept for a tail of `budget` columns.
fn tail_extent(tokens: &[Token<'_>], budget: usize, metrics: &dyn FontMetrics) -> usize {
    let mut used = 0;
    let mut start = tokens.len();
    for (i, token) in tokens.iter().enumerate().rev() {
        if let Token::Grapheme(g) = token {
            let w = grapheme_width(g, metrics);
            if used + w > budget {
                break;
            }
            used += w;
            start = i;
        }
    }
    start
}
