//! Text wrapping for terminal layout.
//!
//! Provides two wrapping modes:
//! - **Character-break** (`wrap_text`): breaks at any grapheme boundary
//! - **Word-break** (`wrap_text_word`): breaks at word boundaries, falls
//!   back to grapheme-break for words wider than the line
//!
//! Both modes:
//! - Treat line separators (`\n`, `\r\n`, `\r`, NEL, LS, PS) as hard breaks
//! - Never split an escape sequence; an escape run travels with the
//!   grapheme that follows it
//! - Fail with [`LayoutError::InvalidArgument`] for a zero width

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{Run, Runs, Token, tokens};
use super::width::{grapheme_width, split_lines};
use crate::error::{LayoutError, Result};
use crate::metrics::FontMetrics;

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(LayoutError::invalid("limit", "wrap width must be positive"));
    }
    Ok(())
}

/// Accumulates one output line.
#[derive(Default)]
struct LineBuilder {
    current: String,
    width: usize,
    /// Escape runs waiting for the next grapheme.
    pending: String,
}

impl LineBuilder {
    fn push_escape(&mut self, escape: &str) {
        self.pending.push_str(escape);
    }

    /// Append a grapheme, breaking first if it would overflow `limit`.
    fn push_grapheme(&mut self, grapheme: &str, w: usize, limit: usize, lines: &mut Vec<String>) {
        if self.width + w > limit && self.width > 0 {
            self.break_line(lines);
        }
        self.current.push_str(&self.pending);
        self.pending.clear();
        self.current.push_str(grapheme);
        self.width += w;
    }

    fn break_line(&mut self, lines: &mut Vec<String>) {
        lines.push(std::mem::take(&mut self.current));
        self.width = 0;
    }

    /// Close the physical line; trailing escapes stay on it.
    fn finish(mut self, lines: &mut Vec<String>) {
        self.current.push_str(&self.pending);
        lines.push(self.current);
    }
}

/// Wrap text by breaking at any grapheme boundary.
///
/// Each line separator in the input produces a line break. Lines are broken
/// when the next grapheme would exceed `limit`; a single grapheme wider than
/// `limit` gets a line of its own.
///
/// Returns an empty `Vec` for empty input.
pub fn wrap_text(text: &str, limit: usize, metrics: &dyn FontMetrics) -> Result<Vec<String>> {
    check_limit(limit)?;
    if text.is_empty() {
        return Ok(vec![]);
    }

    let mut lines: Vec<String> = Vec::new();

    for raw_line in split_lines(text) {
        let mut line = LineBuilder::default();
        for token in tokens(raw_line) {
            match token {
                Token::Escape(e) => line.push_escape(e),
                Token::Grapheme(g) => {
                    line.push_grapheme(g, grapheme_width(g, metrics), limit, &mut lines)
                }
            }
        }
        line.finish(&mut lines);
    }

    trace!(limit, lines = lines.len(), "wrapped text");
    Ok(lines)
}

/// Wrap text by breaking at word boundaries.
///
/// Uses Unicode word boundary rules (UAX #29) to find break points.
/// Falls back to grapheme-break for words wider than `limit`.
/// Whitespace at a wrap point is dropped.
///
/// Returns an empty `Vec` for empty input.
pub fn wrap_text_word(
    text: &str,
    limit: usize,
    metrics: &dyn FontMetrics,
) -> Result<Vec<String>> {
    check_limit(limit)?;
    if text.is_empty() {
        return Ok(vec![]);
    }

    let mut lines: Vec<String> = Vec::new();
    for raw_line in split_lines(text) {
        wrap_line_word(raw_line, limit, metrics, &mut lines);
    }

    trace!(limit, lines = lines.len(), "word-wrapped text");
    Ok(lines)
}

/// Wrap a single physical line by word boundaries.
fn wrap_line_word(line: &str, limit: usize, metrics: &dyn FontMetrics, lines: &mut Vec<String>) {
    let mut builder = LineBuilder::default();

    for run in Runs::new(line) {
        let visible = match run {
            Run::Escape(e) => {
                builder.push_escape(e);
                continue;
            }
            Run::Visible(v) => v,
        };

        for segment in visible.split_word_bounds() {
            let seg_width: usize =
                segment.graphemes(true).map(|g| grapheme_width(g, metrics)).sum();

            if builder.width + seg_width > limit {
                if builder.width > 0 {
                    trim_trailing_whitespace(&mut builder.current);
                    builder.break_line(lines);
                }

                // Skip whitespace at the start of a wrapped line.
                if is_whitespace(segment) {
                    continue;
                }

                // Segment wider than the line: force-break by grapheme.
                if seg_width > limit {
                    for g in segment.graphemes(true) {
                        builder.push_grapheme(g, grapheme_width(g, metrics), limit, lines);
                    }
                    continue;
                }
            }

            // Whole segment fits: append without further break checks.
            builder.current.push_str(&builder.pending);
            builder.pending.clear();
            builder.current.push_str(segment);
            builder.width += seg_width;
        }
    }

    builder.finish(lines);
}

fn trim_trailing_whitespace(line: &mut String) {
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
}

/// Check if a segment is entirely whitespace.
fn is_whitespace(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace())
}

/// Number of lines [`wrap_text`] would produce, without allocating them.
pub fn measure_text_height(text: &str, limit: usize, metrics: &dyn FontMetrics) -> Result<usize> {
    check_limit(limit)?;
    if text.is_empty() {
        return Ok(0);
    }

    let mut lines: usize = 0;

    for raw_line in split_lines(text) {
        lines += 1;
        let mut current_width: usize = 0;

        for token in tokens(raw_line) {
            let Token::Grapheme(g) = token else {
                continue;
            };
            let gw = grapheme_width(g, metrics);
            if current_width + gw > limit && current_width > 0 {
                lines += 1;
                current_width = gw;
            } else {
                current_width += gw;
            }
        }
    }

    Ok(lines)
}
