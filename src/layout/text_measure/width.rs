//! Core width calculation for terminal text.
//!
//! Measures the display width of characters, grapheme clusters, and strings
//! in terminal cells. Codepoints are classified by [`classify`], scaled by
//! the font metrics, and composite clusters are adjusted through the
//! metrics' [`CorrectionTable`](super::corrections::CorrectionTable).

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{Run, Runs};
use super::classify::classify;
use super::corrections::ClusterTraits;
use crate::metrics::FontMetrics;

/// Characters that end a line: LF, CR (and CRLF), NEL, LS, PS.
#[inline]
pub fn is_line_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Remove every line separator so the text measures as a single line.
pub fn strip_line_separators(s: &str) -> Cow<'_, str> {
    if !s.contains(is_line_separator) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|&c| !is_line_separator(c)).collect())
}

/// Split text into physical lines. `\r\n` counts as one separator.
///
/// Only separators in visible text break a line; an OSC or DCS payload
/// containing `\n` stays inside its line. Unlike [`str::lines`], a trailing
/// separator yields a final empty line.
pub fn split_lines(s: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for run in Runs::new(s) {
        if let Run::Visible(visible) = run {
            let mut chars = visible.char_indices().peekable();
            while let Some((i, c)) = chars.next() {
                if !is_line_separator(c) {
                    continue;
                }
                lines.push(&s[start..offset + i]);
                start = offset + i + c.len_utf8();
                if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                    start += 1;
                }
            }
        }
        offset += run.as_str().len();
    }
    lines.push(&s[start..]);
    lines
}

/// Display width of a single codepoint in terminal cells.
#[inline]
pub fn char_width(c: char, metrics: &dyn FontMetrics) -> usize {
    metrics.columns(classify(c, metrics.ambiguous_wide()))
}

/// Display width of a grapheme cluster in terminal cells.
///
/// Single codepoints delegate to [`char_width`]. Multi-codepoint clusters
/// check the exact-sequence overrides, then the cluster-kind corrections,
/// and otherwise sum their codepoints:
/// - `é` (e + combining acute) → 1
/// - `👨‍👩‍👧‍👦` (ZWJ family) → 2
/// - `🇺🇸` (regional indicator pair) → 2
pub fn grapheme_width(grapheme: &str, metrics: &dyn FontMetrics) -> usize {
    let corrections = metrics.corrections();
    if let Some(columns) = corrections.sequence(grapheme) {
        return columns;
    }

    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if chars.as_str().is_empty() {
        return char_width(first, metrics);
    }

    match corrections.kind_for(ClusterTraits::of(grapheme)) {
        Some((_, class)) => metrics.columns(class),
        None => grapheme.chars().map(|c| char_width(c, metrics)).sum(),
    }
}

/// Display width of a string in terminal cells.
///
/// Line separators are stripped first, escape runs count as zero, and each
/// visible grapheme cluster contributes [`grapheme_width`].
pub fn string_width(s: &str, metrics: &dyn FontMetrics) -> usize {
    if s.is_empty() {
        return 0;
    }

    // Fast path: pure ASCII with no escape sequences.
    if s.is_ascii() && !s.as_bytes().contains(&0x1B) {
        let printable = s.bytes().filter(|b| (0x20..0x7F).contains(b)).count();
        return printable * metrics.narrow_columns();
    }

    let single_line = strip_line_separators(s);
    visible_width(Runs::new(&single_line), metrics)
}

fn visible_width<'a>(runs: impl Iterator<Item = Run<'a>>, metrics: &dyn FontMetrics) -> usize {
    runs.filter_map(Run::visible)
        .flat_map(|v| v.graphemes(true))
        .map(|g| grapheme_width(g, metrics))
        .sum()
}

/// Width of a string together with its runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthMeasurement<'a> {
    pub columns: usize,
    pub runs: Vec<Run<'a>>,
}

/// Measure `text` and keep its runs for a following layout step.
///
/// Runs cover the original text including line separators, which measure
/// as zero.
pub fn measure_runs<'a>(text: &'a str, metrics: &dyn FontMetrics) -> WidthMeasurement<'a> {
    let runs: Vec<Run<'a>> = Runs::new(text).collect();
    let columns = visible_width(runs.iter().copied(), metrics);
    WidthMeasurement { columns, runs }
}
