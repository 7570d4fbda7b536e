//! Centering.
//!
//! Lines are trimmed, then padded on both sides with a fill character to the
//! widest trimmed line. When the padding is odd the left side gets the extra
//! column.

use super::text_measure::{char_width, split_lines, string_width};
use crate::metrics::FontMetrics;

/// Center `lines` to their common maximum width (or `min_width`, if wider).
pub fn center_lines<S: AsRef<str>>(
    lines: &[S],
    fill: char,
    min_width: usize,
    metrics: &dyn FontMetrics,
) -> Vec<String> {
    let trimmed: Vec<&str> = lines.iter().map(|l| l.as_ref().trim()).collect();
    let widths: Vec<usize> = trimmed.iter().map(|l| string_width(l, metrics)).collect();
    let target = widths.iter().copied().max().unwrap_or(0).max(min_width);

    trimmed
        .iter()
        .zip(widths)
        .map(|(line, width)| {
            let padding = target - width;
            let right = padding / 2;
            let left = padding - right;

            let mut out = String::with_capacity(line.len() + padding * fill.len_utf8());
            push_fill(&mut out, fill, left, metrics);
            out.push_str(line);
            push_fill(&mut out, fill, right, metrics);
            out
        })
        .collect()
}

/// Center a possibly multi-line string; lines are rejoined with `\n`.
pub fn center_text(text: &str, fill: char, min_width: usize, metrics: &dyn FontMetrics) -> String {
    center_lines(&split_lines(text), fill, min_width, metrics).join("\n")
}

/// Push `columns` worth of `fill`. Columns a wide fill cannot cover exactly
/// are filled with spaces.
fn push_fill(out: &mut String, fill: char, columns: usize, metrics: &dyn FontMetrics) {
    let fill_width = char_width(fill, metrics);
    if fill_width == 0 {
        out.extend(std::iter::repeat_n(' ', columns));
        return;
    }
    out.extend(std::iter::repeat_n(fill, columns / fill_width));
    out.extend(std::iter::repeat_n(' ', columns % fill_width));
}
