//! Bordered rendering.
//!
//! ```text
//! Single        ─│┌┐└┘     Double        ═║╔╗╚╝     Rounded       ─│╭╮╰╯
//! ┌───────┐                 ╔═══════╗                 ╭───────╮
//! │       │                 ║       ║                 │       │
//! └───────┘                 ╚═══════╝                 ╰───────╯
//!
//! Thick         ━┃┏┓┗┛     Dashed        ╌╎┌┐└┘     Ascii         -|++++
//! ┏━━━━━━━┓                 ┌╌╌╌╌╌╌╌┐                 +-------+
//! ┃       ┃                 ╎       ╎                 |       |
//! ┗━━━━━━━┛                 └╌╌╌╌╌╌╌┘                 +-------+
//! ```

use super::text_measure::string_width;
use crate::metrics::FontMetrics;

/// Box-drawing character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// Light single lines: ─ │ ┌ ┐ └ ┘
    Single,
    /// Double lines: ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// Single lines with rounded corners: ─ │ ╭ ╮ ╰ ╯
    #[default]
    Rounded,
    /// Heavy/thick lines: ━ ┃ ┏ ┓ ┗ ┛
    Thick,
    /// Light dashed lines: ╌ ╎ ┌ ┐ └ ┘
    Dashed,
    /// Light dotted lines: ┄ ┆ ┌ ┐ └ ┘
    Dotted,
    /// ASCII-only for maximum compatibility: - | + + + +
    Ascii,
}

impl BorderStyle {
    /// Returns `(horizontal, vertical, top_left, top_right, bottom_left, bottom_right)`.
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::Single  => ('─', '│', '┌', '┐', '└', '┘'),
            Self::Double  => ('═', '║', '╔', '╗', '╚', '╝'),
            Self::Rounded => ('─', '│', '╭', '╮', '╰', '╯'),
            Self::Thick   => ('━', '┃', '┏', '┓', '┗', '┛'),
            Self::Dashed  => ('╌', '╎', '┌', '┐', '└', '┘'),
            Self::Dotted  => ('┄', '┆', '┌', '┐', '└', '┘'),
            Self::Ascii   => ('-', '|', '+', '+', '+', '+'),
        }
    }
}

/// Enclose `lines` in a border. The interior is as wide as the widest line
/// or `min_inner_width`, whichever is larger; shorter lines are padded with
/// spaces on the right.
pub fn border_lines<S: AsRef<str>>(
    lines: &[S],
    style: BorderStyle,
    min_inner_width: usize,
    metrics: &dyn FontMetrics,
) -> Vec<String> {
    let (h, v, tl, tr, bl, br) = style.chars();
    let widths: Vec<usize> = lines.iter().map(|l| string_width(l.as_ref(), metrics)).collect();
    let inner = widths.iter().copied().max().unwrap_or(0).max(min_inner_width);

    let rule = |left: char, right: char| {
        let mut s = String::with_capacity((inner + 2) * h.len_utf8());
        s.push(left);
        s.extend(std::iter::repeat_n(h, inner));
        s.push(right);
        s
    };

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(rule(tl, tr));
    for (line, width) in lines.iter().zip(widths) {
        let mut s = String::with_capacity(line.as_ref().len() + inner - width + 2 * v.len_utf8());
        s.push(v);
        s.push_str(line.as_ref());
        s.extend(std::iter::repeat_n(' ', inner - width));
        s.push(v);
        out.push(s);
    }
    out.push(rule(bl, br));
    out
}
