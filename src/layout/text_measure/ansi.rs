//! ANSI escape sequence scanning.
//!
//! Partitions text into alternating visible and escape runs so escape
//! sequences can be measured as zero-width and carried through layout
//! byte-for-byte. Recognises:
//! - CSI sequences: `ESC [` ... final byte (0x40-0x7E)
//! - OSC sequences: `ESC ]` ... BEL (0x07) or ST (ESC \)
//! - DCS/PM/APC sequences: `ESC P`/`ESC ^`/`ESC _` ... ST
//! - Two-character sequences: `ESC` + single printable char
//!
//! Malformed or unterminated sequences are not errors: their bytes stay in
//! the surrounding visible run.

use std::borrow::Cow;

use unicode_segmentation::{Graphemes, UnicodeSegmentation};

const ESC: u8 = 0x1B;

/// A slice of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run<'a> {
    Visible(&'a str),
    Escape(&'a str),
}

impl<'a> Run<'a> {
    /// The raw text of this run.
    pub fn as_str(&self) -> &'a str {
        match self {
            Run::Visible(s) | Run::Escape(s) => s,
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Run::Escape(_))
    }

    /// The text of a visible run, `None` for escapes.
    pub fn visible(self) -> Option<&'a str> {
        match self {
            Run::Visible(s) => Some(s),
            Run::Escape(_) => None,
        }
    }
}

/// Iterator over the runs of a string.
///
/// Concatenating every yielded run reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Runs<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        if let Some(len) = escape_len(bytes, start) {
            self.pos = start + len;
            return Some(Run::Escape(&self.text[start..self.pos]));
        }

        // Visible text runs up to the next well-formed escape. A malformed ESC
        // is kept as visible text. ESC is single-byte ASCII, so every stop
        // position is a char boundary.
        let mut i = start + 1;
        while i < bytes.len() {
            if bytes[i] == ESC && escape_len(bytes, i).is_some() {
                break;
            }
            i += 1;
        }
        self.pos = i;
        Some(Run::Visible(&self.text[start..i]))
    }
}

/// Scan `text` into runs.
pub fn scan(text: &str) -> Vec<Run<'_>> {
    Runs::new(text).collect()
}

/// Strip ANSI escape sequences from a string.
///
/// Returns `Cow::Borrowed` when no escape byte is present (zero allocation).
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.as_bytes().contains(&ESC) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(Runs::new(s).filter_map(Run::visible).collect())
}

/// Length in bytes of the well-formed escape sequence starting at `pos`,
/// or `None` if `pos` does not start one.
fn escape_len(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&ESC) {
        return None;
    }
    let next = pos + 1;
    let end = match *bytes.get(next)? {
        b'[' => csi_end(bytes, next + 1)?,
        b']' | b'P' | b'^' | b'_' => string_terminated_end(bytes, next + 1)?,
        0x20..=0x7E => next + 1,
        _ => return None,
    };
    Some(end - pos)
}

/// End of a CSI sequence. `pos` is the byte after `[`.
///
/// CSI format: parameter bytes (0x30-0x3F), intermediate bytes (0x20-0x2F),
/// final byte (0x40-0x7E).
fn csi_end(bytes: &[u8], pos: usize) -> Option<usize> {
    for (i, &b) in bytes.iter().enumerate().skip(pos) {
        match b {
            0x40..=0x7E => return Some(i + 1),
            0x20..=0x3F => {}
            _ => return None,
        }
    }
    None
}

/// End of a string-terminated sequence (OSC, DCS, PM, APC).
/// `pos` is the byte after the type indicator.
///
/// Terminates with BEL (0x07) or ST (ESC \).
fn string_terminated_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            0x07 => return Some(i + 1),
            ESC if bytes.get(i + 1) == Some(&b'\\') => return Some(i + 2),
            _ => i += 1,
        }
    }
    None
}

/// A layout unit: one escape run or one visible grapheme cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Escape(&'a str),
    Grapheme(&'a str),
}

impl<'a> Token<'a> {
    pub(crate) fn as_str(&self) -> &'a str {
        match self {
            Token::Escape(s) | Token::Grapheme(s) => s,
        }
    }
}

/// Split `text` into escape runs and graphemes, in order.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    Runs::new(text).flat_map(|run| {
        let (escape, graphemes): (Option<Token<'_>>, Option<Graphemes<'_>>) = match run {
            Run::Escape(e) => (Some(Token::Escape(e)), None),
            Run::Visible(v) => (None, Some(v.graphemes(true))),
        };
        escape
            .into_iter()
            .chain(graphemes.into_iter().flatten().map(Token::Grapheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(runs: &[Run<'_>]) -> String {
        runs.iter().map(Run::as_str).collect()
    }

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(scan("hello world"), vec![Run::Visible("hello world")]);
    }

    #[test]
    fn empty_has_no_runs() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn sgr_runs_alternate() {
        let runs = scan("\x1b[31mred\x1b[0m plain");
        assert_eq!(
            runs,
            vec![
                Run::Escape("\x1b[31m"),
                Run::Visible("red"),
                Run::Escape("\x1b[0m"),
                Run::Visible(" plain"),
            ]
        );
    }

    #[test]
    fn adjacent_escapes_stay_separate() {
        let runs = scan("\x1b[1m\x1b[31mx");
        assert_eq!(
            runs,
            vec![Run::Escape("\x1b[1m"), Run::Escape("\x1b[31m"), Run::Visible("x")]
        );
    }

    #[test]
    fn truecolor_is_one_escape() {
        let runs = scan("\x1b[38;2;255;0;0mred");
        assert_eq!(runs[0], Run::Escape("\x1b[38;2;255;0;0m"));
    }

    #[test]
    fn osc_hyperlink() {
        let text = "\x1b]8;;https://example.com\x07click\x1b]8;;\x07";
        let runs = scan(text);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1], Run::Visible("click"));
        assert_eq!(joined(&runs), text);
    }

    #[test]
    fn osc_with_st_terminator() {
        assert_eq!(strip_ansi("\x1b]0;window title\x1b\\text"), "text");
    }

    #[test]
    fn dcs_sequence() {
        assert_eq!(strip_ansi("\x1bPdata\x1b\\after"), "after");
    }

    #[test]
    fn two_char_sequence() {
        assert_eq!(strip_ansi("\x1b=normal mode"), "normal mode");
    }

    #[test]
    fn unterminated_csi_is_visible() {
        assert_eq!(scan("ab\x1b[31"), vec![Run::Visible("ab\x1b[31")]);
    }

    #[test]
    fn unterminated_osc_is_visible() {
        assert_eq!(strip_ansi("\x1b]8;;url"), "\x1b]8;;url");
    }

    #[test]
    fn bare_esc_at_end_is_visible() {
        assert_eq!(scan("text\x1b"), vec![Run::Visible("text\x1b")]);
    }

    #[test]
    fn malformed_then_valid() {
        let runs = scan("\x1b[3\n\x1b[0mok");
        assert_eq!(
            runs,
            vec![Run::Visible("\x1b[3\n"), Run::Escape("\x1b[0m"), Run::Visible("ok")]
        );
    }

    #[test]
    fn esc_before_non_ascii_is_visible() {
        assert_eq!(scan("\x1bé"), vec![Run::Visible("\x1bé")]);
    }

    #[test]
    fn runs_reproduce_input() {
        let text = "\x1b[1m你好\x1b[0m \x1b]8;;x\x07link\x1b]8;;\x07\x1b[";
        assert_eq!(joined(&scan(text)), text);
    }

    #[test]
    fn strip_borrows_without_escape() {
        assert!(matches!(strip_ansi("hello"), Cow::Borrowed(_)));
        assert_eq!(strip_ansi("\x1b[31m你好\x1b[0m"), "你好");
    }

    #[test]
    fn tokens_split_graphemes() {
        let tokens: Vec<_> = tokens("\x1b[1me\u{301}x\x1b[0m").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Escape("\x1b[1m"),
                Token::Grapheme("e\u{301}"),
                Token::Grapheme("x"),
                Token::Escape("\x1b[0m"),
            ]
        );
    }
}
