//! Codepoint width classification.
//!
//! Maps a single Unicode scalar value to a [`GlyphClass`]: zero-width,
//! narrow or wide. How many columns a class really occupies is decided by
//! the installed [`FontMetrics`](crate::metrics::FontMetrics).

use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

/// Display class of a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphClass {
    /// Combining marks, default-ignorables, controls, line separators.
    Zero,
    /// One cell: ASCII, Latin, Cyrillic, unassigned code points.
    Narrow,
    /// Two cells: East Asian Wide/Fullwidth and emoji presentation.
    Wide,
}

/// Classify a codepoint.
///
/// East Asian *ambiguous* characters count as narrow unless
/// `ambiguous_wide` is set. Unknown code points default to narrow.
pub fn classify(c: char, ambiguous_wide: bool) -> GlyphClass {
    let cp = c as u32;

    if is_zero_width(cp) {
        return GlyphClass::Zero;
    }

    // Force known emoji/symbol ranges to wide, terminals render them as full glyphs.
    match cp {
        // Misc Symbols and Dingbats (☀ ✨ ⚡ ❤)
        0x2600..=0x27BF => return GlyphClass::Wide,
        // Misc Symbols and Arrows (⬅ ⭐ ⮕)
        0x2B00..=0x2BFF => return GlyphClass::Wide,
        // Misc Symbols and Pictographs, Emoticons, Transport and Map
        0x1F300..=0x1F64F | 0x1F680..=0x1F6FF => return GlyphClass::Wide,
        // Supplemental Symbols and Pictographs, Extended-A
        0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF => return GlyphClass::Wide,
        _ => {}
    }

    let width = if ambiguous_wide { c.width_cjk() } else { c.width() };
    match width {
        None | Some(0) => GlyphClass::Zero,
        Some(1) => GlyphClass::Narrow,
        Some(_) => GlyphClass::Wide,
    }
}

fn is_zero_width(cp: u32) -> bool {
    matches!(
        cp,
        // C0 controls (\t \n \r ...) and DEL + C1 controls (NEL)
        0x00..=0x1F | 0x7F..=0x9F
        // Zero-width space, ZWNJ, ZWJ, direction marks
        | 0x200B..=0x200F
        // Line and paragraph separators, bidi embeddings
        | 0x2028..=0x202E
        // Word joiner, invisible operators, bidi isolates
        | 0x2060..=0x206F
        // Variation selectors
        | 0xFE00..=0xFE0F
        // Byte order mark
        | 0xFEFF
        // Tags and variation selectors supplement
        | 0xE0000..=0xE0FFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(c: char) -> GlyphClass {
        classify(c, false)
    }

    #[test]
    fn ascii_is_narrow() {
        for c in ['a', 'Z', ' ', '~', '0'] {
            assert_eq!(class(c), GlyphClass::Narrow, "{c:?}");
        }
    }

    #[test]
    fn controls_are_zero() {
        for c in ['\0', '\t', '\n', '\r', '\x1b', '\x7f', '\u{85}'] {
            assert_eq!(class(c), GlyphClass::Zero, "{c:?}");
        }
    }

    #[test]
    fn unicode_line_separators_are_zero() {
        assert_eq!(class('\u{2028}'), GlyphClass::Zero);
        assert_eq!(class('\u{2029}'), GlyphClass::Zero);
    }

    #[test]
    fn combining_marks_are_zero() {
        assert_eq!(class('\u{0300}'), GlyphClass::Zero);
        assert_eq!(class('\u{0301}'), GlyphClass::Zero);
        assert_eq!(class('\u{20E3}'), GlyphClass::Zero);
    }

    #[test]
    fn default_ignorables_are_zero() {
        assert_eq!(class('\u{200D}'), GlyphClass::Zero);
        assert_eq!(class('\u{FE0F}'), GlyphClass::Zero);
        assert_eq!(class('\u{FEFF}'), GlyphClass::Zero);
        assert_eq!(class('\u{E0061}'), GlyphClass::Zero);
    }

    #[test]
    fn east_asian_wide() {
        for c in ['한', '글', '你', '好', 'Ａ', '０', 'の'] {
            assert_eq!(class(c), GlyphClass::Wide, "{c:?}");
        }
    }

    #[test]
    fn emoji_and_symbols_are_wide() {
        for c in ['😀', '🚀', '🎉', '✨', '⚡', '⮕', '⭐', '🧪'] {
            assert_eq!(class(c), GlyphClass::Wide, "{c:?}");
        }
    }

    #[test]
    fn ambiguous_depends_on_flag() {
        // Horizontal ellipsis is East Asian Ambiguous.
        assert_eq!(classify('…', false), GlyphClass::Narrow);
        assert_eq!(classify('…', true), GlyphClass::Wide);
    }

    #[test]
    fn unassigned_is_narrow() {
        assert_eq!(class('\u{0378}'), GlyphClass::Narrow);
    }
}
