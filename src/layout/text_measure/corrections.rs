//! Width corrections for multi-codepoint grapheme clusters.
//!
//! A cluster is first measured as the sum of its codepoint widths. For some
//! composite sequences that sum is wrong: a ZWJ family of four emoji sums to
//! 8 but renders in 2 cells. The [`CorrectionTable`] records what the target
//! terminal actually renders:
//!
//! 1. Exact sequences (`"👁️‍🗨️" -> 2`), checked first.
//! 2. Cluster kinds, checked in [`ClusterKind::PRECEDENCE`] order.
//! 3. Anything else keeps its naive sum.
//!
//! The built-in kinds are empirical, not derived from Unicode data. Terminals
//! disagree, so every entry can be replaced or removed per target.

use std::collections::{BTreeMap, HashMap};

use super::classify::GlyphClass;

const ZWJ: char = '\u{200D}';
const VS15: char = '\u{FE0E}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';

bitflags::bitflags! {
    /// Structural traits of a grapheme cluster.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClusterTraits: u8 {
        const ZWJ                = 1 << 0;
        const REGIONAL_PAIR      = 1 << 1;
        const KEYCAP             = 1 << 2;
        const SKIN_TONE          = 1 << 3;
        const EMOJI_PRESENTATION = 1 << 4;
        const TEXT_PRESENTATION  = 1 << 5;
    }
}

impl ClusterTraits {
    /// Inspect a grapheme cluster.
    pub fn of(cluster: &str) -> Self {
        let mut traits = Self::empty();
        let mut regional = 0usize;

        for c in cluster.chars() {
            match c {
                ZWJ => traits |= Self::ZWJ,
                VS15 => traits |= Self::TEXT_PRESENTATION,
                VS16 => traits |= Self::EMOJI_PRESENTATION,
                KEYCAP => traits |= Self::KEYCAP,
                '\u{1F3FB}'..='\u{1F3FF}' => traits |= Self::SKIN_TONE,
                '\u{1F1E6}'..='\u{1F1FF}' => regional += 1,
                _ => {}
            }
        }

        if regional >= 2 {
            traits |= Self::REGIONAL_PAIR;
        }
        traits
    }
}

/// A correctable cluster shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterKind {
    /// Emoji joined with U+200D (families, professions, flags like 🏳️‍🌈).
    Zwj,
    /// Two regional indicators forming a flag (🇺🇸).
    RegionalPair,
    /// Base + optional VS16 + U+20E3 (1️⃣).
    Keycap,
    /// Emoji + Fitzpatrick modifier (👍🏽).
    SkinTone,
    /// Base + VS16 (☀️).
    EmojiPresentation,
    /// Base + VS15 (☀︎).
    TextPresentation,
}

impl ClusterKind {
    /// Lookup order when a cluster has several traits.
    pub const PRECEDENCE: [ClusterKind; 6] = [
        ClusterKind::Zwj,
        ClusterKind::RegionalPair,
        ClusterKind::Keycap,
        ClusterKind::SkinTone,
        ClusterKind::TextPresentation,
        ClusterKind::EmojiPresentation,
    ];

    /// Configuration name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zwj => "zwj",
            Self::RegionalPair => "regional_pair",
            Self::Keycap => "keycap",
            Self::SkinTone => "skin_tone",
            Self::EmojiPresentation => "emoji_presentation",
            Self::TextPresentation => "text_presentation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRECEDENCE.into_iter().find(|kind| kind.name() == name)
    }

    const fn flag(self) -> ClusterTraits {
        match self {
            Self::Zwj => ClusterTraits::ZWJ,
            Self::RegionalPair => ClusterTraits::REGIONAL_PAIR,
            Self::Keycap => ClusterTraits::KEYCAP,
            Self::SkinTone => ClusterTraits::SKIN_TONE,
            Self::EmojiPresentation => ClusterTraits::EMOJI_PRESENTATION,
            Self::TextPresentation => ClusterTraits::TEXT_PRESENTATION,
        }
    }
}

/// Overridable width table for composite grapheme clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    sequences: HashMap<String, usize>,
    kinds: BTreeMap<ClusterKind, GlyphClass>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CorrectionTable {
    /// Table matching modern emoji-capable terminals (kitty, WezTerm,
    /// iTerm2, Windows Terminal).
    pub fn builtin() -> Self {
        Self::empty()
            .with_kind(ClusterKind::Zwj, GlyphClass::Wide)
            .with_kind(ClusterKind::RegionalPair, GlyphClass::Wide)
            .with_kind(ClusterKind::Keycap, GlyphClass::Wide)
            .with_kind(ClusterKind::SkinTone, GlyphClass::Wide)
            .with_kind(ClusterKind::EmojiPresentation, GlyphClass::Wide)
            .with_kind(ClusterKind::TextPresentation, GlyphClass::Narrow)
    }

    /// Table with no corrections: every cluster keeps its naive sum.
    pub fn empty() -> Self {
        Self {
            sequences: HashMap::new(),
            kinds: BTreeMap::new(),
        }
    }

    /// Pin an exact cluster to a column count.
    pub fn with_sequence(mut self, sequence: impl Into<String>, columns: usize) -> Self {
        self.sequences.insert(sequence.into(), columns);
        self
    }

    /// Map a cluster kind to a glyph class.
    pub fn with_kind(mut self, kind: ClusterKind, class: GlyphClass) -> Self {
        self.kinds.insert(kind, class);
        self
    }

    /// Stop correcting a cluster kind.
    pub fn without_kind(mut self, kind: ClusterKind) -> Self {
        self.kinds.remove(&kind);
        self
    }

    /// Exact override for `cluster`, if any.
    pub fn sequence(&self, cluster: &str) -> Option<usize> {
        if self.sequences.is_empty() {
            return None;
        }
        self.sequences.get(cluster).copied()
    }

    /// First configured kind matching `traits`, in precedence order.
    pub fn kind_for(&self, traits: ClusterTraits) -> Option<(ClusterKind, GlyphClass)> {
        if traits.is_empty() {
            return None;
        }
        ClusterKind::PRECEDENCE
            .into_iter()
            .filter(|kind| traits.contains(kind.flag()))
            .find_map(|kind| self.kinds.get(&kind).map(|class| (kind, *class)))
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty() && self.kinds.is_empty()
    }
}
