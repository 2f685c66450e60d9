//! Wrap-affinity classification of characters.
//!
//! Every character gets one of four classes that drive the break-legality rule in
//! [`can_break`](crate::fresh::can_break): characters that prefer a break before them (opening
//! brackets, currency signs), characters that prefer a break after them (spaces, closing
//! punctuation), ideographs that may be broken around individually, and everything else.

use std::collections::HashMap;

/// Characters a wrapped segment should preferably start with.
pub const DEFAULT_BREAK_BEFORE_CHARACTERS: &str = "([{‘“〈《「『【〔（［｛｢£¥＄￡￥+＋";

/// Characters a wrapped segment should preferably end with.
pub const DEFAULT_BREAK_AFTER_CHARACTERS: &str = " \t})]?|/&.,;¢°′″‰℃、。｡､￠，．：；？！％・･ゝゞヽヾーァィゥェォッャュョヮヵヶぁぃぅぇぉっゃゅょゎゕゖㇰㇱㇲㇳㇴㇵㇶㇷㇸㇹㇺㇻㇼㇽㇾㇿ々〻ｧｨｩｪｫｬｭｮｯｰ”〉》」』】〕）］｝｣";

/// Wrap affinity of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterClass {
    /// No preference; the character glues to its neighbours.
    #[default]
    None,
    /// A break is preferred right before this character.
    BreakBefore,
    /// A break is preferred right after this character.
    BreakAfter,
    /// CJK ideograph or Kana: breakable on both sides unless word break is keep-all.
    BreakIdeographic,
}

// Hiragana + Katakana, CJK Unified Ideographs Extension A, CJK Unified Ideographs.
const IDEOGRAPHIC_RANGES: [(u32, u32); 3] = [(0x3040, 0x30FF), (0x3400, 0x4DBF), (0x4E00, 0x9FFF)];

/// Classifier built from the configured break-before / break-after character sets.
///
/// Immutable once constructed. Code points below 256 are answered from a dense table, the
/// ideographic ranges are checked next, and any other configured character lives in a sparse map.
#[derive(Debug, Clone)]
pub struct WrappingCharacterClassifier {
    ascii: [CharacterClass; 256],
    sparse: HashMap<char, CharacterClass>,
    default_class: CharacterClass,
}

impl WrappingCharacterClassifier {
    /// Build a classifier from the configured character sets.
    ///
    /// Break-before characters are tagged first and break-after characters second, so a
    /// character present in both strings ends up as [`CharacterClass::BreakAfter`].
    pub fn new(break_before: &str, break_after: &str) -> Self {
        let mut classifier = Self {
            ascii: [CharacterClass::None; 256],
            sparse: HashMap::new(),
            default_class: CharacterClass::None,
        };
        for ch in break_before.chars() {
            classifier.set(ch, CharacterClass::BreakBefore);
        }
        for ch in break_after.chars() {
            classifier.set(ch, CharacterClass::BreakAfter);
        }
        classifier
    }

    fn set(&mut self, ch: char, class: CharacterClass) {
        let code = ch as u32;
        if code < 256 {
            self.ascii[code as usize] = class;
        } else {
            self.sparse.insert(ch, class);
        }
    }

    /// Classify a character.
    pub fn get(&self, ch: char) -> CharacterClass {
        let code = ch as u32;
        if code < 256 {
            return self.ascii[code as usize];
        }
        if IDEOGRAPHIC_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&code))
        {
            return CharacterClass::BreakIdeographic;
        }
        self.sparse.get(&ch).copied().unwrap_or(self.default_class)
    }
}

impl Default for WrappingCharacterClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_BEFORE_CHARACTERS, DEFAULT_BREAK_AFTER_CHARACTERS)
    }
}
