//! Visible-column width model.
//!
//! Widths are `f64` because a full-width character spans `columns_for_full_width_char`
//! columns, a ratio derived from font metrics (typical full-width glyph width over typical
//! half-width glyph width) that is not necessarily integral.

use unicode_width::UnicodeWidthChar;

use crate::classifier::{CharacterClass, WrappingCharacterClassifier};

/// Width (in columns) of a code point outside the Basic Multilingual Plane.
///
/// Such code points are never split and never classified, whatever the font says.
pub const ASTRAL_CHAR_WIDTH: f64 = 2.0;

/// Whether a character renders as a double-width glyph (UAX #11 wide or fullwidth).
pub fn is_full_width_character(ch: char) -> bool {
    UnicodeWidthChar::width(ch) == Some(2)
}

/// Whether a character lies outside the Basic Multilingual Plane.
pub fn is_astral(ch: char) -> bool {
    ch as u32 > 0xFFFF
}

/// Visible width of `ch` when it starts at `visible_column`.
///
/// - `'\t'` advances to the next tab stop.
/// - Full-width characters take `columns_for_full_width_char`.
/// - Control characters (below U+0020) are rendered as wide substitution glyphs and take
///   `columns_for_full_width_char` as well.
/// - Everything else takes one column.
pub fn compute_char_width(
    ch: char,
    visible_column: f64,
    tab_size: usize,
    columns_for_full_width_char: f64,
) -> f64 {
    if ch == '\t' {
        let tab_size = tab_size.max(1) as f64;
        return tab_size - (visible_column % tab_size);
    }
    if is_full_width_character(ch) {
        return columns_for_full_width_char;
    }
    if (ch as u32) < 32 {
        return columns_for_full_width_char;
    }
    1.0
}

/// Class and width of one scan unit, as both scanners see it.
pub(crate) fn measure(
    classifier: &WrappingCharacterClassifier,
    ch: char,
    visible_column: f64,
    tab_size: usize,
    columns_for_full_width_char: f64,
) -> (CharacterClass, f64) {
    if is_astral(ch) {
        (CharacterClass::None, ASTRAL_CHAR_WIDTH)
    } else {
        (
            classifier.get(ch),
            compute_char_width(ch, visible_column, tab_size, columns_for_full_width_char),
        )
    }
}

/// Class of one scan unit without measuring it.
pub(crate) fn classify(classifier: &WrappingCharacterClassifier, ch: char) -> CharacterClass {
    if is_astral(ch) {
        CharacterClass::None
    } else {
        classifier.get(ch)
    }
}

/// Total visible width of a run of characters starting at column 0.
pub fn line_visible_width(chars: &[char], tab_size: usize, columns_for_full_width_char: f64) -> f64 {
    chars.iter().fold(0.0, |column, &ch| {
        let width = if is_astral(ch) {
            ASTRAL_CHAR_WIDTH
        } else {
            compute_char_width(ch, column, tab_size, columns_for_full_width_char)
        };
        column + width
    })
}
