//! Full left-to-right scan of a line.

use crate::classifier::{CharacterClass, WrappingCharacterClassifier};
use crate::indent::wrapped_text_indent_length;
use crate::injected_text::{LineInjectedText, apply_injected_text, normalize_injected_text};
use crate::line_break_data::LineBreakData;
use crate::options::WrappingParams;
use crate::width::{line_visible_width, measure};

/// Whether a soft break may be placed between `prev` and `cur`.
///
/// Never before a space. Otherwise allowed at the end of a run of break-after characters, at the
/// start of a run of break-before characters, and around ideographs unless `keep_all` is set.
pub fn can_break(
    prev: char,
    prev_class: CharacterClass,
    cur: char,
    cur_class: CharacterClass,
    keep_all: bool,
) -> bool {
    use CharacterClass::*;

    cur != ' '
        && ((prev_class == BreakAfter && cur_class != BreakAfter)
            || (prev_class != BreakBefore && cur_class == BreakBefore)
            || (!keep_all && prev_class == BreakIdeographic && cur_class != BreakAfter)
            || (!keep_all && cur_class == BreakIdeographic && prev_class != BreakBefore))
}

/// Whether `chars[i]` directly follows an unescaped `\n` escape sequence.
fn follows_escaped_line_feed(chars: &[char], i: usize) -> bool {
    i >= 2 && chars[i - 2] == '\\' && chars[i - 1] == 'n' && (i < 3 || chars[i - 3] != '\\')
}

/// Compute the soft breaks of a line from scratch.
///
/// Returns `None` when wrapping is disabled or the line fits in one segment, unless the line has
/// injected text: the renderer still needs the injections, so a single-segment result is
/// returned instead.
pub fn create_line_breaks(
    classifier: &WrappingCharacterClassifier,
    line_text: &str,
    injected_text: &[LineInjectedText],
    params: &WrappingParams,
) -> Option<LineBreakData> {
    let composed = apply_injected_text(line_text, injected_text);
    let chars: Vec<char> = composed.chars().collect();
    create_line_breaks_for_chars(classifier, &chars, injected_text, params)
}

pub(crate) fn create_line_breaks_for_chars(
    classifier: &WrappingCharacterClassifier,
    chars: &[char],
    injected_text: &[LineInjectedText],
    params: &WrappingParams,
) -> Option<LineBreakData> {
    let len = chars.len();
    let injected_len: usize = injected_text.iter().map(|i| i.options.content_len()).sum();
    let injected_text = normalize_injected_text(len.saturating_sub(injected_len), injected_text);
    let wrapping_column = match params.wrapping_column {
        Some(column) if len > 1 => column,
        _ => return single_segment(chars, injected_text, params),
    };

    let tab_size = params.tab_size;
    let full_width = params.columns_for_full_width_char;
    let keep_all = params.word_break.is_keep_all();
    let wrap_escaped_line_feeds = params.wrap_on_escaped_line_feeds && chars.contains(&'"');

    let wrapped_text_indent_length =
        wrapped_text_indent_length(chars, tab_size, wrapping_column, full_width, params.wrapping_indent);
    let first_line_break_column = wrapping_column as f64;
    let wrapped_line_break_column = first_line_break_column - wrapped_text_indent_length as f64;

    let mut break_offsets = Vec::new();
    let mut break_offsets_visible_column = Vec::new();
    let mut break_offset = 0usize;
    let mut break_offset_visible_column = 0.0f64;

    let mut breaking_column = first_line_break_column;
    let mut prev_char = chars[0];
    let (mut prev_class, mut visible_column) = measure(classifier, prev_char, 0.0, tab_size, full_width);

    for (i, &ch) in chars.iter().enumerate().skip(1) {
        let (class, width) = measure(classifier, ch, visible_column, tab_size, full_width);

        if wrap_escaped_line_feeds && follows_escaped_line_feed(chars, i) {
            visible_column += breaking_column;
        }

        if can_break(prev_char, prev_class, ch, class, keep_all) {
            break_offset = i;
            break_offset_visible_column = visible_column;
        }

        visible_column += width;

        if visible_column > breaking_column {
            if break_offset == 0
                || visible_column - break_offset_visible_column > wrapped_line_break_column
            {
                // No legal break in this segment, or honouring it overflows the next one.
                break_offset = i;
                break_offset_visible_column = visible_column - width;
            }

            break_offsets.push(break_offset);
            break_offsets_visible_column.push(break_offset_visible_column);
            breaking_column = break_offset_visible_column + wrapped_line_break_column;
            break_offset = 0;
        }

        prev_char = ch;
        prev_class = class;
    }

    if break_offsets.is_empty() && injected_text.is_empty() {
        return None;
    }

    break_offsets.push(len);
    break_offsets_visible_column.push(visible_column);

    Some(LineBreakData::computed(
        chars,
        injected_text,
        break_offsets,
        break_offsets_visible_column,
        wrapped_text_indent_length,
    ))
}

fn single_segment(
    chars: &[char],
    injected_text: Vec<LineInjectedText>,
    params: &WrappingParams,
) -> Option<LineBreakData> {
    if injected_text.is_empty() {
        return None;
    }
    let width = line_visible_width(chars, params.tab_size, params.columns_for_full_width_char);
    Some(LineBreakData::computed(
        chars,
        injected_text,
        vec![chars.len()],
        vec![width],
        0,
    ))
}
