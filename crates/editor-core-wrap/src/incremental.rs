//! Re-wrapping a line from its previous wrap data.
//!
//! When only the wrapping column changes, the previous break points are good anchors: the new
//! break for a segment is usually a few characters away from the previous break whose visible
//! column is closest to the new breaking column. Each step searches right of that anchor for the
//! furthest legal break that still fits, then left of it, and only scans the local region.

use crate::classifier::WrappingCharacterClassifier;
use crate::fresh::{can_break, create_line_breaks_for_chars};
use crate::indent::wrapped_text_indent_length;
use crate::line_break_data::LineBreakData;
use crate::options::WrappingParams;
use crate::width::{classify, measure};

/// Reusable buffers for the incremental scanner.
///
/// The scanner computes new break offsets into these buffers, then swaps them with the buffers of
/// the previous [`LineBreakData`], so the previous buffers become the next scratch space. Keeping
/// one scratch value per computer avoids allocating on every re-wrap.
#[derive(Debug, Default)]
pub struct LineBreakScratch {
    pub(crate) chars: Vec<char>,
    break_offsets: Vec<usize>,
    break_offsets_visible_column: Vec<f64>,
}

impl LineBreakScratch {
    /// Create an empty scratch pool.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Index of the entry in `columns`, at or after `from`, closest to `target`.
fn seek_closest(columns: &[f64], from: usize, target: f64) -> usize {
    let mut index = from;
    let Some(&first) = columns.get(index) else {
        return index;
    };
    let mut best_distance = (first - target).abs();
    while let Some(&next) = columns.get(index + 1) {
        let distance = (next - target).abs();
        if distance >= best_distance {
            break;
        }
        best_distance = distance;
        index += 1;
    }
    index
}

/// Re-wrap `line_text` using `previous` (computed for the same line at another wrapping column)
/// as a seed.
///
/// `previous` only seeds the scan when it was computed by this crate for exactly `line_text`
/// without injected text; anything else (an edited line, hand-built data) falls back to a fresh
/// scan. Returns `None` when wrapping is disabled or the line now fits in one segment; otherwise
/// returns `previous` with its break data replaced.
pub fn create_line_breaks_from_previous(
    classifier: &WrappingCharacterClassifier,
    previous: LineBreakData,
    line_text: &str,
    params: &WrappingParams,
    scratch: &mut LineBreakScratch,
) -> Option<LineBreakData> {
    let mut chars = std::mem::take(&mut scratch.chars);
    chars.clear();
    chars.extend(line_text.chars());
    let result =
        create_line_breaks_from_previous_for_chars(classifier, previous, &chars, params, scratch);
    scratch.chars = chars;
    result
}

pub(crate) fn create_line_breaks_from_previous_for_chars(
    classifier: &WrappingCharacterClassifier,
    mut previous: LineBreakData,
    chars: &[char],
    params: &WrappingParams,
    scratch: &mut LineBreakScratch,
) -> Option<LineBreakData> {
    if previous.has_injected_text() || !previous.was_computed_for(chars) {
        return create_line_breaks_for_chars(classifier, chars, &[], params);
    }
    let wrapping_column = params.wrapping_column?;
    let len = chars.len();
    if len <= 1 || previous.break_offsets.is_empty() {
        return None;
    }

    let tab_size = params.tab_size;
    let full_width = params.columns_for_full_width_char;
    let keep_all = params.word_break.is_keep_all();
    let width_at = |ch: char, column: f64| measure(classifier, ch, column, tab_size, full_width).1;

    let wrapped_text_indent_length =
        wrapped_text_indent_length(chars, tab_size, wrapping_column, full_width, params.wrapping_indent);
    let first_line_break_column = wrapping_column as f64;
    let wrapped_line_break_column = first_line_break_column - wrapped_text_indent_length as f64;

    let prev_offsets = &previous.break_offsets;
    let prev_columns = &previous.break_offsets_visible_column;
    let prev_len = prev_offsets.len().min(prev_columns.len()) as isize;

    let offsets = &mut scratch.break_offsets;
    let columns = &mut scratch.break_offsets_visible_column;
    offsets.clear();
    columns.clear();

    let mut last_breaking_offset = 0usize;
    let mut last_breaking_offset_visible_column = 0.0f64;
    let mut breaking_column = first_line_break_column;
    // May drop to -1 (and below) when walking back from the first anchor hits a tab.
    let mut prev_index = seek_closest(prev_columns, 0, breaking_column) as isize;

    while prev_index < prev_len {
        if last_breaking_offset >= len {
            break;
        }

        let (mut prev_break_offset, mut prev_break_offset_visible_column) = if prev_index < 0 {
            (0, 0.0)
        } else {
            let index = prev_index as usize;
            (prev_offsets[index], prev_columns[index])
        };
        if last_breaking_offset > prev_break_offset {
            prev_break_offset = last_breaking_offset;
            prev_break_offset_visible_column = last_breaking_offset_visible_column;
        }
        let prev_break_offset = prev_break_offset.min(len);

        let mut break_offset = 0usize;
        let mut break_offset_visible_column = 0.0f64;
        let mut forced_break_offset = 0usize;
        let mut forced_break_offset_visible_column = 0.0f64;

        // Search right of the anchor for the furthest legal break that still fits.
        if prev_break_offset_visible_column <= breaking_column {
            let mut visible_column = prev_break_offset_visible_column;
            let (mut prev_char, mut prev_class) = match prev_break_offset {
                0 => ('\0', Default::default()),
                offset => (chars[offset - 1], classify(classifier, chars[offset - 1])),
            };
            let mut entire_line_fits = true;

            for (i, &ch) in chars.iter().enumerate().skip(prev_break_offset) {
                let (class, width) = measure(classifier, ch, visible_column, tab_size, full_width);

                if i > last_breaking_offset && can_break(prev_char, prev_class, ch, class, keep_all) {
                    break_offset = i;
                    break_offset_visible_column = visible_column;
                }

                visible_column += width;

                if visible_column > breaking_column {
                    if i > last_breaking_offset {
                        forced_break_offset = i;
                        forced_break_offset_visible_column = visible_column - width;
                    } else {
                        forced_break_offset = i + 1;
                        forced_break_offset_visible_column = visible_column;
                    }

                    if visible_column - break_offset_visible_column > wrapped_line_break_column {
                        break_offset = 0;
                    }

                    entire_line_fits = false;
                    break;
                }

                prev_char = ch;
                prev_class = class;
            }

            if entire_line_fits {
                if !offsets.is_empty() && len > last_breaking_offset {
                    let end_column = match (prev_offsets.last(), prev_columns.last()) {
                        (Some(&end), Some(&column)) if end == len => column,
                        _ => visible_column,
                    };
                    offsets.push(len);
                    columns.push(end_column);
                }
                break;
            }
        }

        // Nothing suitable on the right: walk left from the anchor.
        if break_offset == 0 {
            let mut visible_column = prev_break_offset_visible_column;
            let mut ch = chars.get(prev_break_offset).copied().unwrap_or('\0');
            let mut class = classify(classifier, ch);
            let mut hit_a_tab_character = false;

            let mut char_start_offset = prev_break_offset;
            while char_start_offset > last_breaking_offset {
                let prev_char = chars[char_start_offset - 1];
                if prev_char == '\t' {
                    // A tab's width depends on what precedes it.
                    hit_a_tab_character = true;
                    break;
                }
                // Outside tabs, widths do not depend on the column.
                let (prev_class, prev_width) = measure(classifier, prev_char, 0.0, tab_size, full_width);

                if visible_column <= breaking_column {
                    if forced_break_offset == 0 {
                        forced_break_offset = char_start_offset;
                        forced_break_offset_visible_column = visible_column;
                    }

                    if visible_column <= breaking_column - wrapped_line_break_column {
                        break;
                    }

                    if can_break(prev_char, prev_class, ch, class, keep_all) {
                        break_offset = char_start_offset;
                        break_offset_visible_column = visible_column;
                        break;
                    }
                }

                visible_column -= prev_width;
                ch = prev_char;
                class = prev_class;
                char_start_offset -= 1;
            }

            if break_offset != 0 {
                let remaining_width_of_next_line = wrapped_line_break_column
                    - (forced_break_offset_visible_column - break_offset_visible_column);
                if remaining_width_of_next_line <= tab_size as f64 {
                    let forced_char = chars.get(forced_break_offset).copied().unwrap_or('\0');
                    let char_width = width_at(forced_char, forced_break_offset_visible_column);
                    if remaining_width_of_next_line - char_width < 0.0 {
                        // Breaking there only adds a needless extra line.
                        break_offset = 0;
                    }
                }
            }

            if hit_a_tab_character {
                prev_index -= 1;
                continue;
            }
        }

        if break_offset == 0 {
            break_offset = forced_break_offset;
            break_offset_visible_column = forced_break_offset_visible_column;
        }

        if break_offset <= last_breaking_offset {
            // Advance by at least one character.
            let ch = chars[last_breaking_offset];
            break_offset = last_breaking_offset + 1;
            break_offset_visible_column =
                last_breaking_offset_visible_column + width_at(ch, last_breaking_offset_visible_column);
        }

        last_breaking_offset = break_offset;
        last_breaking_offset_visible_column = break_offset_visible_column;
        offsets.push(break_offset);
        columns.push(break_offset_visible_column);
        breaking_column = break_offset_visible_column + wrapped_line_break_column;

        while prev_index < 0
            || (prev_index < prev_len && prev_columns[prev_index as usize] < break_offset_visible_column)
        {
            prev_index += 1;
        }
        prev_index = seek_closest(prev_columns, prev_index as usize, breaking_column) as isize;
    }

    if offsets.is_empty() {
        return None;
    }

    if last_breaking_offset < len && offsets.last() != Some(&len) {
        // The anchors ran out before the scan reached the end of the line.
        let mut visible_column = last_breaking_offset_visible_column;
        for &ch in &chars[last_breaking_offset..] {
            visible_column += width_at(ch, visible_column);
        }
        offsets.push(len);
        columns.push(visible_column);
    }

    std::mem::swap(&mut previous.break_offsets, offsets);
    std::mem::swap(&mut previous.break_offsets_visible_column, columns);
    previous.wrapped_text_indent_length = wrapped_text_indent_length;
    Some(previous)
}
