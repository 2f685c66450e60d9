//! Computed wrap data for one logical line, and the projection between input offsets (the
//! document line) and output positions (wrapped segment + offset within it).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::injected_text::{InjectedTextOptions, LineInjectedText};

/// Fingerprint of the composed text a [`LineBreakData`] was computed for.
pub(crate) fn text_fingerprint(chars: &[char]) -> u64 {
    let mut hasher = DefaultHasher::new();
    chars.hash(&mut hasher);
    hasher.finish()
}

/// Which side an offset sticks to when it sits on a boundary (a break or an injection point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionAffinity {
    /// Prefer the segment / text before the boundary.
    Left,
    /// Prefer the segment / text after the boundary.
    Right,
    /// Boundaries on breaks resolve to the following segment, boundaries on injections to the
    /// text before the injection.
    #[default]
    None,
}

/// A position in the wrapped output of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPosition {
    /// Index of the wrapped segment (0 for the first one).
    pub output_line_index: usize,
    /// Offset within the segment, including the wrapped indent for continuations.
    pub output_offset: usize,
}

impl OutputPosition {
    /// Create an output position.
    pub fn new(output_line_index: usize, output_offset: usize) -> Self {
        Self {
            output_line_index,
            output_offset,
        }
    }
}

/// The wrap result for one logical line.
///
/// `break_offsets[i]` is the end (exclusive) of output segment `i` in the composed text (the
/// line with injected text applied); the last entry is the composed length.
///
/// Data produced by the scanners remembers a fingerprint of the text it was computed for, so a
/// stale value handed back after an edit is never used to seed a re-wrap. The fingerprint is
/// ignored by equality.
#[derive(Debug, Clone)]
pub struct LineBreakData {
    /// Injections applied to the line, in offset order. Empty when the line has none.
    pub injected_text: Vec<LineInjectedText>,
    /// Segment end offsets, strictly increasing.
    pub break_offsets: Vec<usize>,
    /// Visible column at each break offset.
    pub break_offsets_visible_column: Vec<f64>,
    /// Columns of indentation added in front of every continuation segment.
    pub wrapped_text_indent_length: usize,
    source_fingerprint: Option<u64>,
}

impl PartialEq for LineBreakData {
    fn eq(&self, other: &Self) -> bool {
        self.injected_text == other.injected_text
            && self.break_offsets == other.break_offsets
            && self.break_offsets_visible_column == other.break_offsets_visible_column
            && self.wrapped_text_indent_length == other.wrapped_text_indent_length
    }
}

impl LineBreakData {
    /// Assemble wrap data from its parts.
    ///
    /// Values built this way are not tied to any text and are never reused as a re-wrap seed.
    pub fn new(
        injected_text: Vec<LineInjectedText>,
        break_offsets: Vec<usize>,
        break_offsets_visible_column: Vec<f64>,
        wrapped_text_indent_length: usize,
    ) -> Self {
        Self {
            injected_text,
            break_offsets,
            break_offsets_visible_column,
            wrapped_text_indent_length,
            source_fingerprint: None,
        }
    }

    /// Wrap data computed for the composed text `chars`.
    pub(crate) fn computed(
        chars: &[char],
        injected_text: Vec<LineInjectedText>,
        break_offsets: Vec<usize>,
        break_offsets_visible_column: Vec<f64>,
        wrapped_text_indent_length: usize,
    ) -> Self {
        Self {
            source_fingerprint: Some(text_fingerprint(chars)),
            ..Self::new(
                injected_text,
                break_offsets,
                break_offsets_visible_column,
                wrapped_text_indent_length,
            )
        }
    }

    /// Whether this data was computed for exactly the composed text `chars`.
    pub(crate) fn was_computed_for(&self, chars: &[char]) -> bool {
        self.composed_len() == chars.len()
            && self.source_fingerprint == Some(text_fingerprint(chars))
    }

    /// Whether injected text was spliced into the line.
    pub fn has_injected_text(&self) -> bool {
        !self.injected_text.is_empty()
    }

    /// Number of output segments.
    pub fn output_line_count(&self) -> usize {
        self.break_offsets.len()
    }

    /// Length of the composed line (with injected text).
    pub fn composed_len(&self) -> usize {
        self.break_offsets.last().copied().unwrap_or(0)
    }

    /// Range of the composed text covered by output segment `output_line_index`.
    pub fn output_line_range(&self, output_line_index: usize) -> Range<usize> {
        let start = if output_line_index > 0 {
            self.break_offsets[output_line_index - 1]
        } else {
            0
        };
        start..self.break_offsets[output_line_index]
    }

    /// Length of an output segment, including the wrapped indent of continuations.
    pub fn line_length(&self, output_line_index: usize) -> usize {
        let range = self.output_line_range(output_line_index);
        let mut length = range.end - range.start;
        if output_line_index > 0 {
            length += self.wrapped_text_indent_length;
        }
        length
    }

    /// Smallest valid offset in an output segment.
    pub fn min_output_offset(&self, output_line_index: usize) -> usize {
        if output_line_index > 0 {
            self.wrapped_text_indent_length
        } else {
            0
        }
    }

    /// Largest valid offset in an output segment.
    pub fn max_output_offset(&self, output_line_index: usize) -> usize {
        self.line_length(output_line_index)
    }

    fn output_position_to_composed_offset(&self, output_line_index: usize, output_offset: usize) -> usize {
        let mut output_offset = output_offset;
        if output_line_index > 0 {
            output_offset = output_offset.saturating_sub(self.wrapped_text_indent_length);
        }
        let start = if output_line_index > 0 {
            self.break_offsets[output_line_index - 1]
        } else {
            0
        };
        start + output_offset
    }

    /// Map an output position back to an offset in the document line.
    ///
    /// Offsets inside injected text collapse onto the injection point.
    pub fn translate_to_input_offset(&self, output_line_index: usize, output_offset: usize) -> usize {
        let mut input_offset = self.output_position_to_composed_offset(output_line_index, output_offset);
        for injection in &self.injected_text {
            if input_offset <= injection.offset {
                break;
            }
            let content_len = injection.options.content_len();
            if input_offset < injection.offset + content_len {
                input_offset = injection.offset;
            } else {
                input_offset -= content_len;
            }
        }
        input_offset
    }

    /// Map an offset in the document line to a position in the wrapped output.
    pub fn translate_to_output_position(
        &self,
        input_offset: usize,
        affinity: PositionAffinity,
    ) -> OutputPosition {
        let mut composed_offset = input_offset;
        for injection in &self.injected_text {
            if input_offset < injection.offset {
                break;
            }
            if affinity != PositionAffinity::Right && input_offset == injection.offset {
                break;
            }
            composed_offset += injection.options.content_len();
        }
        self.composed_offset_to_output_position(composed_offset, affinity)
    }

    fn composed_offset_to_output_position(
        &self,
        composed_offset: usize,
        affinity: PositionAffinity,
    ) -> OutputPosition {
        let last = self.break_offsets.len().saturating_sub(1);
        let index = if affinity == PositionAffinity::Left {
            self.break_offsets.partition_point(|&b| b < composed_offset)
        } else {
            self.break_offsets.partition_point(|&b| b <= composed_offset)
        }
        .min(last);

        let start = if index > 0 {
            self.break_offsets[index - 1]
        } else {
            0
        };
        let mut output_offset = composed_offset.saturating_sub(start);
        if index > 0 {
            output_offset += self.wrapped_text_indent_length;
        }
        OutputPosition::new(index, output_offset)
    }

    /// The injection rendered at an output position, if any.
    ///
    /// Both edges of an injection count as inside it.
    pub fn injected_text_at(
        &self,
        output_line_index: usize,
        output_offset: usize,
    ) -> Option<&InjectedTextOptions> {
        let offset = self.output_position_to_composed_offset(output_line_index, output_offset);
        let mut injected_before = 0usize;
        for injection in &self.injected_text {
            let length = injection.options.content_len();
            let start = injection.offset + injected_before;
            if start > offset {
                break;
            }
            if offset <= start + length {
                return Some(&injection.options);
            }
            injected_before += length;
        }
        None
    }
}
