//! Document-level wrap layout.
//!
//! Keeps the wrap data of every logical line of a document current and converts between
//! logical positions (line, char column) and visual positions (wrapped row, offset in the row).
//! Edits recompute only the touched lines; changing only the wrapping column re-wraps every line
//! incrementally from its previous data.

use ropey::Rope;
use tracing::debug;

use crate::computer::MonospaceLineBreaksComputerFactory;
use crate::incremental::LineBreakScratch;
use crate::injected_text::LineInjectedText;
use crate::line_break_data::{LineBreakData, PositionAffinity};
use crate::options::WrappingParams;

const LINE_BREAK_CHARS: [char; 7] = ['\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}'];

fn line_content_len(rope: &Rope, line_index: usize) -> usize {
    let line = rope.line(line_index);
    let mut len = line.len_chars();
    while len > 0 && LINE_BREAK_CHARS.contains(&line.char(len - 1)) {
        len -= 1;
    }
    len
}

fn line_content(rope: &Rope, line_index: usize) -> String {
    let len = line_content_len(rope, line_index);
    rope.line(line_index).slice(..len).to_string()
}

/// Wrap layout of a whole document.
pub struct WrapLayout {
    factory: MonospaceLineBreaksComputerFactory,
    params: WrappingParams,
    text: Rope,
    injected_text: Vec<Vec<LineInjectedText>>,
    line_breaks: Vec<Option<LineBreakData>>,
    scratch: LineBreakScratch,
}

impl WrapLayout {
    /// Create a layout over an empty document.
    pub fn new(factory: MonospaceLineBreaksComputerFactory, params: WrappingParams) -> Self {
        Self::from_text(factory, params, "")
    }

    /// Create a layout over `text`.
    pub fn from_text(factory: MonospaceLineBreaksComputerFactory, params: WrappingParams, text: &str) -> Self {
        let mut layout = Self {
            factory,
            params,
            text: Rope::new(),
            injected_text: Vec::new(),
            line_breaks: Vec::new(),
            scratch: LineBreakScratch::new(),
        };
        layout.set_text(text);
        layout
    }

    /// Replace the whole document.
    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        let line_count = self.text.len_lines();
        self.injected_text = vec![Vec::new(); line_count];
        self.line_breaks = vec![None; line_count];
        self.recompute(0..line_count, false);
    }

    /// Current wrapping parameters.
    pub fn params(&self) -> &WrappingParams {
        &self.params
    }

    /// Change the wrapping parameters and re-wrap every line.
    ///
    /// When nothing but the wrapping column changed, each line's previous wrap data seeds the
    /// incremental scanner.
    pub fn set_params(&mut self, params: WrappingParams) {
        if params == self.params {
            return;
        }
        let only_wrapping_column_changed = self.params.only_wrapping_column_differs(&params);
        self.params = params;
        self.recompute(0..self.line_count(), only_wrapping_column_changed);
    }

    /// Change only the wrapping column.
    pub fn set_wrapping_column(&mut self, wrapping_column: Option<usize>) {
        self.set_params(WrappingParams {
            wrapping_column,
            ..self.params
        });
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.line_breaks.len()
    }

    /// Text of a logical line, without its line ending.
    pub fn line_text(&self, line_index: usize) -> Option<String> {
        (line_index < self.line_count()).then(|| line_content(&self.text, line_index))
    }

    /// Wrap data of a logical line (`None` when the line is a single unwrapped row).
    pub fn line_break_data(&self, line_index: usize) -> Option<&LineBreakData> {
        self.line_breaks.get(line_index)?.as_ref()
    }

    /// Replace the content of a logical line (its line ending is kept).
    ///
    /// Line breaks in `text` split it into several logical lines; the first keeps the injected
    /// text of the replaced line.
    pub fn replace_line(&mut self, line_index: usize, text: &str) {
        if line_index >= self.line_count() {
            return;
        }
        let start = self.text.line_to_char(line_index);
        let end = start + line_content_len(&self.text, line_index);
        self.text.remove(start..end);
        self.text.insert(start, text);
        let added = self.resize_line_slots(line_index + 1);
        let end = (line_index + 1 + added).min(self.line_count());
        self.recompute(line_index..end, false);
    }

    /// Insert a logical line before `line_index` (appends when out of range).
    ///
    /// Line breaks in `text` insert several logical lines.
    pub fn insert_line(&mut self, line_index: usize, text: &str) {
        let line_count = self.line_count();
        let at = if line_index >= line_count {
            let end = self.text.len_chars();
            self.text.insert(end, &format!("\n{text}"));
            line_count
        } else {
            let start = self.text.line_to_char(line_index);
            self.text.insert(start, &format!("{text}\n"));
            line_index
        };
        let added = self.resize_line_slots(at);
        let end = (at + added).min(self.line_count());
        self.recompute(at..end, false);
    }

    /// Add or drop per-line slots at `at` until there is one per line of the rope again.
    /// Returns the number of slots added.
    fn resize_line_slots(&mut self, at: usize) -> usize {
        let line_count = self.text.len_lines();
        let slots = self.line_breaks.len();
        if line_count >= slots {
            let added = line_count - slots;
            self.injected_text.splice(at..at, std::iter::repeat_n(Vec::new(), added));
            self.line_breaks.splice(at..at, std::iter::repeat_n(None, added));
            added
        } else {
            // A lone '\r' merged with a '\n' of the edit.
            let end = (at + slots - line_count).min(slots);
            self.injected_text.drain(at..end);
            self.line_breaks.drain(at..end);
            0
        }
    }

    /// Delete a logical line. The last remaining line is cleared instead.
    pub fn delete_line(&mut self, line_index: usize) {
        let line_count = self.line_count();
        if line_index >= line_count {
            return;
        }
        if line_count == 1 {
            self.text = Rope::new();
            self.injected_text[0].clear();
            self.recompute(0..1, false);
            return;
        }

        if line_index + 1 < line_count {
            let start = self.text.line_to_char(line_index);
            let end = self.text.line_to_char(line_index + 1);
            self.text.remove(start..end);
        } else {
            // Last line: drop the line ending of the previous line with it.
            let previous = line_index - 1;
            let start = self.text.line_to_char(previous) + line_content_len(&self.text, previous);
            let end = self.text.len_chars();
            self.text.remove(start..end);
        }
        self.injected_text.remove(line_index);
        self.line_breaks.remove(line_index);
    }

    /// Set the injected text of a logical line and re-wrap it.
    pub fn set_line_injected_text(&mut self, line_index: usize, injected_text: Vec<LineInjectedText>) {
        if line_index >= self.line_count() {
            return;
        }
        self.injected_text[line_index] = injected_text;
        self.recompute(line_index..line_index + 1, false);
    }

    fn recompute(&mut self, lines: std::ops::Range<usize>, reuse_previous: bool) {
        let mut computer = self
            .factory
            .create_line_breaks_computer(self.params)
            .with_scratch(std::mem::take(&mut self.scratch));

        for line_index in lines.clone() {
            let previous = if reuse_previous {
                self.line_breaks[line_index].take()
            } else {
                None
            };
            let injected = &self.injected_text[line_index];
            computer.add_request(
                line_content(&self.text, line_index),
                (!injected.is_empty()).then(|| injected.clone()),
                previous,
            );
        }

        let results = computer.finalize();
        self.scratch = computer.into_scratch();

        debug!(
            start = lines.start,
            count = results.len(),
            incremental = reuse_previous,
            "reflowed wrapped lines"
        );
        for (line_index, result) in lines.zip(results) {
            self.line_breaks[line_index] = result;
        }
    }

    fn rows_of(&self, line_index: usize) -> usize {
        self.line_breaks[line_index]
            .as_ref()
            .map_or(1, LineBreakData::output_line_count)
    }

    /// Total number of visual rows.
    pub fn visual_line_count(&self) -> usize {
        (0..self.line_count()).map(|i| self.rows_of(i)).sum()
    }

    /// Visual row of the first segment of a logical line.
    pub fn logical_to_visual_line(&self, logical_line: usize) -> usize {
        (0..logical_line.min(self.line_count()))
            .map(|i| self.rows_of(i))
            .sum()
    }

    /// Logical line of a visual row, and the segment index of that row within the line.
    ///
    /// Rows past the end resolve to the last segment of the last line.
    pub fn visual_to_logical_line(&self, visual_line: usize) -> (usize, usize) {
        let mut cumulative = 0usize;
        for line_index in 0..self.line_count() {
            let rows = self.rows_of(line_index);
            if cumulative + rows > visual_line {
                return (line_index, visual_line - cumulative);
            }
            cumulative += rows;
        }

        let last_line = self.line_count().saturating_sub(1);
        let last_row = if self.line_count() == 0 {
            0
        } else {
            self.rows_of(last_line) - 1
        };
        (last_line, last_row)
    }

    /// Convert a logical position (line, char column) into (visual row, offset in that row).
    ///
    /// The column is clamped to the line length; continuation rows include the wrapped indent.
    pub fn logical_position_to_visual(&self, logical_line: usize, column: usize) -> Option<(usize, usize)> {
        if logical_line >= self.line_count() {
            return None;
        }
        let column = column.min(line_content_len(&self.text, logical_line));
        let first_row = self.logical_to_visual_line(logical_line);
        match &self.line_breaks[logical_line] {
            None => Some((first_row, column)),
            Some(data) => {
                let position = data.translate_to_output_position(column, PositionAffinity::None);
                Some((first_row + position.output_line_index, position.output_offset))
            }
        }
    }

    /// Convert a visual position (row, offset in the row) into a logical position.
    pub fn visual_position_to_logical(&self, visual_row: usize, offset: usize) -> Option<(usize, usize)> {
        if self.line_count() == 0 || visual_row >= self.visual_line_count() {
            return None;
        }
        let (logical_line, segment) = self.visual_to_logical_line(visual_row);
        let line_len = line_content_len(&self.text, logical_line);
        let column = match &self.line_breaks[logical_line] {
            None => offset,
            Some(data) => {
                let offset = offset.min(data.max_output_offset(segment));
                data.translate_to_input_offset(segment, offset)
            }
        };
        Some((logical_line, column.min(line_len)))
    }
}
