//! Indentation of wrapped continuation segments.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrapped-line indentation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum WrappingIndent {
    /// Continuations start at column 0.
    None,
    /// Continuations keep the indentation of the logical line.
    #[default]
    Same,
    /// Continuations get the line's indentation plus one tab stop.
    Indent,
    /// Continuations get the line's indentation plus two tab stops.
    DeepIndent,
}

impl WrappingIndent {
    fn additional_tab_stops(self) -> usize {
        match self {
            WrappingIndent::None | WrappingIndent::Same => 0,
            WrappingIndent::Indent => 1,
            WrappingIndent::DeepIndent => 2,
        }
    }
}

/// Index of the first character that is neither a space nor a tab.
pub(crate) fn first_non_whitespace_index(chars: &[char]) -> Option<usize> {
    chars.iter().position(|&ch| ch != ' ' && ch != '\t')
}

/// Columns of extra indentation applied to every continuation segment of a line.
///
/// The existing indentation is the width of the leading spaces and tabs (tabs expand to the next
/// stop). [`WrappingIndent::Indent`] and [`WrappingIndent::DeepIndent`] add one or two more tab
/// stops. When the result would leave no room for a single full-width character before
/// `first_line_break_column`, the indentation is dropped entirely.
pub fn compute_wrapped_text_indent_length(
    line_text: &str,
    tab_size: usize,
    first_line_break_column: usize,
    columns_for_full_width_char: f64,
    wrapping_indent: WrappingIndent,
) -> usize {
    let chars: Vec<char> = line_text.chars().collect();
    wrapped_text_indent_length(
        &chars,
        tab_size,
        first_line_break_column,
        columns_for_full_width_char,
        wrapping_indent,
    )
}

pub(crate) fn wrapped_text_indent_length(
    chars: &[char],
    tab_size: usize,
    first_line_break_column: usize,
    columns_for_full_width_char: f64,
    wrapping_indent: WrappingIndent,
) -> usize {
    if wrapping_indent == WrappingIndent::None {
        return 0;
    }
    let Some(first_non_whitespace) = first_non_whitespace_index(chars) else {
        return 0;
    };

    let tab_size = tab_size.max(1);
    let mut indent = 0usize;
    for &ch in &chars[..first_non_whitespace] {
        indent += if ch == '\t' {
            tab_size - indent % tab_size
        } else {
            1
        };
    }
    for _ in 0..wrapping_indent.additional_tab_stops() {
        indent += tab_size - indent % tab_size;
    }

    if indent as f64 + columns_for_full_width_char > first_line_break_column as f64 {
        indent = 0;
    }
    indent
}
