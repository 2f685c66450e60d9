//! Injected (virtual) text spliced into a line before wrapping.
//!
//! Injected text is rendered inline (inlay hints, ghost text) and takes part in the wrap
//! computation, but it is not part of the document. Break offsets computed for a line with
//! injected text refer to the composed text.

use std::borrow::Cow;

/// Rendering options of one injection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InjectedTextOptions {
    /// Text spliced into the line.
    pub content: String,
    /// Optional class name the host applies when rendering the injection.
    pub inline_class_name: Option<String>,
}

impl InjectedTextOptions {
    /// Create options carrying only `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            inline_class_name: None,
        }
    }

    /// Attach a render class name.
    pub fn with_inline_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.inline_class_name = Some(class_name.into());
        self
    }

    /// Length of the injected content, in `char`s.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// An injection anchored at a character offset of the logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInjectedText {
    /// Character offset in the document line where the content is inserted.
    pub offset: usize,
    /// Content and render options.
    pub options: InjectedTextOptions,
}

impl LineInjectedText {
    /// Create an injection at `offset`.
    pub fn new(offset: usize, options: InjectedTextOptions) -> Self {
        Self { offset, options }
    }
}

fn byte_offset_for_char_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte_offset, _)| byte_offset)
}

/// Splice every injection into `line_text`.
///
/// Injections are applied in the given order; offsets past the end of the line are clamped to
/// the end, and an offset smaller than the previous one is treated as the previous one.
pub fn apply_injected_text<'a>(line_text: &'a str, injected: &[LineInjectedText]) -> Cow<'a, str> {
    if injected.is_empty() {
        return Cow::Borrowed(line_text);
    }

    let extra: usize = injected.iter().map(|i| i.options.content.len()).sum();
    let mut composed = String::with_capacity(line_text.len() + extra);
    let mut last = 0usize;
    for injection in injected {
        let at = byte_offset_for_char_offset(line_text, injection.offset).max(last);
        composed.push_str(&line_text[last..at]);
        composed.push_str(&injection.options.content);
        last = at;
    }
    composed.push_str(&line_text[last..]);
    Cow::Owned(composed)
}

/// The injections with the offsets [`apply_injected_text`] actually splices at: clamped to
/// `line_len` and never decreasing.
pub(crate) fn normalize_injected_text(
    line_len: usize,
    injected: &[LineInjectedText],
) -> Vec<LineInjectedText> {
    let mut last = 0usize;
    injected
        .iter()
        .map(|injection| {
            last = injection.offset.min(line_len).max(last);
            LineInjectedText::new(last, injection.options.clone())
        })
        .collect()
}
