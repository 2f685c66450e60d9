//! Wrapping configuration.
//!
//! [`WrappingOptions`] is the configuration surface a host fills from its settings;
//! [`WrappingParams`] is the validated per-pass snapshot the scanners read.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::{DEFAULT_BREAK_AFTER_CHARACTERS, DEFAULT_BREAK_BEFORE_CHARACTERS};
use crate::error::WrapConfigError;
use crate::indent::WrappingIndent;

/// Default tab size (in columns).
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Word-break policy for CJK text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum WordBreak {
    /// Ideographs may be broken between any two characters.
    #[default]
    Normal,
    /// Runs of ideographs are kept together like words.
    KeepAll,
}

impl WordBreak {
    /// Whether ideograph runs are kept together.
    pub fn is_keep_all(self) -> bool {
        self == WordBreak::KeepAll
    }
}

/// Font measurements used to derive how many columns a full-width glyph spans.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FontMetrics {
    /// Typical width of a half-width glyph (e.g. `x`), in pixels.
    pub typical_halfwidth_character_width: f64,
    /// Typical width of a full-width glyph (e.g. `Ｍ`), in pixels.
    pub typical_fullwidth_character_width: f64,
}

impl FontMetrics {
    /// Create font metrics.
    pub fn new(typical_halfwidth_character_width: f64, typical_fullwidth_character_width: f64) -> Self {
        Self {
            typical_halfwidth_character_width,
            typical_fullwidth_character_width,
        }
    }

    /// Full-width glyph width expressed in half-width columns.
    pub fn columns_for_full_width_char(&self) -> Result<f64, WrapConfigError> {
        let halfwidth = self.typical_halfwidth_character_width;
        let fullwidth = self.typical_fullwidth_character_width;
        if !(halfwidth.is_finite() && fullwidth.is_finite() && halfwidth > 0.0 && fullwidth > 0.0) {
            return Err(WrapConfigError::InvalidFontMetrics { halfwidth, fullwidth });
        }
        Ok(fullwidth / halfwidth)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

/// Per-pass wrapping parameters read by the scanners.
///
/// The scanners never fail on these values; validation happens in [`WrappingOptions::params`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappingParams {
    /// Tab size in columns.
    pub tab_size: usize,
    /// Column at which to wrap, or `None` when wrapping is disabled.
    pub wrapping_column: Option<usize>,
    /// Columns spanned by a full-width glyph.
    pub columns_for_full_width_char: f64,
    /// Indentation policy of continuation segments.
    pub wrapping_indent: WrappingIndent,
    /// Word-break policy for ideographs.
    pub word_break: WordBreak,
    /// Render `\n` escapes inside lines containing `"` as visual line breaks.
    pub wrap_on_escaped_line_feeds: bool,
}

impl WrappingParams {
    /// Parameters with the given tab size and wrapping column and default everything else.
    pub fn new(tab_size: usize, wrapping_column: Option<usize>) -> Self {
        Self {
            tab_size,
            wrapping_column,
            ..Self::default()
        }
    }

    /// Set the full-width column ratio.
    pub fn with_columns_for_full_width_char(mut self, columns: f64) -> Self {
        self.columns_for_full_width_char = columns;
        self
    }

    /// Set the wrapped-line indentation policy.
    pub fn with_wrapping_indent(mut self, wrapping_indent: WrappingIndent) -> Self {
        self.wrapping_indent = wrapping_indent;
        self
    }

    /// Set the word-break policy.
    pub fn with_word_break(mut self, word_break: WordBreak) -> Self {
        self.word_break = word_break;
        self
    }

    /// Enable or disable wrapping on escaped line feeds.
    pub fn with_wrap_on_escaped_line_feeds(mut self, enabled: bool) -> Self {
        self.wrap_on_escaped_line_feeds = enabled;
        self
    }

    /// Whether `other` differs from `self` in nothing but the wrapping column.
    ///
    /// Previous wrap data can only seed the incremental scanner in that case.
    pub fn only_wrapping_column_differs(&self, other: &WrappingParams) -> bool {
        Self {
            wrapping_column: other.wrapping_column,
            ..*self
        } == *other
    }
}

impl Default for WrappingParams {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            wrapping_column: None,
            columns_for_full_width_char: 2.0,
            wrapping_indent: WrappingIndent::default(),
            word_break: WordBreak::default(),
            wrap_on_escaped_line_feeds: false,
        }
    }
}

/// Host-facing wrapping configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct WrappingOptions {
    /// Characters a wrapped segment should preferably start with.
    pub word_wrap_break_before_characters: String,
    /// Characters a wrapped segment should preferably end with.
    pub word_wrap_break_after_characters: String,
    /// Tab size in columns.
    pub tab_size: usize,
    /// Column at which to wrap, or `None` to disable wrapping.
    pub wrapping_column: Option<usize>,
    /// Font measurements for the full-width column ratio.
    pub font_metrics: FontMetrics,
    /// Indentation policy of continuation segments.
    pub wrapping_indent: WrappingIndent,
    /// Word-break policy for ideographs.
    pub word_break: WordBreak,
    /// Render `\n` escapes inside string-bearing lines as visual line breaks.
    pub wrap_on_escaped_line_feeds: bool,
}

impl Default for WrappingOptions {
    fn default() -> Self {
        Self {
            word_wrap_break_before_characters: DEFAULT_BREAK_BEFORE_CHARACTERS.to_string(),
            word_wrap_break_after_characters: DEFAULT_BREAK_AFTER_CHARACTERS.to_string(),
            tab_size: DEFAULT_TAB_SIZE,
            wrapping_column: None,
            font_metrics: FontMetrics::default(),
            wrapping_indent: WrappingIndent::default(),
            word_break: WordBreak::default(),
            wrap_on_escaped_line_feeds: false,
        }
    }
}

impl WrappingOptions {
    /// Check the options without building params.
    pub fn validate(&self) -> Result<(), WrapConfigError> {
        self.params().map(|_| ())
    }

    /// Validate the options and derive the scanner parameters.
    pub fn params(&self) -> Result<WrappingParams, WrapConfigError> {
        let result = self.build_params();
        if let Err(err) = &result {
            warn!(error = %err, "rejected wrapping options");
        }
        result
    }

    fn build_params(&self) -> Result<WrappingParams, WrapConfigError> {
        if self.tab_size == 0 {
            return Err(WrapConfigError::ZeroTabSize);
        }
        if self.wrapping_column == Some(0) {
            return Err(WrapConfigError::ZeroWrappingColumn);
        }
        let columns_for_full_width_char = self.font_metrics.columns_for_full_width_char()?;
        if !(columns_for_full_width_char.is_finite() && columns_for_full_width_char > 0.0) {
            return Err(WrapConfigError::InvalidFullWidthRatio(columns_for_full_width_char));
        }

        Ok(WrappingParams {
            tab_size: self.tab_size,
            wrapping_column: self.wrapping_column,
            columns_for_full_width_char,
            wrapping_indent: self.wrapping_indent,
            word_break: self.word_break,
            wrap_on_escaped_line_feeds: self.wrap_on_escaped_line_feeds,
        })
    }
}
