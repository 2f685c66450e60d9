use thiserror::Error;

/// Errors produced when validating wrapping configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WrapConfigError {
    /// `tab_size` was zero.
    #[error("tab size must be at least 1")]
    ZeroTabSize,

    /// Wrapping was enabled with a zero-width column.
    #[error("wrapping column must be at least 1")]
    ZeroWrappingColumn,

    /// `columns_for_full_width_char` was zero, negative, infinite or NaN.
    #[error("columns per full-width character must be a positive finite number, got {0}")]
    InvalidFullWidthRatio(f64),

    /// Font metrics could not produce a full-width ratio.
    #[error("font metrics must be positive finite widths (half-width {halfwidth}, full-width {fullwidth})")]
    InvalidFontMetrics {
        /// Typical half-width character width.
        halfwidth: f64,
        /// Typical full-width character width.
        fullwidth: f64,
    },
}
