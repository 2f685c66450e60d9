#![warn(missing_docs)]
//! Editor Core Wrap - Headless Monospace Line-Breaks Computer
//!
//! # Overview
//!
//! `editor-core-wrap` computes where a monospace renderer must insert soft line breaks. It takes
//! the text of a logical line (plus optional injected virtual text) and produces the offsets at
//! which each wrapped segment ends, the visible column of every break, and the indentation of
//! continuation segments. Rendering is left to the host.
//!
//! # Core Features
//!
//! - **Kinsoku-aware breaking**: configurable break-before / break-after character sets, CJK and
//!   Kana breakable between characters (or kept together with [`WordBreak::KeepAll`])
//! - **Accurate columns**: tab stops, full-width glyphs with a font-derived column ratio, wide
//!   control-character substitutions
//! - **Wrapped indent**: continuations keep or deepen the line's indentation
//! - **Incremental re-wrap**: changing the wrapping column reuses previous break points as anchors
//! - **Batching**: requests are queued and computed in one [`LineBreaksComputer::finalize`] pass
//!   with recycled scratch buffers
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  WrapLayout (document projection)           │  ← Consumer
//! ├─────────────────────────────────────────────┤
//! │  Factory / LineBreaksComputer (batching)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Fresh scanner  |  Incremental scanner      │  ← Break points
//! ├─────────────────────────────────────────────┤
//! │  Classifier | Width model | Wrapped indent  │  ← Leaves
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_core_wrap::{MonospaceLineBreaksComputerFactory, WrappingIndent, WrappingParams};
//!
//! let factory = MonospaceLineBreaksComputerFactory::default();
//! let params = WrappingParams::new(4, Some(10)).with_wrapping_indent(WrappingIndent::None);
//!
//! let mut computer = factory.create_line_breaks_computer(params);
//! computer.add_request("just some text and more", None, None);
//! computer.add_request("short", None, None);
//! let results = computer.finalize();
//!
//! let data = results[0].as_ref().unwrap();
//! assert_eq!(data.break_offsets, vec![10, 19, 23]);
//! assert!(results[1].is_none());
//! ```
//!
//! # Module Description
//!
//! - [`classifier`] - wrap-affinity classes of characters
//! - [`width`] - visible-column width model
//! - [`indent`] - wrapped-text indentation
//! - [`injected_text`] - virtual text spliced into lines
//! - [`line_break_data`] - per-line result and output/input position mapping
//! - [`fresh`] - full left-to-right scan
//! - [`incremental`] - re-wrap from previous break points
//! - [`computer`] - factory and batched computer
//! - [`options`] - configuration surface
//! - [`layout`] - document-level wrap layout

pub mod classifier;
pub mod computer;
mod error;
pub mod fresh;
pub mod incremental;
pub mod indent;
pub mod injected_text;
pub mod layout;
pub mod line_break_data;
pub mod options;
pub mod width;

pub use classifier::{
    CharacterClass, DEFAULT_BREAK_AFTER_CHARACTERS, DEFAULT_BREAK_BEFORE_CHARACTERS,
    WrappingCharacterClassifier,
};
pub use computer::{LineBreaksComputer, MonospaceLineBreaksComputerFactory};
pub use error::WrapConfigError;
pub use fresh::{can_break, create_line_breaks};
pub use incremental::{LineBreakScratch, create_line_breaks_from_previous};
pub use indent::{WrappingIndent, compute_wrapped_text_indent_length};
pub use injected_text::{InjectedTextOptions, LineInjectedText, apply_injected_text};
pub use layout::WrapLayout;
pub use line_break_data::{LineBreakData, OutputPosition, PositionAffinity};
pub use options::{FontMetrics, WordBreak, WrappingOptions, WrappingParams};
pub use width::compute_char_width;
