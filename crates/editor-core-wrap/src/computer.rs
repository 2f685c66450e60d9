//! Batched line-breaks computation.
//!
//! A [`MonospaceLineBreaksComputerFactory`] owns the character classifier built from the
//! configuration. For every layout pass it hands out a [`LineBreaksComputer`]: requests are
//! queued with [`add_request`](LineBreaksComputer::add_request) and all computed at once by
//! [`finalize`](LineBreaksComputer::finalize).

use tracing::trace;

use crate::classifier::WrappingCharacterClassifier;
use crate::fresh::create_line_breaks_for_chars;
use crate::incremental::{LineBreakScratch, create_line_breaks_from_previous_for_chars};
use crate::injected_text::{LineInjectedText, apply_injected_text};
use crate::line_break_data::LineBreakData;
use crate::options::{WrappingOptions, WrappingParams};

/// Builds line-breaks computers sharing one classifier.
#[derive(Debug, Clone, Default)]
pub struct MonospaceLineBreaksComputerFactory {
    classifier: WrappingCharacterClassifier,
}

impl MonospaceLineBreaksComputerFactory {
    /// Create a factory from the break-before / break-after character sets.
    pub fn new(break_before: &str, break_after: &str) -> Self {
        Self {
            classifier: WrappingCharacterClassifier::new(break_before, break_after),
        }
    }

    /// Create a factory from host options.
    pub fn from_options(options: &WrappingOptions) -> Self {
        Self::new(
            &options.word_wrap_break_before_characters,
            &options.word_wrap_break_after_characters,
        )
    }

    /// The classifier shared by every computer of this factory.
    pub fn classifier(&self) -> &WrappingCharacterClassifier {
        &self.classifier
    }

    /// Start a batch with the given parameters.
    pub fn create_line_breaks_computer(&self, params: WrappingParams) -> LineBreaksComputer<'_> {
        LineBreaksComputer {
            classifier: &self.classifier,
            params,
            requests: Vec::new(),
            scratch: LineBreakScratch::new(),
        }
    }
}

#[derive(Debug)]
struct LineBreakRequest {
    line_text: String,
    injected_text: Vec<LineInjectedText>,
    previous: Option<LineBreakData>,
}

/// One batch of line-break requests.
///
/// Results of [`finalize`](Self::finalize) are index-aligned with the order of
/// [`add_request`](Self::add_request) calls. The computer can be reused for further batches with
/// the same parameters; its scratch buffers are recycled across batches.
#[derive(Debug)]
pub struct LineBreaksComputer<'a> {
    classifier: &'a WrappingCharacterClassifier,
    params: WrappingParams,
    requests: Vec<LineBreakRequest>,
    scratch: LineBreakScratch,
}

impl<'a> LineBreaksComputer<'a> {
    /// Use caller-owned scratch buffers instead of fresh ones.
    pub fn with_scratch(mut self, scratch: LineBreakScratch) -> Self {
        self.scratch = scratch;
        self
    }

    /// Give the scratch buffers back to the caller.
    pub fn into_scratch(self) -> LineBreakScratch {
        self.scratch
    }

    /// The parameters of this batch.
    pub fn params(&self) -> &WrappingParams {
        &self.params
    }

    /// Number of queued requests.
    pub fn pending(&self) -> usize {
        self.requests.len()
    }

    /// Queue one line. Nothing is computed until [`finalize`](Self::finalize).
    ///
    /// `previous` is the line's wrap data from an earlier pass with different wrapping column;
    /// it is moved into the computer and may come back (with new contents) as the result. Data
    /// computed for a different text is ignored.
    pub fn add_request(
        &mut self,
        line_text: impl Into<String>,
        injected_text: Option<Vec<LineInjectedText>>,
        previous: Option<LineBreakData>,
    ) {
        self.requests.push(LineBreakRequest {
            line_text: line_text.into(),
            injected_text: injected_text.unwrap_or_default(),
            previous,
        });
    }

    /// Compute every queued request, in order.
    pub fn finalize(&mut self) -> Vec<Option<LineBreakData>> {
        let requests = std::mem::take(&mut self.requests);
        let mut results = Vec::with_capacity(requests.len());
        let mut incremental = 0usize;

        for request in requests {
            let mut chars = std::mem::take(&mut self.scratch.chars);
            chars.clear();
            chars.extend(apply_injected_text(&request.line_text, &request.injected_text).chars());

            let result = match request.previous {
                Some(previous)
                    if self.can_reuse(
                        &previous,
                        &request.injected_text,
                        &request.line_text,
                        &chars,
                    ) =>
                {
                    incremental += 1;
                    create_line_breaks_from_previous_for_chars(
                        self.classifier,
                        previous,
                        &chars,
                        &self.params,
                        &mut self.scratch,
                    )
                }
                _ => create_line_breaks_for_chars(
                    self.classifier,
                    &chars,
                    &request.injected_text,
                    &self.params,
                ),
            };

            self.scratch.chars = chars;
            results.push(result);
        }

        trace!(
            requests = results.len(),
            incremental,
            fresh = results.len() - incremental,
            "computed line breaks"
        );
        results
    }

    /// Whether `previous` may seed the scan: it was computed for exactly these chars and neither
    /// side carries injected text.
    fn can_reuse(
        &self,
        previous: &LineBreakData,
        injected_text: &[LineInjectedText],
        line_text: &str,
        chars: &[char],
    ) -> bool {
        let wraps_escaped_line_feeds = self.params.wrap_on_escaped_line_feeds
            && line_text.contains('"')
            && line_text.contains("\\n");
        !previous.has_injected_text()
            && injected_text.is_empty()
            && !wraps_escaped_line_feeds
            && previous.was_computed_for(chars)
    }
}
