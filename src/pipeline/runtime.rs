use crate::alignment::engine::align_tokens;
use crate::alignment::noise::{filter_candidate_noise, filter_reference_noise};
use crate::alignment::report::{verdict_for, Verdict};
use crate::alignment::tokenization::tokenize;
use crate::config::ValidatorConfig;
use crate::pipeline::traits::TokenComparator;
use crate::skip_words::SkipSet;
use crate::types::{AlignmentResult, ValidationOutcome};

pub struct TranscriptValidator {
    config: ValidatorConfig,
    skip_words: SkipSet,
    comparator: Box<dyn TokenComparator>,
}

pub(crate) struct TranscriptValidatorParts {
    pub config: ValidatorConfig,
    pub skip_words: SkipSet,
    pub comparator: Box<dyn TokenComparator>,
}

impl TranscriptValidator {
    pub(crate) fn from_parts(parts: TranscriptValidatorParts) -> Self {
        Self {
            config: parts.config,
            skip_words: parts.skip_words,
            comparator: parts.comparator,
        }
    }

    /// Filters noise out of both texts, tokenizes what remains and scans
    /// the candidate for lost reference words. Never fails; reading the
    /// inputs is the caller's concern and empty inputs yield an empty
    /// outcome.
    pub fn validate(&self, reference_text: &str, candidate_text: &str) -> ValidationOutcome {
        if reference_text.trim().is_empty() && candidate_text.trim().is_empty() {
            return ValidationOutcome::default();
        }

        let (reference_text, reference_noise) = filter_reference_noise(reference_text);
        let (candidate_text, candidate_noise) = filter_candidate_noise(candidate_text);
        tracing::debug!(
            speaker_lines = reference_noise.speaker_lines_removed,
            footers = reference_noise.footer_lines_removed,
            headings = candidate_noise.heading_lines_removed,
            labels = candidate_noise.speaker_labels_removed,
            corrections = candidate_noise.corrections_removed,
            "structural noise removed before alignment"
        );
        let reference = tokenize(&reference_text);
        let candidate = tokenize(&candidate_text);

        let result = align_tokens(
            &reference,
            &candidate,
            &self.skip_words,
            self.comparator.as_ref(),
            &self.config,
        );

        if let Some(stop) = result.stop_reason {
            tracing::warn!(
                stop_reason = stop.as_str(),
                checked_words = result.checked_word_count,
                mismatches = result.mismatch_count,
                "alignment scan stopped early; counts cover the scanned prefix only"
            );
        }

        ValidationOutcome {
            result,
            reference_noise,
            candidate_noise,
        }
    }

    /// Applies the configured fail threshold to a finished scan.
    pub fn verdict(&self, result: &AlignmentResult) -> Verdict {
        verdict_for(result, self.config.fail_threshold)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn comparator_name(&self) -> &'static str {
        self.comparator.name()
    }
}
