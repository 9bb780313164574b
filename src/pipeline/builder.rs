use std::path::PathBuf;

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::pipeline::defaults::ExactComparator;
use crate::pipeline::runtime::{TranscriptValidator, TranscriptValidatorParts};
use crate::pipeline::traits::TokenComparator;
use crate::skip_words::SkipSet;

pub struct TranscriptValidatorBuilder {
    config: ValidatorConfig,
    comparator: Option<Box<dyn TokenComparator>>,
    skip_words: Option<SkipSet>,
    skip_words_path: Option<PathBuf>,
}

impl TranscriptValidatorBuilder {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            comparator: None,
            skip_words: None,
            skip_words_path: None,
        }
    }

    pub fn with_comparator(mut self, comparator: Box<dyn TokenComparator>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn with_skip_words(mut self, skip_words: SkipSet) -> Self {
        self.skip_words = Some(skip_words);
        self
    }

    /// Entries loaded from the file extend any set given directly.
    pub fn with_skip_words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_words_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<TranscriptValidator, ValidationError> {
        self.config.validate()?;

        let mut skip_words = self.skip_words.unwrap_or_default();
        if let Some(path) = &self.skip_words_path {
            skip_words.extend(SkipSet::load(path)?);
        }

        Ok(TranscriptValidator::from_parts(TranscriptValidatorParts {
            config: self.config,
            skip_words,
            comparator: self
                .comparator
                .unwrap_or_else(|| Box::new(ExactComparator)),
        }))
    }
}
