pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod skip_words;
pub mod types;

pub use alignment::engine::align_tokens;
pub use alignment::noise::{filter_candidate_noise, filter_reference_noise};
pub use alignment::report::{
    aggregate_reports, compute_file_report, verdict_for, AggregateCounts, AggregateReport,
    FileReport, Meta, OutlierEntry, Report, Verdict, SCHEMA_VERSION,
};
pub use alignment::tokenization::{normalize_token, tokenize};
pub use config::ValidatorConfig;
pub use error::ValidationError;
pub use pipeline::builder::TranscriptValidatorBuilder;
pub use pipeline::defaults::{ExactComparator, FuzzyComparator};
pub use pipeline::runtime::TranscriptValidator;
pub use pipeline::traits::TokenComparator;
pub use skip_words::SkipSet;
pub use types::{
    AlignmentResult, CandidateNoise, MismatchReason, MismatchRecord, ReferenceNoise, StopReason,
    Token, ValidationOutcome,
};
