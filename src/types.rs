use serde::Serialize;

/// A whitespace-delimited unit of transcript text. The surface form is kept
/// for reporting; comparisons only ever see the normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Empty when the token is pure punctuation; such tokens are never compared.
    pub normalized: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// Tokens at the cursors disagree and no resync was found within the window.
    Mismatch,
    /// Reference token with no counterpart in the candidate.
    Deletion,
    /// The candidate ran out of tokens before the reference was consumed.
    CandidateExhausted,
}

impl MismatchReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mismatch => "mismatch",
            Self::Deletion => "deletion",
            Self::CandidateExhausted => "candidate_exhausted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    CandidateExhausted,
    MaxMismatches,
    MismatchRatio,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CandidateExhausted => "candidate_exhausted",
            Self::MaxMismatches => "max_mismatches",
            Self::MismatchRatio => "mismatch_ratio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MismatchRecord {
    pub reference_index: usize,
    pub reference_word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_word: Option<String>,
    pub reason: MismatchReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentResult {
    pub reference_word_count: usize,
    pub candidate_word_count: usize,
    /// Reference tokens actually compared: non-void and not in the skip set.
    pub checked_word_count: usize,
    pub mismatch_count: usize,
    /// Equals mismatch_count / checked_word_count, or 0.0 when nothing was checked.
    pub mismatch_ratio: f64,
    pub mismatches: Vec<MismatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// Lines and spans the reference-side noise filter removed before tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReferenceNoise {
    pub speaker_lines_removed: usize,
    pub footer_lines_removed: usize,
}

/// Lines and spans the candidate-side noise filter removed before tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CandidateNoise {
    pub heading_lines_removed: usize,
    pub speaker_labels_removed: usize,
    pub corrections_removed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub result: AlignmentResult,
    pub reference_noise: ReferenceNoise,
    pub candidate_noise: CandidateNoise,
}
