use std::cmp::Ordering;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::{
    AlignmentResult, CandidateNoise, MismatchRecord, ReferenceNoise, StopReason, ValidationOutcome,
};

pub const SCHEMA_VERSION: u32 = 1;

const OUTLIER_TOP_N: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub files: Vec<FileReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub case_count: usize,
    pub lookahead_window: usize,
    pub max_mismatch_ratio: f64,
    pub fail_threshold: f64,
    pub comparator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    PassWithWarnings,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::PassWithWarnings => "pass_with_warnings",
            Verdict::Fail => "fail",
        }
    }

    pub fn is_pass(self) -> bool {
        !matches!(self, Verdict::Fail)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub id: String,
    pub verdict: Verdict,
    pub reference_word_count: u32,
    pub candidate_word_count: u32,
    pub checked_word_count: u32,
    pub mismatch_count: u32,
    pub mismatch_ratio: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    pub reference_noise: ReferenceNoise,
    pub candidate_noise: CandidateNoise,
    pub mismatches: Vec<MismatchRecord>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub worst_mismatch_ratio: Vec<OutlierEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub passed: u32,
    pub passed_with_warnings: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierEntry {
    pub id: String,
    pub verdict: Verdict,
    pub value: f32,
}

/// Ratio at or below the threshold passes; recorded mismatches under a
/// passing ratio downgrade the verdict to a warning instead of a failure.
pub fn verdict_for(result: &AlignmentResult, fail_threshold: f64) -> Verdict {
    if result.mismatch_ratio > fail_threshold {
        Verdict::Fail
    } else if result.mismatch_count > 0 {
        Verdict::PassWithWarnings
    } else {
        Verdict::Pass
    }
}

pub fn compute_file_report(
    id: &str,
    outcome: &ValidationOutcome,
    fail_threshold: f64,
) -> Result<FileReport, ValidationError> {
    let result = &outcome.result;
    let mut notes = Vec::new();

    if result.reference_word_count == 0 {
        notes.push("empty_reference".to_string());
    } else if result.checked_word_count == 0 {
        notes.push("no_checked_words".to_string());
    }
    if let Some(stop) = result.stop_reason {
        notes.push(format!("early_stop:{}", stop.as_str()));
    }

    Ok(FileReport {
        id: id.to_string(),
        verdict: verdict_for(result, fail_threshold),
        reference_word_count: to_u32(result.reference_word_count),
        candidate_word_count: to_u32(result.candidate_word_count),
        checked_word_count: to_u32(result.checked_word_count),
        mismatch_count: to_u32(result.mismatch_count),
        mismatch_ratio: checked_f32(result.mismatch_ratio, "file.mismatch_ratio")?,
        stop_reason: result.stop_reason,
        reference_noise: outcome.reference_noise,
        candidate_noise: outcome.candidate_noise,
        mismatches: result.mismatches.clone(),
        notes,
    })
}

pub fn aggregate_reports(files: &[FileReport]) -> AggregateReport {
    let mut passed = 0usize;
    let mut passed_with_warnings = 0usize;
    let mut failed = 0usize;
    for file in files {
        match file.verdict {
            Verdict::Pass => passed += 1,
            Verdict::PassWithWarnings => passed_with_warnings += 1,
            Verdict::Fail => failed += 1,
        }
    }

    let worst_mismatch_ratio = ranked_outliers(files, OUTLIER_TOP_N, |file| {
        (file.mismatch_count > 0).then_some(file.mismatch_ratio as f64)
    });

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(files.len()),
            passed: to_u32(passed),
            passed_with_warnings: to_u32(passed_with_warnings),
            failed: to_u32(failed),
        },
        worst_mismatch_ratio,
    }
}

fn ranked_outliers(
    files: &[FileReport],
    top_n: usize,
    metric: impl Fn(&FileReport) -> Option<f64>,
) -> Vec<OutlierEntry> {
    let mut entries: Vec<OutlierEntry> = files
        .iter()
        .filter_map(|file| {
            metric(file).map(|value| OutlierEntry {
                id: file.id.clone(),
                verdict: file.verdict,
                value: value as f32,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries.truncate(top_n);
    entries
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn checked_f32(value: f64, metric_name: &str) -> Result<f32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_input(format!(
            "metric '{metric_name}' produced non-finite value: {value}"
        )));
    }
    Ok(value as f32)
}
