use crate::config::ValidatorConfig;
use crate::pipeline::traits::TokenComparator;
use crate::skip_words::SkipSet;
use crate::types::{AlignmentResult, MismatchReason, MismatchRecord, StopReason, Token};

/// The ratio-based early stop only engages once more than this fraction of
/// the reference has been checked, so short samples cannot trip it.
const MIN_CHECKED_FRACTION: f64 = 0.2;

/// Walks both token sequences with one cursor each and records every
/// reference word the candidate lost.
///
/// The scan is asymmetric. The candidate may carry words the reference
/// lacks, so on disagreement the current reference word is first searched
/// ahead in the candidate (an insertion, passed over silently), then the
/// current candidate word ahead in the reference (a deletion, recorded per
/// lost word). Total for any input; never panics.
pub fn align_tokens(
    reference: &[Token],
    candidate: &[Token],
    skip_words: &SkipSet,
    comparator: &dyn TokenComparator,
    config: &ValidatorConfig,
) -> AlignmentResult {
    let window = config.lookahead_window;
    let mut mismatches: Vec<MismatchRecord> = Vec::new();
    let mut checked = 0usize;
    let mut stop_reason = None;
    let mut i = 0usize;
    let mut j = 0usize;

    while i < reference.len() {
        if reference[i].normalized.is_empty() || skip_words.contains(&reference[i].normalized) {
            i += 1;
            continue;
        }
        checked += 1;

        // Void candidate tokens carry no comparable text.
        while j < candidate.len() && candidate[j].normalized.is_empty() {
            j += 1;
        }

        if j >= candidate.len() {
            mismatches.push(MismatchRecord {
                reference_index: i,
                reference_word: reference[i].surface.clone(),
                candidate_index: None,
                candidate_word: None,
                reason: MismatchReason::CandidateExhausted,
            });
            stop_reason = Some(StopReason::CandidateExhausted);
            break;
        }

        if tokens_match(comparator, &reference[i], &candidate[j]) {
            i += 1;
            j += 1;
        } else {
            // Clamp the window to the sequence tails so oversized configured
            // windows never scan past the end.
            let candidate_reach = window.min(candidate.len().saturating_sub(j + 1));
            let reference_reach = window.min(reference.len().saturating_sub(i + 1));
            let candidate_skip = (1..=candidate_reach)
                .find(|&off| tokens_match(comparator, &reference[i], &candidate[j + off]));
            let reference_skip = (1..=reference_reach)
                .find(|&off| tokens_match(comparator, &reference[i + off], &candidate[j]));

            match (candidate_skip, reference_skip) {
                (Some(c_off), Some(r_off)) => {
                    let c_cont = continuation_agrees(
                        comparator,
                        reference.get(i + 1),
                        candidate.get(j + c_off + 1),
                    );
                    let r_cont = continuation_agrees(
                        comparator,
                        reference.get(i + r_off + 1),
                        candidate.get(j + 1),
                    );
                    let prefer_candidate = if c_cont != r_cont { c_cont } else { c_off <= r_off };
                    if prefer_candidate {
                        j += c_off + 1;
                        i += 1;
                    } else {
                        record_deleted_run(
                            reference,
                            i,
                            r_off,
                            skip_words,
                            &mut checked,
                            &mut mismatches,
                        );
                        i += r_off;
                    }
                }
                (Some(c_off), None) => {
                    j += c_off + 1;
                    i += 1;
                }
                (None, Some(r_off)) => {
                    record_deleted_run(
                        reference,
                        i,
                        r_off,
                        skip_words,
                        &mut checked,
                        &mut mismatches,
                    );
                    i += r_off;
                }
                (None, None) => {
                    mismatches.push(MismatchRecord {
                        reference_index: i,
                        reference_word: reference[i].surface.clone(),
                        candidate_index: Some(j),
                        candidate_word: Some(candidate[j].surface.clone()),
                        reason: MismatchReason::Mismatch,
                    });
                    i += 1;
                }
            }
        }

        if let Some(limit) = config.max_mismatches {
            if mismatches.len() >= limit {
                stop_reason = Some(StopReason::MaxMismatches);
                break;
            }
        }
        if (checked as f64) > reference.len() as f64 * MIN_CHECKED_FRACTION
            && mismatches.len() as f64 / checked as f64 > config.max_mismatch_ratio
        {
            stop_reason = Some(StopReason::MismatchRatio);
            break;
        }
    }

    let mismatch_count = mismatches.len();
    let mismatch_ratio = if checked > 0 {
        mismatch_count as f64 / checked as f64
    } else {
        0.0
    };

    AlignmentResult {
        reference_word_count: reference.len(),
        candidate_word_count: candidate.len(),
        checked_word_count: checked,
        mismatch_count,
        mismatch_ratio,
        mismatches,
        stop_reason,
    }
}

fn tokens_match(comparator: &dyn TokenComparator, reference: &Token, candidate: &Token) -> bool {
    !reference.normalized.is_empty()
        && !candidate.normalized.is_empty()
        && comparator.matches(&reference.normalized, &candidate.normalized)
}

/// A resync offset wins the tie when the pair right after it also lines up.
fn continuation_agrees(
    comparator: &dyn TokenComparator,
    reference: Option<&Token>,
    candidate: Option<&Token>,
) -> bool {
    match (reference, candidate) {
        (Some(r), Some(c)) => tokens_match(comparator, r, c),
        _ => false,
    }
}

/// Emits one deletion record per eligible token in `reference[start..start + length]`.
/// The token at `start` opened the run and is already counted as checked;
/// the rest count here unless void or skip-listed.
fn record_deleted_run(
    reference: &[Token],
    start: usize,
    length: usize,
    skip_words: &SkipSet,
    checked: &mut usize,
    mismatches: &mut Vec<MismatchRecord>,
) {
    for offset in 0..length {
        let token = &reference[start + offset];
        if offset > 0 {
            if token.normalized.is_empty() || skip_words.contains(&token.normalized) {
                continue;
            }
            *checked += 1;
        }
        mismatches.push(MismatchRecord {
            reference_index: start + offset,
            reference_word: token.surface.clone(),
            candidate_index: None,
            candidate_word: None,
            reason: MismatchReason::Deletion,
        });
    }
}
