use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use verbatim_rs::{Report, Verdict};

/// Writes the full report as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report).map_err(|err| {
        format!(
            "Failed to serialize report JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize report file '{}': {err}", path.display()))?;
    Ok(())
}

/// Prints the human-readable verdict summary. Clean passes are elided;
/// each failing or warning file lists up to `display_limit` mismatch
/// records.
pub fn print_summary(report: &Report, display_limit: usize) {
    println!(
        "fidelity report: {} file(s), comparator={}",
        report.meta.case_count, report.meta.comparator
    );
    let counts = &report.aggregates.counts;
    println!(
        "verdicts: pass={} pass_with_warnings={} fail={}",
        counts.passed, counts.passed_with_warnings, counts.failed
    );

    for file in &report.files {
        if file.verdict == Verdict::Pass {
            continue;
        }
        let stop = file
            .stop_reason
            .map(|reason| format!(" stop={}", reason.as_str()))
            .unwrap_or_default();
        println!(
            "{} {} ratio={:.4} checked={} mismatches={}{}",
            file.verdict.as_str(),
            file.id,
            file.mismatch_ratio,
            file.checked_word_count,
            file.mismatch_count,
            stop
        );
        for record in file.mismatches.iter().take(display_limit) {
            match (record.candidate_word.as_deref(), record.candidate_index) {
                (Some(word), Some(index)) => println!(
                    "  [{}] ref #{} '{}' vs cand #{index} '{word}'",
                    record.reason.as_str(),
                    record.reference_index,
                    record.reference_word,
                ),
                _ => println!(
                    "  [{}] ref #{} '{}'",
                    record.reason.as_str(),
                    record.reference_index,
                    record.reference_word,
                ),
            }
        }
        let hidden = file.mismatches.len().saturating_sub(display_limit);
        if hidden > 0 {
            println!("  ... {hidden} more record(s) not shown");
        }
    }
}
