use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use verbatim_rs::{
    aggregate_reports, compute_file_report, FileReport, FuzzyComparator, Meta, Report,
    TranscriptValidatorBuilder, ValidatorConfig, Verdict, SCHEMA_VERSION,
};

#[path = "fidelity_report/report_output.rs"]
mod report_output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fidelity_report")]
#[command(about = "Validate reformatted transcripts against their raw sources")]
struct Args {
    /// Raw reference transcript for a single comparison.
    #[arg(long, env = "FIDELITY_REPORT_REFERENCE", requires = "candidate")]
    reference: Option<PathBuf>,
    /// Reformatted candidate document for a single comparison.
    #[arg(long, env = "FIDELITY_REPORT_CANDIDATE", requires = "reference")]
    candidate: Option<PathBuf>,
    /// Directory scanned recursively for `<name>.txt` references, each
    /// validated against its `<name>.md` sibling.
    #[arg(
        long,
        env = "FIDELITY_REPORT_BATCH_ROOT",
        conflicts_with_all = ["reference", "candidate"]
    )]
    batch_root: Option<PathBuf>,
    /// Optional JSON config file; flags below override its values.
    #[arg(long, env = "FIDELITY_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "FIDELITY_REPORT_SKIP_WORDS")]
    skip_words: Option<PathBuf>,
    #[arg(long, env = "FIDELITY_REPORT_LOOKAHEAD_WINDOW")]
    lookahead_window: Option<usize>,
    #[arg(long, env = "FIDELITY_REPORT_MAX_MISMATCH_RATIO")]
    max_mismatch_ratio: Option<f64>,
    #[arg(long, env = "FIDELITY_REPORT_MAX_MISMATCHES")]
    max_mismatches: Option<usize>,
    #[arg(long, env = "FIDELITY_REPORT_FAIL_THRESHOLD")]
    fail_threshold: Option<f64>,
    #[arg(long, env = "FIDELITY_REPORT_DISPLAY_LIMIT")]
    display_limit: Option<usize>,
    /// Tolerate small spelling drift instead of requiring exact words.
    #[arg(long, env = "FIDELITY_REPORT_FUZZY", default_value_t = false)]
    fuzzy: bool,
    #[arg(
        long,
        env = "FIDELITY_REPORT_FUZZY_THRESHOLD",
        default_value_t = FuzzyComparator::DEFAULT_MIN_SIMILARITY
    )]
    fuzzy_threshold: f64,
    #[arg(long, env = "FIDELITY_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "FIDELITY_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(
        long,
        env = "FIDELITY_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Summary
    )]
    output_format: OutputFormat,
}

#[derive(Debug, Clone)]
struct Case {
    id: String,
    reference_path: PathBuf,
    candidate_path: PathBuf,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    }
}

fn run() -> Result<bool, String> {
    init_logging();
    let args = Args::parse();

    let mut config = match args.config.as_ref() {
        Some(path) => ValidatorConfig::load(path)
            .map_err(|err| format!("Failed to load validator config: {err}"))?,
        None => ValidatorConfig::default(),
    };
    if let Some(window) = args.lookahead_window {
        config.lookahead_window = window;
    }
    if let Some(ratio) = args.max_mismatch_ratio {
        config.max_mismatch_ratio = ratio;
    }
    if let Some(cap) = args.max_mismatches {
        config.max_mismatches = Some(cap);
    }
    if let Some(threshold) = args.fail_threshold {
        config.fail_threshold = threshold;
    }
    if let Some(limit) = args.display_limit {
        config.display_limit = limit;
    }

    let out_path = match args.output_format {
        OutputFormat::Json => Some(resolve_out_path(args.out.as_ref())),
        OutputFormat::Summary => None,
    };

    let mut cases = match (&args.reference, &args.candidate, &args.batch_root) {
        (Some(reference), Some(candidate), None) => load_single_case(reference, candidate)?,
        (None, None, Some(batch_root)) => load_batch_cases(batch_root)?,
        _ => {
            return Err(
                "Provide either --reference with --candidate, or --batch-root.".to_string(),
            );
        }
    };
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No transcript pairs selected after applying --limit.".to_string());
    }

    let mut builder = TranscriptValidatorBuilder::new(config.clone());
    if args.fuzzy {
        builder = builder.with_comparator(Box::new(FuzzyComparator::new(args.fuzzy_threshold)));
    }
    if let Some(path) = args.skip_words.as_ref() {
        require_path_exists(path, "Missing --skip-words path.")?;
        builder = builder.with_skip_words_file(path);
    }
    let validator = builder
        .build()
        .map_err(|err| format!("Failed to build transcript validator: {err}"))?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut files: Vec<FileReport> = Vec::with_capacity(cases.len());
    for case in &cases {
        progress.set_message(case.id.clone());
        let reference_text = fs::read_to_string(&case.reference_path).map_err(|err| {
            format!(
                "Failed to read reference '{}': {err}",
                case.reference_path.display()
            )
        })?;
        let candidate_text = fs::read_to_string(&case.candidate_path).map_err(|err| {
            format!(
                "Failed to read candidate '{}': {err}",
                case.candidate_path.display()
            )
        })?;

        let outcome = validator.validate(&reference_text, &candidate_text);
        let file_report = compute_file_report(&case.id, &outcome, config.fail_threshold)
            .map_err(|err| format!("{}: report computation failed: {err}", case.id))?;
        if file_report.verdict == Verdict::PassWithWarnings {
            tracing::warn!(
                case = file_report.id.as_str(),
                mismatches = file_report.mismatch_count,
                "passed under the failure threshold with mismatches recorded"
            );
        }
        files.push(file_report);
        progress.inc(1);
    }
    progress.finish_with_message("validation pass complete");

    let aggregates = aggregate_reports(&files);
    let report = Report {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            case_count: files.len(),
            lookahead_window: config.lookahead_window,
            max_mismatch_ratio: config.max_mismatch_ratio,
            fail_threshold: config.fail_threshold,
            comparator: validator.comparator_name().to_string(),
        },
        files,
        aggregates,
    };

    match args.output_format {
        OutputFormat::Json => {
            let out_path = out_path.ok_or_else(|| {
                "internal error: missing output path for JSON report format".to_string()
            })?;
            report_output::write_json(&out_path, &report)?;
            println!("{}", out_path.display());
        }
        OutputFormat::Summary => {
            report_output::print_summary(&report, config.display_limit);
        }
    }

    Ok(report.aggregates.counts.failed == 0)
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_single_case(reference: &Path, candidate: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(reference, "Missing --reference path.")?;
    require_path_exists(candidate, "Missing --candidate path.")?;
    let id = reference
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("case")
        .to_string();
    Ok(vec![Case {
        id,
        reference_path: reference.to_path_buf(),
        candidate_path: candidate.to_path_buf(),
    }])
}

fn load_batch_cases(batch_root: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(batch_root, "Missing --batch-root directory.")?;

    let mut references = Vec::new();
    collect_reference_files(batch_root, &mut references)?;
    references.sort();
    if references.is_empty() {
        return Err(format!(
            "No .txt reference transcripts found in '{}'.",
            batch_root.display()
        ));
    }

    let mut cases = Vec::with_capacity(references.len());
    for reference_path in references {
        let candidate_path = reference_path.with_extension("md");
        require_path_exists(
            &candidate_path,
            &format!(
                "Missing sibling .md candidate for reference '{}'.",
                reference_path.display()
            ),
        )?;
        let id = reference_path
            .strip_prefix(batch_root)
            .unwrap_or(&reference_path)
            .with_extension("")
            .to_string_lossy()
            .replace('\\', "/");
        cases.push(Case {
            id,
            reference_path,
            candidate_path,
        });
    }
    Ok(cases)
}

fn collect_reference_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?;
    for entry in entries {
        let entry = entry.map_err(|err| {
            format!(
                "Failed to read directory entry in '{}': {err}",
                dir.display()
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_reference_files(&path, out)?;
            continue;
        }
        if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        {
            out.push(path);
        }
    }
    Ok(())
}

fn resolve_out_path(out: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = out {
        return path.clone();
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    PathBuf::from("fidelity_reports").join(format!("fidelity-report-{run_id}.json"))
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
