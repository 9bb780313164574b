use std::sync::LazyLock;

use regex::Regex;

use crate::types::{CandidateNoise, ReferenceNoise};

/// Speaker-attribution line as transcription services emit them.
/// Pattern: up to four capitalized (or numeric) words, then a h:mm[:ss]
/// timestamp, nothing else on the line.
static SPEAKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*[A-Z][A-Za-z.'\-]*(?: (?:[A-Z][A-Za-z.'\-]*|\d+)){0,3}\s+\d{1,2}:\d{2}(?::\d{2})?\s*$",
    )
    .expect("valid speaker line regex")
});

/// Bracketed-timestamp speaker label on a line of its own, e.g. `[00:00:12.3] Name:`.
/// Lines where speech follows the label are kept.
static BRACKET_SPEAKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\d{1,2}:\d{2}(?::\d{2})?(?:\.\d+)?\]\s*[^:\n]{0,60}:?\s*$")
        .expect("valid bracketed speaker line regex")
});

/// Transcription-service footer, e.g. `Transcribed by https://otter.ai`.
static FOOTER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*transcribed by\s+\S.*$").expect("valid footer regex"));

/// ATX-style heading line (`#` through `######`).
static HEADING_PREFIX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s+\S").expect("valid heading prefix regex"));

/// Heading line ending in a timestamp parenthetical, e.g. `... ([00:01:23]).`
static HEADING_TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^()\n]*\[\d{1,2}:\d{2}(?::\d{2})?\]\)\.?\s*$")
        .expect("valid heading timestamp regex")
});

/// Bold speaker label, e.g. `**Alice:**`.
static BOLD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*[^*\n]{1,60}:\*\*\s*").expect("valid bold label regex"));

/// Inline correction annotation: `original [sic] (correction)`. Only the
/// annotation span is removed; the original word stays in place.
static SIC_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\[sic\](?:\s*\([^()\n]*\))?").expect("valid sic annotation regex")
});

/// Strips structural noise from the reference side: speaker-attribution
/// lines and transcription-service footers. Returns the cleaned text and
/// the removal counts.
pub fn filter_reference_noise(text: &str) -> (String, ReferenceNoise) {
    let mut noise = ReferenceNoise::default();
    let mut kept = Vec::new();

    for line in text.lines() {
        if SPEAKER_LINE.is_match(line) || BRACKET_SPEAKER_LINE.is_match(line) {
            noise.speaker_lines_removed += 1;
            continue;
        }
        if FOOTER_LINE.is_match(line) {
            noise.footer_lines_removed += 1;
            continue;
        }
        kept.push(line.to_string());
    }

    (kept.join("\n"), noise)
}

/// Strips structural noise from the candidate side: heading lines, bold
/// speaker labels, and `[sic]` correction annotations. Returns the cleaned
/// text and the removal counts.
pub fn filter_candidate_noise(text: &str) -> (String, CandidateNoise) {
    let mut noise = CandidateNoise::default();
    let mut kept = Vec::new();

    for line in text.lines() {
        if HEADING_PREFIX_LINE.is_match(line) || HEADING_TIMESTAMP_LINE.is_match(line) {
            noise.heading_lines_removed += 1;
            continue;
        }

        let mut cleaned = line.to_string();
        let label_count = BOLD_LABEL.find_iter(&cleaned).count();
        if label_count > 0 {
            noise.speaker_labels_removed += label_count;
            cleaned = BOLD_LABEL.replace_all(&cleaned, "").into_owned();
        }
        let sic_count = SIC_ANNOTATION.find_iter(&cleaned).count();
        if sic_count > 0 {
            noise.corrections_removed += sic_count;
            cleaned = SIC_ANNOTATION.replace_all(&cleaned, "").into_owned();
        }
        kept.push(cleaned);
    }

    (kept.join("\n"), noise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_speaker_timestamp_lines() {
        let text = "Unknown Speaker  12:34\nwell that went fine\nSpeaker 3  1:02:07\nindeed it did";
        let (cleaned, noise) = filter_reference_noise(text);
        assert_eq!(cleaned, "well that went fine\nindeed it did");
        assert_eq!(noise.speaker_lines_removed, 2);
        assert_eq!(noise.footer_lines_removed, 0);
    }

    #[test]
    fn removes_bracketed_speaker_label_lines() {
        let text = "[00:00:12.3] Maria:\nso where were we";
        let (cleaned, noise) = filter_reference_noise(text);
        assert_eq!(cleaned, "so where were we");
        assert_eq!(noise.speaker_lines_removed, 1);
    }

    #[test]
    fn keeps_speech_with_inline_timestamps() {
        let text = "We start at 12:34 sharp.\n[00:01:00] Maria: and she kept talking";
        let (cleaned, noise) = filter_reference_noise(text);
        assert_eq!(cleaned, text);
        assert_eq!(noise, ReferenceNoise::default());
    }

    #[test]
    fn removes_transcription_footer() {
        let text = "that is all for today\nTranscribed by https://otter.ai";
        let (cleaned, noise) = filter_reference_noise(text);
        assert_eq!(cleaned, "that is all for today");
        assert_eq!(noise.footer_lines_removed, 1);
    }

    #[test]
    fn removes_heading_lines_of_both_forms() {
        let text = "## Introduction\nwelcome back everyone\nClosing Remarks ([00:41:02]).\nthanks for listening";
        let (cleaned, noise) = filter_candidate_noise(text);
        assert_eq!(cleaned, "welcome back everyone\nthanks for listening");
        assert_eq!(noise.heading_lines_removed, 2);
    }

    #[test]
    fn removes_bold_speaker_label_keeps_speech() {
        let (cleaned, noise) = filter_candidate_noise("**Alice:** Hello there.");
        assert_eq!(cleaned, "Hello there.");
        assert_eq!(noise.speaker_labels_removed, 1);
    }

    #[test]
    fn sic_annotation_keeps_original_word() {
        let (cleaned, noise) = filter_candidate_noise("the livel [sic] (life) of the party");
        assert_eq!(cleaned, "the livel of the party");
        assert_eq!(noise.corrections_removed, 1);
    }

    #[test]
    fn bare_sic_marker_is_removed() {
        let (cleaned, noise) = filter_candidate_noise("they was [sic] gone");
        assert_eq!(cleaned, "they was gone");
        assert_eq!(noise.corrections_removed, 1);
    }

    #[test]
    fn counts_accumulate_across_lines() {
        let text = "# Part One\n**Bob:** it was [sic] (were) fine\n**Ann:** agreed [sic]";
        let (cleaned, noise) = filter_candidate_noise(text);
        assert_eq!(cleaned, "it was fine\nagreed");
        assert_eq!(noise.heading_lines_removed, 1);
        assert_eq!(noise.speaker_labels_removed, 2);
        assert_eq!(noise.corrections_removed, 2);
    }

    #[test]
    fn empty_input_passes_through() {
        let (cleaned, noise) = filter_candidate_noise("");
        assert!(cleaned.is_empty());
        assert_eq!(noise, CandidateNoise::default());
    }
}
