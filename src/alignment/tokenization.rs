use crate::types::Token;

/// Canonicalizes one whitespace-delimited token for comparison.
///
/// Rules, in order: strip markdown emphasis markers (`*`, `_`, `` ` ``) from
/// both ends, strip remaining non-alphanumeric/non-apostrophe/non-underscore
/// characters from both edges, lowercase. Total and idempotent; a result of
/// `""` marks a void token (pure punctuation).
pub fn normalize_token(token: &str) -> String {
    // The two trims can expose each other's targets (`"_word_,"`: the comma
    // shields the trailing `_`), so run them to a fixpoint.
    let mut current = token;
    loop {
        let stripped = current.trim_matches(|c| matches!(c, '*' | '_' | '`'));
        let stripped =
            stripped.trim_matches(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '_'));
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current.to_lowercase()
}

/// Splits a text blob into tokens in reading order, keeping each token's
/// surface form alongside its normalized form.
pub fn tokenize(text: &str) -> Vec<Token> {
    let tokens: Vec<Token> = text
        .split_whitespace()
        .map(|word| Token {
            surface: word.to_string(),
            normalized: normalize_token(word),
        })
        .collect();

    debug_assert!(
        tokens
            .iter()
            .all(|t| normalize_token(&t.normalized) == t.normalized),
        "token normalization contract violated: not idempotent"
    );

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_trailing_punctuation() {
        assert_eq!(normalize_token("Hello,"), "hello");
        assert_eq!(normalize_token("world!!"), "world");
        assert_eq!(normalize_token("Okay?"), "okay");
    }

    #[test]
    fn strips_emphasis_markers_from_both_ends() {
        assert_eq!(normalize_token("**bold**"), "bold");
        assert_eq!(normalize_token("_emphasis_"), "emphasis");
        assert_eq!(normalize_token("`code`"), "code");
        assert_eq!(normalize_token("**_nested_**"), "nested");
    }

    #[test]
    fn strips_emphasis_shielded_by_punctuation() {
        assert_eq!(normalize_token("_hello_,"), "hello");
        assert_eq!(normalize_token("\"_hello_\""), "hello");
        assert_eq!(normalize_token("(_aside_)"), "aside");
    }

    #[test]
    fn strips_leading_edge_punctuation() {
        assert_eq!(normalize_token("(word"), "word");
        assert_eq!(normalize_token("\"quoted\""), "quoted");
        assert_eq!(normalize_token("[bracketed]."), "bracketed");
    }

    #[test]
    fn keeps_apostrophes_and_interior_underscores() {
        assert_eq!(normalize_token("don't"), "don't");
        assert_eq!(normalize_token("O'Brien,"), "o'brien");
        assert_eq!(normalize_token("snake_case"), "snake_case");
    }

    #[test]
    fn keeps_interior_punctuation_and_digits() {
        assert_eq!(normalize_token("12:34"), "12:34");
        assert_eq!(normalize_token("42nd"), "42nd");
        assert_eq!(normalize_token("co-host"), "co-host");
    }

    #[test]
    fn pure_punctuation_normalizes_to_empty() {
        assert_eq!(normalize_token("--"), "");
        assert_eq!(normalize_token("..."), "");
        assert_eq!(normalize_token("(!)"), "");
        assert_eq!(normalize_token(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Hello,",
            "**bold**",
            "_mix_**",
            "(word",
            "don't",
            "--",
            "12:34",
            "`tick`",
            "_hello_,",
            "\"_hello_\"",
            "(_aside_)",
        ];
        for sample in samples {
            let once = normalize_token(sample);
            assert_eq!(normalize_token(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn tokenize_splits_on_any_whitespace() {
        let tokens = tokenize("Hello,  world!\nBye");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].surface, "Hello,");
        assert_eq!(tokens[0].normalized, "hello");
        assert_eq!(tokens[1].normalized, "world");
        assert_eq!(tokens[2].normalized, "bye");
    }

    #[test]
    fn tokenize_empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn tokenize_marks_void_tokens() {
        let tokens = tokenize("pause -- resume");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].surface, "--");
        assert!(tokens[1].normalized.is_empty());
    }
}
