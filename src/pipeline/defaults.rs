use crate::pipeline::traits::TokenComparator;

/// Strict equality on normalized text. The default comparator.
pub struct ExactComparator;

impl TokenComparator for ExactComparator {
    fn matches(&self, reference: &str, candidate: &str) -> bool {
        reference == candidate
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Edit-distance comparator that tolerates small spelling drift, e.g. OCR
/// artifacts or in-place typo fixes. A pair matches when its character
/// similarity reaches `min_similarity`.
pub struct FuzzyComparator {
    pub min_similarity: f64,
}

impl FuzzyComparator {
    pub const DEFAULT_MIN_SIMILARITY: f64 = 0.65;

    pub fn new(min_similarity: f64) -> Self {
        Self { min_similarity }
    }
}

impl Default for FuzzyComparator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SIMILARITY)
    }
}

impl TokenComparator for FuzzyComparator {
    fn matches(&self, reference: &str, candidate: &str) -> bool {
        if reference == candidate {
            return true;
        }
        char_similarity(reference, candidate) >= self.min_similarity
    }

    fn name(&self) -> &'static str {
        "fuzzy"
    }
}

/// Similarity in [0, 1] from Levenshtein distance over the longer length.
/// Nothing is similar to an empty string except another empty string.
fn char_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let distance = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    1.0 - distance as f64 / max_len as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from(&curr);
    }
    prev[b.len()]
}
