/// Word-equivalence test applied to normalized token text.
///
/// Implementations must be pure: the same pair of inputs always yields the
/// same answer, so whole runs stay deterministic.
pub trait TokenComparator: Send + Sync {
    fn matches(&self, reference: &str, candidate: &str) -> bool;

    /// Short identifier recorded in report metadata.
    fn name(&self) -> &'static str;
}
