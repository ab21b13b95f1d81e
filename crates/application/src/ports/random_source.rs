/// Random source for jitter, synthetic data and fallback estimates.
///
/// Implementations backed by a seeded generator make assembly reproducible.
pub trait RandomSource: Send + Sync {
    /// Uniform in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Uniform in `[low, high]`; returns `low` when `high < low`.
    fn range_u64(&self, low: u64, high: u64) -> u64;

    fn chance(&self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}
