//! Sampling policy for opportunistic catalog sweeps

/// Default share of catalog writes that also sweep the catalog
pub const DEFAULT_SWEEP_PROBABILITY: f64 = 0.01;

/// Decides whether a catalog write also sweeps stale members
///
/// Sweeping costs one `exists` call per listed member, so by default it only
/// runs on a uniform random sample of writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GcPolicy {
    /// Never sweep during writes
    Never,
    /// Sweep on every catalog write
    Always,
    /// Sweep each catalog write independently with this probability (0.0 - 1.0)
    Probability(f64),
}

impl Default for GcPolicy {
    fn default() -> Self {
        GcPolicy::Probability(DEFAULT_SWEEP_PROBABILITY)
    }
}

impl GcPolicy {
    /// Roll for one catalog write
    pub fn should_sweep(&self) -> bool {
        match *self {
            GcPolicy::Never => false,
            GcPolicy::Always => true,
            GcPolicy::Probability(p) if p <= 0.0 || p.is_nan() => false,
            GcPolicy::Probability(p) if p >= 1.0 => true,
            GcPolicy::Probability(p) => rand::random::<f64>() < p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_percent() {
        assert_eq!(GcPolicy::default(), GcPolicy::Probability(0.01));
    }

    #[test]
    fn test_forced_policies() {
        assert!(GcPolicy::Always.should_sweep());
        assert!(!GcPolicy::Never.should_sweep());
    }

    #[test]
    fn test_degenerate_probabilities() {
        for _ in 0..100 {
            assert!(!GcPolicy::Probability(0.0).should_sweep());
            assert!(!GcPolicy::Probability(-1.0).should_sweep());
            assert!(!GcPolicy::Probability(f64::NAN).should_sweep());
            assert!(GcPolicy::Probability(1.0).should_sweep());
            assert!(GcPolicy::Probability(2.5).should_sweep());
        }
    }

    #[test]
    fn test_probability_is_roughly_uniform() {
        let policy = GcPolicy::Probability(0.5);
        let fired = (0..10_000).filter(|_| policy.should_sweep()).count();
        assert!((4_000..6_000).contains(&fired), "fired {} times", fired);
    }
}
