//! Per-step timing for the radio step driver.

/// Timing collected during a single redshift step.
///
/// All durations are wall-clock microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// The entire step.
    pub total_us: u64,
    /// Homogeneous background integration.
    pub background_us: u64,
    /// Per-propagator execution times: `(name, microseconds)`.
    pub propagator_us: Vec<(String, u64)>,
    /// Diagnostic dump, zero when no dump is attached.
    pub dump_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.background_us, 0);
        assert!(m.propagator_us.is_empty());
        assert_eq!(m.dump_us, 0);
    }
}
