//! Tunables shared by the prover, the polynomial engine and the protocol drivers

/// Tables at least this large are folded and summed with rayon (2^10 entries).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 10;

/// Domain separator absorbed first by every Fiat-Shamir transcript.
pub const DEFAULT_TRANSCRIPT_LABEL: &[u8] = b"hypercube-sumcheck";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumCheckConfig {
    /// Minimum table length for parallel folding and summation
    pub parallel_threshold: usize,
    /// Domain separation label for non-interactive runs
    pub transcript_label: &'static [u8],
}

impl Default for SumCheckConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            transcript_label: DEFAULT_TRANSCRIPT_LABEL,
        }
    }
}

impl SumCheckConfig {
    /// Never go parallel. Useful for tiny fields and deterministic profiling.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_transcript_label(mut self, label: &'static [u8]) -> Self {
        self.transcript_label = label;
        self
    }

    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_2_pow_10() {
        let config = SumCheckConfig::default();
        assert!(!config.is_parallel(1023));
        assert!(config.is_parallel(1024));
    }

    #[test]
    fn sequential_never_parallel() {
        let config = SumCheckConfig::sequential();
        assert!(!config.is_parallel(1 << 30));
    }

    #[test]
    fn builders_override_fields() {
        let config = SumCheckConfig::default()
            .with_parallel_threshold(4)
            .with_transcript_label(b"gkr-layer-0");
        assert!(config.is_parallel(4));
        assert_eq!(config.transcript_label, b"gkr-layer-0");
    }
}
