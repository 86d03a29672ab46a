//! AWGN channel model: adds i.i.d. Gaussian noise to a BPSK symbol stream at
//! a given `Eb/N0`, in decibels. This is a simulation-harness collaborator,
//! not part of the decoder itself — the decoder only ever sees the
//! resulting real-valued vector and has no notion of SNR.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Add i.i.d. `N(0, 10^(-snr_db/10))` noise to each symbol of `symbols`.
pub fn awgn<R: Rng + ?Sized>(symbols: &[i32], snr_db: f64, rng: &mut R) -> Vec<f64> {
    let variance = 10f64.powf(-snr_db / 10.0);
    let sigma = variance.sqrt();
    let noise = Normal::new(0.0, sigma).expect("sigma must be finite and non-negative");

    symbols
        .iter()
        .map(|&s| s as f64 + noise.sample(rng))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_awgn_preserves_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let symbols = vec![1, -1, 1, 1, -1];
        let noisy = awgn(&symbols, 2.5, &mut rng);
        assert_eq!(noisy.len(), symbols.len());
    }

    #[test]
    fn test_awgn_deterministic_with_seed() {
        let symbols = vec![1, -1, 1, 1, -1, -1, 1];
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        assert_eq!(awgn(&symbols, 2.5, &mut rng_a), awgn(&symbols, 2.5, &mut rng_b));
    }

    #[test]
    fn test_zero_snr_is_high_variance() {
        // Sanity check: at low Eb/N0 the noise sigma is large, so most
        // samples land noticeably off their +-1 symbol.
        let mut rng = StdRng::seed_from_u64(1);
        let symbols = vec![1i32; 200];
        let noisy = awgn(&symbols, -10.0, &mut rng);
        let off_symbol = noisy.iter().filter(|&&v| (v - 1.0).abs() > 0.5).count();
        assert!(off_symbol > 50);
    }
}
