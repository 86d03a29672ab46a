//! Run configuration: the code parameters, puncturing pattern, stopping
//! rule, and simulation-harness knobs that would otherwise be scattered
//! `constexpr` constants. Loaded from TOML via `serde`, with `Default`
//! supplying the canonical regression configuration so the simulation
//! harness has a sane baseline with no file present.

use serde::Deserialize;

use crate::decoder::StoppingRule;
use crate::error::{DecodeError, Result};

/// Canonical `(k=1, n=2, v=8)` code, CRC width 13, 64 information bits,
/// rate-1/2 puncturing pattern, and `'A'` (metric-threshold) stopping rule.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Input bits consumed per trellis step.
    pub k: usize,
    /// Output bits emitted per trellis step.
    pub n: usize,
    /// Shift-register memory elements.
    pub v: usize,
    /// CRC width (`crc_width - 1` is the polynomial's degree).
    pub crc_width: usize,
    /// CRC polynomial, packed as a `crc_width`-bit pattern.
    pub crc_poly: u32,
    /// Number of information bits carried per block.
    pub info_bits: usize,
    /// Generator polynomials, one per output bit.
    pub polynomials: Vec<u32>,
    /// Indices into the coded symbol stream that are dropped before
    /// transmission.
    pub puncturing_indices: Vec<usize>,
    /// Hard cap on candidates inspected by the enumerator, independent of
    /// `stopping_rule`.
    pub list_size_limit: usize,
    /// `'M'` for a fixed list size, `'A'` for an additional metric
    /// threshold (`max_metric`).
    pub stopping_rule: char,
    /// Threshold used when `stopping_rule == 'A'`.
    pub max_metric: f64,
    /// Eb/N0 values (dB) the simulation harness sweeps.
    pub ebn0_db: Vec<f64>,
    /// Trials to run per Eb/N0 point before moving on, once this many
    /// message errors accumulate.
    pub max_errors: usize,
    /// How often (in trials) the harness logs progress.
    pub logging_iters: usize,
    /// Seed for the harness's message/noise RNG.
    pub base_seed: u64,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            k: 1,
            n: 2,
            v: 8,
            crc_width: 13,
            crc_poly: 0x1565,
            info_bits: 64,
            polynomials: vec![561, 753],
            puncturing_indices: vec![
                4, 10, 21, 24, 31, 37, 42, 48, 59, 62, 69, 75, 80, 86, 97, 100, 107, 113, 118,
                124, 135, 138, 145, 151,
            ],
            list_size_limit: 10_000_000,
            stopping_rule: 'A',
            max_metric: 84.5,
            ebn0_db: vec![2.50],
            max_errors: 20,
            logging_iters: 1000,
            base_seed: 42,
        }
    }
}

impl RunConfig {
    /// Parse a `RunConfig` from a TOML document, validating the fields
    /// `decode`/`Trellis::build` can't check on their own.
    pub fn load(toml_src: &str) -> Result<RunConfig> {
        let config: RunConfig =
            toml::from_str(toml_src).map_err(|e| DecodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.polynomials.len() != self.n {
            return Err(DecodeError::Config(format!(
                "expected {} polynomials, got {}",
                self.n,
                self.polynomials.len()
            )));
        }
        if !matches!(self.stopping_rule, 'M' | 'A') {
            return Err(DecodeError::Config(format!(
                "stopping_rule must be 'M' or 'A', got {:?}",
                self.stopping_rule
            )));
        }
        if self.message_len() % self.k != 0 {
            return Err(DecodeError::Config(format!(
                "info_bits + crc_width - 1 ({}) must be a multiple of k ({})",
                self.message_len(),
                self.k
            )));
        }
        Ok(())
    }

    /// The message length the encoder/decoder expect: information bits
    /// followed by `crc_width - 1` CRC bits.
    pub fn message_len(&self) -> usize {
        self.info_bits + self.crc_width - 1
    }

    /// Translate the `stopping_rule`/`max_metric` pair into the tagged
    /// enum `decode` consumes.
    pub fn stopping_rule(&self) -> StoppingRule {
        match self.stopping_rule {
            'A' => StoppingRule::MaxMetric(self.max_metric),
            _ => StoppingRule::MaxList,
        }
    }
}
