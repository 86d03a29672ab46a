//! Serial list decoding for a tail-biting, CRC-aided, punctured
//! convolutional code.
//!
//! Given a noisy real-valued vector produced by a rate-k/n feed-forward
//! convolutional encoder, BPSK modulator, puncturer, and AWGN channel, this
//! crate enumerates trellis paths in order of increasing squared-Euclidean
//! distance to the received vector and returns the first candidate that is
//! both tail-biting (starting state equals ending state) and CRC-valid.
//!
//! The decoding algorithm lives in [`trellis`] (code construction and
//! encoding) and [`decoder`] (the dual-survivor forward sweep and the
//! detour-heap enumerator built on top of it); [`config`] and [`channel`]
//! are the surrounding harness plumbing.

pub mod bits;
pub mod channel;
pub mod config;
pub mod decoder;
pub mod error;
pub mod heap;
pub mod trellis;

pub use config::RunConfig;
pub use decoder::{decode, MessageInformation, StoppingRule};
pub use error::{DecodeError, Result};
pub use trellis::Trellis;
