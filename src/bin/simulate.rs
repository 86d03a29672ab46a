//! Monte-Carlo simulation harness: sweep a set of Eb/N0 points, encoding a
//! random information+CRC bit string, passing it through an AWGN channel,
//! decoding it, and tallying bit/block errors until enough errors have
//! accumulated at each point to call the estimate stable.
//!
//! This binary is deliberately thin glue around the library: all of the
//! decoding logic lives in `serial_list_decoder`.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use serial_list_decoder::{bits, channel, RunConfig, Trellis};

/// Run the tail-biting list decoder's Monte-Carlo channel simulation.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a TOML run configuration. Falls back to the canonical
    /// configuration when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Tally {
    trials: usize,
    block_errors: usize,
    bit_errors: usize,
    list_sizes: Vec<usize>,
}

impl Tally {
    fn new() -> Tally {
        Tally { trials: 0, block_errors: 0, bit_errors: 0, list_sizes: Vec::new() }
    }
}

fn run_point(config: &RunConfig, trellis: &Trellis, ebn0_db: f64, seed: u64) -> Tally {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::new();

    while tally.block_errors < config.max_errors {
        let info_bits: Vec<u8> = (0..config.info_bits).map(|_| rng.random_range(0..=1)).collect();
        let with_crc = bits::crc_append(&info_bits, config.crc_poly, config.crc_width);
        let symbols = trellis
            .encode(&with_crc)
            .expect("canonical configuration always yields a k-aligned message");
        let received = channel::awgn(&symbols, ebn0_db, &mut rng);

        let info = serial_list_decoder::decode(
            trellis,
            &received,
            &config.puncturing_indices,
            config.list_size_limit,
            config.crc_width,
            config.crc_poly,
            config.stopping_rule(),
        )
        .expect("canonical configuration always yields a well-formed received vector");

        tally.trials += 1;
        tally.list_sizes.push(info.list_size);

        if info.list_size_exceeded || info.message != with_crc {
            tally.block_errors += 1;
            let errors = info
                .message
                .iter()
                .zip(with_crc.iter())
                .filter(|(a, b)| a != b)
                .count();
            tally.bit_errors += errors.max(1);
        }

        if tally.trials % config.logging_iters == 0 {
            log::info!(
                "Eb/N0={:.2} dB: {} trials, {} block errors, {} bit errors",
                ebn0_db, tally.trials, tally.block_errors, tally.bit_errors
            );
        }
    }

    tally
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            let src = fs::read_to_string(path).expect("could not read configuration file");
            RunConfig::load(&src).expect("invalid configuration file")
        }
        None => RunConfig::default(),
    };

    let trellis = Trellis::build(config.k, config.n, config.v, &config.polynomials)
        .expect("invalid code parameters");

    log::info!(
        "simulating {} Eb/N0 point(s) with list_size_limit={} stopping_rule={:?}",
        config.ebn0_db.len(),
        config.list_size_limit,
        config.stopping_rule()
    );

    for (i, &ebn0_db) in config.ebn0_db.iter().enumerate() {
        let seed = config.base_seed.wrapping_add(i as u64);
        let tally = run_point(&config, &trellis, ebn0_db, seed);

        let bler = tally.block_errors as f64 / tally.trials as f64;
        let ber = tally.bit_errors as f64 / (tally.trials * config.info_bits) as f64;
        println!(
            "Eb/N0={:.2} dB: trials={} BLER={:.3e} BER={:.3e}",
            ebn0_db, tally.trials, bler, ber
        );
    }
}
