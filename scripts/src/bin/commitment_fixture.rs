//! Recompute the observed commitment fixture
//!
//! Usage:
//!   cargo run --bin commitment_fixture

use anyhow::{Result, bail};

use darkpool_commitment::{CommitmentOpening, Hash256, U256};
use darkpool_scripts::output::*;

const AMOUNT: u64 = 10_000_000;
const MIN_OUT: u64 = 4_000_000_000_000_000;
const SALT: u64 = 52_555_232;

const EXPECTED_COMMITMENT: &str =
    "0xa4156ce6679fbcc43833e220d1183c652030cd662021f99664e85ba03985a70c";
const EXPECTED_NULLIFIER: &str =
    "0xa94e7fb590976e192bf94f0fd2ae124b6ffbe8cfdc224b3bbb0774aa86076fa1";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    print_header("Commitment Fixture");

    let opening = CommitmentOpening::new(
        U256::from(AMOUNT),
        U256::from(MIN_OUT),
        U256::from(SALT),
    );
    print_field("amount", opening.amount);
    print_field("min out", opening.min_out);
    print_field("salt", opening.salt);

    let commitment = opening.commitment();
    let nullifier = opening.nullifier();
    print_field("commitment", commitment);
    print_field("nullifier", nullifier);
    println!();

    let expected: Hash256 = EXPECTED_COMMITMENT.parse()?;
    opening.verify(&expected)?;
    print_success("commitment matches fixture");

    let expected_nullifier: Hash256 = EXPECTED_NULLIFIER.parse()?;
    if nullifier != expected_nullifier {
        bail!("nullifier {} != fixture {}", nullifier, expected_nullifier);
    }
    print_success("nullifier matches fixture");
    Ok(())
}
