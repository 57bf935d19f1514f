//! Generate a toxicity-circuit proof from fixed sample inputs
//!
//! Runs snarkjs `groth16 fullprove` with the configured artifacts, verifies
//! the proof locally when a verification key is configured, and prints the
//! public signals in both orders plus the packed verifier calldata.
//!
//! Usage:
//!   cargo run --bin generate_proof
//!
//! Environment variables:
//!   DP_CONFIG        - Config file (optional)
//!   DP_CIRCUIT_WASM  - Witness generator
//!   DP_CIRCUIT_ZKEY  - Proving key
//!   DP_CIRCUIT_VKEY  - Verification key
//!   DP_SNARKJS_BIN   - snarkjs executable

use anyhow::Result;

use darkpool_config::DarkpoolConfig;
use darkpool_prover::{CircuitInputs, InputValue, ProofPipeline, SnarkjsCli};
use darkpool_scripts::output::*;

const POOL_BALANCE0: u64 = 1_000_000;
const POOL_BALANCE1: u64 = 2_500_000;
const TOXICITY_THRESHOLD: u64 = 42;
const SIGNALS: [u64; 4] = [3, 7, 11, 5];

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    print_header("Toxicity Proof Generation");

    let config = DarkpoolConfig::load()?;
    let circuit = config.circuit_definition()?;
    print_field("wasm", circuit.artifacts.wasm.display());
    print_field("zkey", circuit.artifacts.zkey.display());

    let inputs = CircuitInputs::build(
        &circuit,
        [
            ("poolBalance0", InputValue::from(POOL_BALANCE0)),
            ("poolBalance1", InputValue::from(POOL_BALANCE1)),
            ("toxicityThreshold", InputValue::from(TOXICITY_THRESHOLD)),
            ("signals", InputValue::from(SIGNALS.to_vec())),
        ],
    )?;

    let backend = SnarkjsCli::new(&config.prover.snarkjs_bin, config.prove_timeout());
    let pipeline = ProofPipeline::new(backend, circuit).with_artifact_verifier()?;
    match pipeline.verifier() {
        Some(v) => print_field("verification key", v.fingerprint_hex()),
        None => print_info("no verification key configured, skipping local verification"),
    }

    print_waiting("proving...");
    let output = pipeline.run(&inputs).await?;
    print_success(&format!("proof generated in {} ms", output.proving_time_ms));
    if output.locally_verified {
        print_success("proof verified locally");
    }

    let layout = &pipeline.circuit().layout;

    print_header("Native Order");
    for (name, value) in layout
        .native_names()
        .iter()
        .zip(output.bundle.public_signals.iter())
    {
        print_field(name, value);
    }

    print_header("Verifier Order");
    for (name, value) in layout
        .verifier_names()
        .iter()
        .zip(output.verifier_signals.iter())
    {
        print_field(name, value);
    }

    print_header("Calldata");
    print_field("bytes", output.calldata.byte_len());
    println!("{}", output.calldata.to_hex());
    println!();
    println!("{}", output.calldata.to_solidity_args());
    Ok(())
}
