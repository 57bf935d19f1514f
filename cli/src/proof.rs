//! Proof generation, local verification and calldata packing

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;

use darkpool_config::DarkpoolConfig;
use darkpool_prover::{
    CircuitInputs, Groth16Verifier, InputValue, ProofCalldata, ProofPipeline, SnarkjsCli,
    ZkProofBundle,
};
use darkpool_signals::{NativeSignals, VerifierSignals};

use crate::commitment::parse_u256;

#[derive(Subcommand, Debug)]
pub enum ProofCommand {
    /// Prove with the external tool, verify locally and print calldata
    Generate {
        /// JSON object with every circuit input
        #[arg(long)]
        inputs: PathBuf,
        /// Also write proof.json and public.json here
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Verify a snarkjs proof against a verification key
    Verify {
        #[arg(long)]
        proof: PathBuf,
        #[arg(long)]
        public: PathBuf,
        /// Verification key; defaults to circuit.verification_key_path
        #[arg(long)]
        vk: Option<PathBuf>,
    },
    /// Pack a snarkjs proof into verifier calldata
    Pack {
        #[arg(long)]
        proof: PathBuf,
        #[arg(long)]
        public: PathBuf,
        /// Print the decimal argument tuple instead of raw hex
        #[arg(long)]
        solidity: bool,
    },
}

pub async fn run(config: &DarkpoolConfig, cmd: ProofCommand) -> Result<()> {
    match cmd {
        ProofCommand::Generate { inputs, out_dir } => {
            generate(config, &inputs, out_dir.as_deref()).await
        }
        ProofCommand::Verify { proof, public, vk } => verify(config, &proof, &public, vk),
        ProofCommand::Pack {
            proof,
            public,
            solidity,
        } => pack(config, &proof, &public, solidity),
    }
}

pub fn reorder(config: &DarkpoolConfig, values: &[String], inverse: bool) -> Result<()> {
    let layout = config.signal_layout()?;
    let parsed = values
        .iter()
        .map(|v| parse_u256("signal", v))
        .collect::<Result<Vec<_>>>()?;

    let (names, out) = if inverse {
        let native = layout.to_native_order(&VerifierSignals::new(parsed))?;
        (layout.native_names(), native.into_inner())
    } else {
        let verifier = layout.to_verifier_order(&NativeSignals::new(parsed))?;
        (layout.verifier_names(), verifier.into_inner())
    };

    for (name, value) in names.iter().zip(&out) {
        println!("{:<24} {}", name, value);
    }
    Ok(())
}

async fn generate(config: &DarkpoolConfig, inputs: &Path, out_dir: Option<&Path>) -> Result<()> {
    let circuit = config.circuit_definition()?;
    let raw = fs::read_to_string(inputs)
        .with_context(|| format!("Failed to read {}", inputs.display()))?;
    let values: BTreeMap<String, InputValue> =
        serde_json::from_str(&raw).context("inputs must be a JSON object of circuit inputs")?;
    let inputs = CircuitInputs::build(&circuit, values)?;

    let backend = SnarkjsCli::new(&config.prover.snarkjs_bin, config.prove_timeout());
    let pipeline = ProofPipeline::new(backend, circuit).with_artifact_verifier()?;
    if pipeline.verifier().is_none() {
        tracing::warn!("no verification key configured; proof will not be checked locally");
    }

    let output = pipeline.run(&inputs).await?;

    println!("proving time: {} ms", output.proving_time_ms);
    println!("verified:     {}", output.locally_verified);
    let layout = &pipeline.circuit().layout;
    for (name, value) in layout.verifier_names().iter().zip(output.verifier_signals.iter()) {
        println!("{:<24} {}", name, value);
    }
    println!("calldata:     {}", output.calldata.to_hex());

    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)?;
        let (proof, public) = output.bundle.to_snarkjs();
        fs::write(dir.join("proof.json"), serde_json::to_string_pretty(&proof)?)?;
        fs::write(dir.join("public.json"), serde_json::to_string_pretty(&public)?)?;
        println!("wrote proof.json and public.json to {}", dir.display());
    }
    Ok(())
}

fn verify(config: &DarkpoolConfig, proof: &Path, public: &Path, vk: Option<PathBuf>) -> Result<()> {
    let configured = config.circuit.verification_key_path.as_ref().map(PathBuf::from);
    let Some(vk_path) = vk.or(configured) else {
        bail!("no verification key given and circuit.verification_key_path is unset");
    };
    let verifier = Groth16Verifier::from_file(&vk_path)
        .with_context(|| format!("Failed to load {}", vk_path.display()))?;
    let bundle = load_bundle(proof, public)?;

    println!("key fingerprint: {}", verifier.fingerprint_hex());
    if !verifier.verify(&bundle)? {
        bail!("proof does not verify against {}", vk_path.display());
    }
    println!("✅ proof verified");
    Ok(())
}

fn pack(config: &DarkpoolConfig, proof: &Path, public: &Path, solidity: bool) -> Result<()> {
    let layout = config.signal_layout()?;
    let bundle = load_bundle(proof, public)?;
    let inputs = layout.to_verifier_order(&bundle.public_signals)?;
    let calldata = ProofCalldata::new(&bundle, inputs);

    if solidity {
        println!("{}", calldata.to_solidity_args());
    } else {
        println!("{}", calldata.to_hex());
    }
    Ok(())
}

fn load_bundle(proof: &Path, public: &Path) -> Result<ZkProofBundle> {
    let proof_json = fs::read_to_string(proof)
        .with_context(|| format!("Failed to read {}", proof.display()))?;
    let public_json = fs::read_to_string(public)
        .with_context(|| format!("Failed to read {}", public.display()))?;
    Ok(ZkProofBundle::from_json(&proof_json, &public_json)?)
}
