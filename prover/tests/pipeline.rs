mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use darkpool_commitment::U256;
use darkpool_prover::{
    CircuitArtifacts, CircuitDefinition, CircuitInputs, Groth16Verifier, InputValue, ProofOutput,
    ProofPipeline, ProverError, ProvingBackend, Result, ZkProofBundle,
};
use darkpool_signals::{NativeSignals, SignalError};

/// Replays a fixed bundle instead of running a witness generator
struct ReplayBackend {
    bundle: ZkProofBundle,
    calls: AtomicUsize,
}

impl ReplayBackend {
    fn new(bundle: ZkProofBundle) -> Self {
        Self {
            bundle,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ProvingBackend for ReplayBackend {
    async fn full_prove(
        &self,
        _inputs: &CircuitInputs,
        _artifacts: &CircuitArtifacts,
    ) -> Result<ProofOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProofOutput {
            bundle: self.bundle.clone(),
            proving_time_ms: 12,
        })
    }
}

fn circuit() -> CircuitDefinition {
    CircuitDefinition::toxicity(CircuitArtifacts {
        wasm: "toxicity.wasm".into(),
        zkey: "toxicity_final.zkey".into(),
        verification_key: None,
    })
}

fn inputs(pool0: u64) -> CircuitInputs {
    CircuitInputs::build(
        &circuit(),
        [
            ("poolBalance0", InputValue::from(pool0)),
            ("poolBalance1", InputValue::from(common::POOL_BALANCE1)),
            ("toxicityThreshold", InputValue::from(common::TOXICITY_THRESHOLD)),
            ("signals", InputValue::from(vec![3u64, 1, 4, 1, 5])),
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn pipeline_verifies_then_reorders() {
    let fx = common::fixture();
    let verifier = Groth16Verifier::from_json(&fx.vk_json).unwrap();
    let pipeline = ProofPipeline::new(ReplayBackend::new(fx.bundle.clone()), circuit())
        .with_verifier(verifier)
        .unwrap();

    let out = pipeline.run(&inputs(common::POOL_BALANCE0)).await.unwrap();
    assert!(out.locally_verified);
    assert_eq!(out.proving_time_ms, 12);
    assert_eq!(out.bundle.public_signals, common::native_signals());
    assert_eq!(
        out.verifier_signals.as_slice()[..3],
        [
            U256::from(common::POOL_BALANCE0),
            U256::from(common::POOL_BALANCE1),
            U256::from(common::TOXICITY_THRESHOLD),
        ]
    );
    assert_eq!(out.calldata.inputs, out.verifier_signals);
    assert_eq!(out.calldata.to_bytes().len(), 13 * 32);
}

#[tokio::test]
async fn pipeline_without_key_skips_verification() {
    let fx = common::fixture();
    let pipeline = ProofPipeline::new(ReplayBackend::new(fx.bundle), circuit());
    let out = pipeline.run(&inputs(common::POOL_BALANCE0)).await.unwrap();
    assert!(!out.locally_verified);
}

#[tokio::test]
async fn failed_local_verification_is_fatal() {
    let fx = common::fixture();
    let verifier = Groth16Verifier::from_json(&fx.vk_json).unwrap();

    let mut forged = fx.bundle.clone();
    let mut signals = forged.public_signals.into_inner();
    signals[1] = U256::from(123u64);
    forged.public_signals = NativeSignals::new(signals);

    let pipeline = ProofPipeline::new(ReplayBackend::new(forged), circuit())
        .with_verifier(verifier)
        .unwrap();
    let err = pipeline
        .run(&inputs(common::POOL_BALANCE0))
        .await
        .unwrap_err();
    assert!(matches!(err, ProverError::VerificationFailed));
}

#[tokio::test]
async fn short_signal_list_aborts_before_reorder() {
    let fx = common::fixture();
    let mut short = fx.bundle.clone();
    let mut signals = short.public_signals.into_inner();
    signals.pop();
    short.public_signals = NativeSignals::new(signals);

    let pipeline = ProofPipeline::new(ReplayBackend::new(short), circuit());
    let err = pipeline
        .run(&inputs(common::POOL_BALANCE0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProverError::Signals(SignalError::CountMismatch {
            expected: 5,
            got: 4,
            ..
        })
    ));
}

#[tokio::test]
async fn drifted_public_input_is_reported() {
    let fx = common::fixture();
    let pipeline = ProofPipeline::new(ReplayBackend::new(fx.bundle), circuit());
    let err = pipeline.run(&inputs(999)).await.unwrap_err();
    match err {
        ProverError::PublicInputDrift {
            name,
            supplied,
            returned,
        } => {
            assert_eq!(name, "poolBalance0");
            assert_eq!(supplied, "999");
            assert_eq!(returned, common::POOL_BALANCE0.to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn key_with_wrong_signal_count_is_refused() {
    let fx = common::fixture();
    let mut vk = fx.vk.clone();
    vk.gamma_abc_g1.pop();
    let verifier = Groth16Verifier::from_ark(vk).unwrap();

    let result = ProofPipeline::new(ReplayBackend::new(fx.bundle), circuit()).with_verifier(verifier);
    assert!(matches!(
        result,
        Err(ProverError::InputCount {
            expected: 5,
            got: 4
        })
    ));
}
