#![allow(dead_code)]

//! A real Groth16 proof over a stand-in for the toxicity circuit.
//!
//! Public signals are allocated in the proving tool's native order
//! (outputs first), so the verification key's IC points follow that order.

use ark_bn254::{Bn254, Fq2, Fr, G1Affine, G2Affine};
use ark_groth16::{Groth16, Proof, VerifyingKey};
use ark_r1cs_std::{fields::fp::FpVar, prelude::*};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use ark_std::rand::{SeedableRng, rngs::StdRng};

use darkpool_commitment::U256;
use darkpool_prover::field::field_to_u256;
use darkpool_prover::{SnarkjsProof, SnarkjsVerificationKey, ZkProofBundle};
use darkpool_signals::NativeSignals;

/// valid is boolean and aggregateSignalHash = secret²
#[derive(Clone)]
pub struct ToxicityStandIn {
    pub valid: Option<Fr>,
    pub aggregate_signal_hash: Option<Fr>,
    pub pool_balance0: Option<Fr>,
    pub pool_balance1: Option<Fr>,
    pub toxicity_threshold: Option<Fr>,
    pub secret: Option<Fr>,
}

impl ToxicityStandIn {
    pub fn empty() -> Self {
        Self {
            valid: None,
            aggregate_signal_hash: None,
            pool_balance0: None,
            pool_balance1: None,
            toxicity_threshold: None,
            secret: None,
        }
    }
}

impl ConstraintSynthesizer<Fr> for ToxicityStandIn {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let valid = FpVar::new_input(cs.clone(), || {
            self.valid.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let hash = FpVar::new_input(cs.clone(), || {
            self.aggregate_signal_hash
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let _pool0 = FpVar::new_input(cs.clone(), || {
            self.pool_balance0.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let _pool1 = FpVar::new_input(cs.clone(), || {
            self.pool_balance1.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let _threshold = FpVar::new_input(cs.clone(), || {
            self.toxicity_threshold
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let secret = FpVar::new_witness(cs.clone(), || {
            self.secret.ok_or(SynthesisError::AssignmentMissing)
        })?;

        (&valid * (&valid - FpVar::one())).enforce_equal(&FpVar::zero())?;
        (&secret * &secret).enforce_equal(&hash)?;

        Ok(())
    }
}

pub struct Fixture {
    pub vk: VerifyingKey<Bn254>,
    pub vk_json: String,
    pub bundle: ZkProofBundle,
    pub proof_json: String,
    pub public_json: String,
}

pub const POOL_BALANCE0: u64 = 1_000_000;
pub const POOL_BALANCE1: u64 = 2_500_000;
pub const TOXICITY_THRESHOLD: u64 = 42;
const SECRET: u64 = 7_777;

/// Native-order signals for the fixture proof
pub fn native_signals() -> NativeSignals<U256> {
    NativeSignals::new(vec![
        U256::from(1u64),
        U256::from(SECRET * SECRET),
        U256::from(POOL_BALANCE0),
        U256::from(POOL_BALANCE1),
        U256::from(TOXICITY_THRESHOLD),
    ])
}

pub fn fixture() -> Fixture {
    let mut rng = StdRng::seed_from_u64(0);

    let (pk, vk) =
        Groth16::<Bn254>::circuit_specific_setup(ToxicityStandIn::empty(), &mut rng).unwrap();

    let circuit = ToxicityStandIn {
        valid: Some(Fr::from(1u64)),
        aggregate_signal_hash: Some(Fr::from(SECRET * SECRET)),
        pool_balance0: Some(Fr::from(POOL_BALANCE0)),
        pool_balance1: Some(Fr::from(POOL_BALANCE1)),
        toxicity_threshold: Some(Fr::from(TOXICITY_THRESHOLD)),
        secret: Some(Fr::from(SECRET)),
    };
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();

    let public: Vec<String> = native_signals().iter().map(U256::to_string).collect();
    let snarkjs_proof = proof_to_snarkjs(&proof);
    let proof_json = serde_json::to_string(&snarkjs_proof).unwrap();
    let public_json = serde_json::to_string(&public).unwrap();
    let vk_json = serde_json::to_string(&vk_to_snarkjs(&vk)).unwrap();
    let bundle = ZkProofBundle::from_snarkjs(&snarkjs_proof, &public).unwrap();

    Fixture {
        vk,
        vk_json,
        bundle,
        proof_json,
        public_json,
    }
}

fn dec(f: &impl ark_ff::PrimeField) -> String {
    field_to_u256(f).unwrap().to_string()
}

fn g1(p: &G1Affine) -> Vec<String> {
    vec![dec(&p.x), dec(&p.y), "1".into()]
}

fn fq2(f: &Fq2) -> Vec<String> {
    vec![dec(&f.c0), dec(&f.c1)]
}

fn g2(p: &G2Affine) -> Vec<Vec<String>> {
    vec![fq2(&p.x), fq2(&p.y), vec!["1".into(), "0".into()]]
}

pub fn proof_to_snarkjs(proof: &Proof<Bn254>) -> SnarkjsProof {
    SnarkjsProof {
        pi_a: g1(&proof.a),
        pi_b: g2(&proof.b),
        pi_c: g1(&proof.c),
        protocol: Some("groth16".into()),
        curve: Some("bn128".into()),
    }
}

pub fn vk_to_snarkjs(vk: &VerifyingKey<Bn254>) -> SnarkjsVerificationKey {
    SnarkjsVerificationKey {
        protocol: Some("groth16".into()),
        curve: Some("bn128".into()),
        n_public: vk.gamma_abc_g1.len() - 1,
        vk_alpha_1: g1(&vk.alpha_g1),
        vk_beta_2: g2(&vk.beta_g2),
        vk_gamma_2: g2(&vk.gamma_g2),
        vk_delta_2: g2(&vk.delta_g2),
        ic: vk.gamma_abc_g1.iter().map(g1).collect(),
    }
}
