//! Local Groth16 verification on BN254.
//!
//! The key's `IC` points follow the proving tool's native signal order, so
//! verification always takes [`NativeSignals`]. Reordering for the on-chain
//! verifier happens afterwards.

use std::path::Path;

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, VerifyingKey};
use ark_serialize::CanonicalSerialize;
use ark_snark::SNARK;

use darkpool_commitment::U256;
use darkpool_signals::NativeSignals;

use crate::error::{ProverError, Result};
use crate::field::field_from_u256;
use crate::proof::ZkProofBundle;
use crate::vkey::SnarkjsVerificationKey;

pub struct Groth16Verifier {
    vk: VerifyingKey<Bn254>,
    pvk: PreparedVerifyingKey<Bn254>,
    fingerprint: [u8; 32],
}

impl Groth16Verifier {
    pub fn from_ark(vk: VerifyingKey<Bn254>) -> Result<Self> {
        let pvk = Groth16::<Bn254>::process_vk(&vk)
            .map_err(|e| ProverError::VerificationKey(e.to_string()))?;
        let fingerprint = Self::compute_fingerprint(&vk)?;
        Ok(Self {
            vk,
            pvk,
            fingerprint,
        })
    }

    pub fn from_snarkjs(vk: &SnarkjsVerificationKey) -> Result<Self> {
        Self::from_ark(vk.to_ark()?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snarkjs(&SnarkjsVerificationKey::from_json(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// blake3 over the compressed canonical key bytes
    fn compute_fingerprint(vk: &VerifyingKey<Bn254>) -> Result<[u8; 32]> {
        let mut bytes = Vec::new();
        vk.serialize_compressed(&mut bytes)
            .map_err(|e| ProverError::VerificationKey(e.to_string()))?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }

    pub fn fingerprint(&self) -> [u8; 32] {
        self.fingerprint
    }

    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint)
    }

    pub fn verifying_key(&self) -> &VerifyingKey<Bn254> {
        &self.vk
    }

    /// Number of public signals the key commits to
    pub fn public_input_count(&self) -> usize {
        self.vk.gamma_abc_g1.len().saturating_sub(1)
    }

    /// Verify the bundle against its own native-order signals
    pub fn verify(&self, bundle: &ZkProofBundle) -> Result<bool> {
        self.verify_signals(bundle, &bundle.public_signals)
    }

    /// Verify proof points against an explicit native-order signal list.
    ///
    /// Malformed points, out-of-range signals and a wrong signal count are
    /// errors; a well-formed proof that does not verify is `Ok(false)`.
    pub fn verify_signals(
        &self,
        bundle: &ZkProofBundle,
        signals: &NativeSignals<U256>,
    ) -> Result<bool> {
        let expected = self.public_input_count();
        if signals.len() != expected {
            return Err(ProverError::InputCount {
                expected,
                got: signals.len(),
            });
        }

        let proof = bundle.to_ark_proof()?;
        let inputs = signals
            .map(field_from_u256::<Fr>)
            .transpose()?
            .into_inner();

        let ok = Groth16::<Bn254>::verify_with_processed_vk(&self.pvk, &inputs, &proof)
            .map_err(|e| ProverError::VerificationKey(e.to_string()))?;

        tracing::debug!(
            vk = %self.fingerprint_hex(),
            signals = signals.len(),
            ok,
            "groth16 verify"
        );
        Ok(ok)
    }
}

impl std::fmt::Debug for Groth16Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Groth16Verifier")
            .field("public_inputs", &self.public_input_count())
            .field("fingerprint", &self.fingerprint_hex())
            .finish()
    }
}
