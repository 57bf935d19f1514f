//! generate → verify (native order) → reorder → pack

use tracing::{info, warn};

use darkpool_commitment::U256;
use darkpool_signals::VerifierSignals;

use crate::backend::ProvingBackend;
use crate::calldata::ProofCalldata;
use crate::circuit::{CircuitDefinition, CircuitInputs, InputValue};
use crate::error::{ProverError, Result};
use crate::proof::ZkProofBundle;
use crate::verifier::Groth16Verifier;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Proof and public signals as the proving tool emitted them
    pub bundle: ZkProofBundle,
    pub verifier_signals: VerifierSignals<U256>,
    pub calldata: ProofCalldata,
    pub locally_verified: bool,
    pub proving_time_ms: u64,
}

pub struct ProofPipeline<B> {
    backend: B,
    circuit: CircuitDefinition,
    verifier: Option<Groth16Verifier>,
}

impl<B: ProvingBackend> ProofPipeline<B> {
    /// Pipeline without local verification
    pub fn new(backend: B, circuit: CircuitDefinition) -> Self {
        Self {
            backend,
            circuit,
            verifier: None,
        }
    }

    /// Verify every proof locally before packing. The key must commit to
    /// exactly the circuit's public signal count.
    pub fn with_verifier(mut self, verifier: Groth16Verifier) -> Result<Self> {
        let expected = self.circuit.layout.len();
        let got = verifier.public_input_count();
        if expected != got {
            return Err(ProverError::InputCount { expected, got });
        }
        self.verifier = Some(verifier);
        Ok(self)
    }

    /// Load the verification key named by the circuit artifacts, if any
    pub fn with_artifact_verifier(self) -> Result<Self> {
        match self.circuit.artifacts.verification_key.clone() {
            Some(path) => {
                let verifier = Groth16Verifier::from_file(path)?;
                self.with_verifier(verifier)
            }
            None => Ok(self),
        }
    }

    pub fn circuit(&self) -> &CircuitDefinition {
        &self.circuit
    }

    pub fn verifier(&self) -> Option<&Groth16Verifier> {
        self.verifier.as_ref()
    }

    pub async fn run(&self, inputs: &CircuitInputs) -> Result<PipelineOutput> {
        let layout = &self.circuit.layout;
        let output = self
            .backend
            .full_prove(inputs, &self.circuit.artifacts)
            .await?;
        let bundle = output.bundle;

        layout.check_count(bundle.public_signals.len())?;
        self.check_public_inputs(inputs, &bundle)?;

        let locally_verified = match &self.verifier {
            Some(verifier) => {
                if !verifier.verify(&bundle)? {
                    return Err(ProverError::VerificationFailed);
                }
                true
            }
            None => {
                warn!(circuit = layout.name(), "no verification key, skipping local verify");
                false
            }
        };

        let verifier_signals = layout.to_verifier_order(&bundle.public_signals)?;
        let calldata = ProofCalldata::new(&bundle, verifier_signals.clone());

        info!(
            circuit = layout.name(),
            proving_time_ms = output.proving_time_ms,
            locally_verified,
            calldata_bytes = calldata.byte_len(),
            "proof pipeline complete"
        );

        Ok(PipelineOutput {
            bundle,
            verifier_signals,
            calldata,
            locally_verified,
            proving_time_ms: output.proving_time_ms,
        })
    }

    /// Scalar public inputs must come back unchanged in the signal list
    fn check_public_inputs(&self, inputs: &CircuitInputs, bundle: &ZkProofBundle) -> Result<()> {
        let layout = &self.circuit.layout;
        for name in layout.public_inputs() {
            let Some(InputValue::Scalar(supplied)) = inputs.get(name) else {
                continue;
            };
            let returned = layout.native_value(&bundle.public_signals, name)?;
            if returned != supplied {
                return Err(ProverError::PublicInputDrift {
                    name: name.clone(),
                    supplied: supplied.to_string(),
                    returned: returned.to_string(),
                });
            }
        }
        Ok(())
    }
}
