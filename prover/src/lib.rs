//! Dark-pool proof pipeline
//!
//! Thin orchestration around an external Groth16 toolchain (circom/snarkjs
//! artifacts on BN254):
//!
//! ```text
//!  CircuitInputs ──► ProvingBackend::full_prove ──► ZkProofBundle (native order)
//!                                                        │
//!                               Groth16Verifier::verify ◄┤  (local, native order)
//!                                                        │
//!                          SignalLayout::to_verifier_order
//!                                                        ▼
//!                         ProofCalldata  a[2] ‖ b[4] ‖ c[2] ‖ inputs[N]
//! ```
//!
//! The circuit, witness generator and proving key are opaque; this crate only
//! constrains input names, signal order and the packed byte layout.

pub mod backend;
pub mod calldata;
pub mod circuit;
pub mod error;
pub mod field;
pub mod pipeline;
pub mod proof;
pub mod verifier;
pub mod vkey;

pub use backend::{ProofOutput, ProvingBackend, SnarkjsCli};
pub use calldata::{ProofCalldata, WORD_SIZE};
pub use circuit::{
    CircuitArtifacts, CircuitDefinition, CircuitInputs, InputValue, TOXICITY_PRIVATE_INPUTS,
};
pub use error::{ProverError, Result};
pub use pipeline::{PipelineOutput, ProofPipeline};
pub use proof::{SnarkjsProof, ZkProofBundle};
pub use verifier::Groth16Verifier;
pub use vkey::SnarkjsVerificationKey;
