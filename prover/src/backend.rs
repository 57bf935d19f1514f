//! Proving backends
//!
//! The witness generator and proving key are opaque artifacts; a backend only
//! has to turn named inputs into a proof plus native-order public signals.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::circuit::{CircuitArtifacts, CircuitInputs};
use crate::error::{ProverError, Result};
use crate::proof::ZkProofBundle;

// ============================================================================
// Backend trait
// ============================================================================

#[derive(Debug, Clone)]
pub struct ProofOutput {
    pub bundle: ZkProofBundle,
    pub proving_time_ms: u64,
}

pub trait ProvingBackend: Send + Sync {
    /// Generate the witness and a Groth16 proof in one step
    fn full_prove(
        &self,
        inputs: &CircuitInputs,
        artifacts: &CircuitArtifacts,
    ) -> impl Future<Output = Result<ProofOutput>> + Send;
}

// ============================================================================
// snarkjs command-line backend
// ============================================================================

/// Runs `snarkjs groth16 fullprove` in a scratch directory
#[derive(Debug, Clone)]
pub struct SnarkjsCli {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for SnarkjsCli {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("snarkjs"),
            timeout: Duration::from_secs(300),
        }
    }
}

impl SnarkjsCli {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ProvingBackend for SnarkjsCli {
    async fn full_prove(
        &self,
        inputs: &CircuitInputs,
        artifacts: &CircuitArtifacts,
    ) -> Result<ProofOutput> {
        let start = Instant::now();
        let workdir = tempfile::tempdir()?;
        let input_path = workdir.path().join("input.json");
        let proof_path = workdir.path().join("proof.json");
        let public_path = workdir.path().join("public.json");

        tokio::fs::write(&input_path, inputs.to_json()?).await?;

        debug!(
            binary = %self.binary.display(),
            wasm = %artifacts.wasm.display(),
            zkey = %artifacts.zkey.display(),
            "snarkjs groth16 fullprove"
        );

        let child = Command::new(&self.binary)
            .arg("groth16")
            .arg("fullprove")
            .arg(&input_path)
            .arg(&artifacts.wasm)
            .arg(&artifacts.zkey)
            .arg(&proof_path)
            .arg(&public_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, child)
            .await
            .map_err(|_| ProverError::Timeout {
                secs: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // snarkjs reports some failures on stdout
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            error!("snarkjs fullprove failed: {}", message);
            return Err(ProverError::External {
                tool: "snarkjs".into(),
                message,
            });
        }

        let proof_json = tokio::fs::read_to_string(&proof_path).await?;
        let public_json = tokio::fs::read_to_string(&public_path).await?;
        let bundle = ZkProofBundle::from_json(&proof_json, &public_json)?;

        let proving_time_ms = start.elapsed().as_millis() as u64;
        info!(
            signals = bundle.public_signals.len(),
            proving_time_ms, "snarkjs proof generated"
        );

        Ok(ProofOutput {
            bundle,
            proving_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitDefinition, InputValue};

    fn artifacts() -> CircuitArtifacts {
        CircuitArtifacts {
            wasm: "toxicity.wasm".into(),
            zkey: "toxicity_final.zkey".into(),
            verification_key: None,
        }
    }

    fn inputs() -> CircuitInputs {
        let circuit = CircuitDefinition::toxicity(artifacts());
        CircuitInputs::build(
            &circuit,
            [
                ("poolBalance0", InputValue::from(1u64)),
                ("poolBalance1", InputValue::from(2u64)),
                ("toxicityThreshold", InputValue::from(3u64)),
                ("signals", InputValue::from(vec![4u64])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_backend() {
        let cli = SnarkjsCli::default();
        assert_eq!(cli.binary(), &PathBuf::from("snarkjs"));
        assert_eq!(cli.timeout(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_missing_binary_is_io_error() {
        let cli = SnarkjsCli::new("/nonexistent/snarkjs-binary", Duration::from_secs(5));
        let err = cli.full_prove(&inputs(), &artifacts()).await.unwrap_err();
        assert!(matches!(err, ProverError::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_surfaces_its_message() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-snarkjs");
        std::fs::write(&script, "#!/bin/sh\necho 'Error: Not enough values for input signal' >&2\nexit 1\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let cli = SnarkjsCli::new(&script, Duration::from_secs(5));
        let err = cli.full_prove(&inputs(), &artifacts()).await.unwrap_err();
        match err {
            ProverError::External { tool, message } => {
                assert_eq!(tool, "snarkjs");
                assert_eq!(message, "Error: Not enough values for input signal");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-snarkjs");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let cli = SnarkjsCli::new(&script, Duration::from_millis(200));
        let err = cli.full_prove(&inputs(), &artifacts()).await.unwrap_err();
        assert!(matches!(err, ProverError::Timeout { .. }));
    }
}
