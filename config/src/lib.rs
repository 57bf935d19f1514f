//! Dark-pool Configuration
//!
//! Shared configuration crate for the CLI, scripts and library callers.
//!
//! Handles loading configuration from:
//! 1. DP_CONFIG env var (explicit path)
//! 2. ./darkpool.toml (current directory)
//! 3. ~/.darkpool/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};

use darkpool_commitment::{DEFAULT_SALT_BITS, SaltPolicy};
use darkpool_prover::{CircuitArtifacts, CircuitDefinition, TOXICITY_PRIVATE_INPUTS};
use darkpool_signals::{
    SignalLayout, TOXICITY_CIRCUIT, TOXICITY_OUTPUTS, TOXICITY_PUBLIC_INPUTS,
};

const CONFIG_FILE_NAME: &str = "config.toml";
const LOCAL_CONFIG_FILE_NAME: &str = "darkpool.toml";
const CONFIG_DIR_NAME: &str = ".darkpool";

// ============================================================================
// Default Constants
// ============================================================================

const DEFAULT_STORE_PATH: &str = "./darkpool-state";
const DEFAULT_REVEAL_DELAY_BLOCKS: u64 = 2;
const DEFAULT_WASM_PATH: &str = "circuits/toxicity_js/toxicity.wasm";
const DEFAULT_ZKEY_PATH: &str = "circuits/toxicity_final.zkey";
const DEFAULT_VKEY_PATH: &str = "circuits/verification_key.json";
const DEFAULT_SNARKJS_BIN: &str = "snarkjs";
const DEFAULT_PROVE_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DarkpoolConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub commitment: CommitmentConfig,
    #[serde(default)]
    pub circuit: CircuitConfig,
    #[serde(default)]
    pub prover: ProverConfig,
}

/// Where the pending commitment lives
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    File,
    Memory,
}

impl FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::File,
            path: DEFAULT_STORE_PATH.into(),
        }
    }
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.into()
}

/// Commitment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentConfig {
    /// Random bits per salt; a security parameter, at least 128
    #[serde(default = "default_salt_bits")]
    pub salt_bits: u16,
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_blocks: u64,
}

impl Default for CommitmentConfig {
    fn default() -> Self {
        Self {
            salt_bits: DEFAULT_SALT_BITS,
            reveal_delay_blocks: DEFAULT_REVEAL_DELAY_BLOCKS,
        }
    }
}

fn default_salt_bits() -> u16 {
    DEFAULT_SALT_BITS
}
fn default_reveal_delay() -> u64 {
    DEFAULT_REVEAL_DELAY_BLOCKS
}

/// Circuit layout and artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitConfig {
    #[serde(default = "default_circuit_name")]
    pub name: String,
    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,
    #[serde(default = "default_public_inputs")]
    pub public_inputs: Vec<String>,
    #[serde(default = "default_private_inputs")]
    pub private_inputs: Vec<String>,
    /// Signal names in the deployed verifier's input order.
    /// Unset means the built-in order for the toxicity circuit.
    #[serde(default)]
    pub verifier_order: Option<Vec<String>>,
    #[serde(default = "default_wasm_path")]
    pub wasm_path: String,
    #[serde(default = "default_zkey_path")]
    pub zkey_path: String,
    #[serde(default = "default_vkey_path")]
    pub verification_key_path: Option<String>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            name: default_circuit_name(),
            outputs: default_outputs(),
            public_inputs: default_public_inputs(),
            private_inputs: default_private_inputs(),
            verifier_order: None,
            wasm_path: DEFAULT_WASM_PATH.into(),
            zkey_path: DEFAULT_ZKEY_PATH.into(),
            verification_key_path: default_vkey_path(),
        }
    }
}

fn default_circuit_name() -> String {
    TOXICITY_CIRCUIT.into()
}
fn default_outputs() -> Vec<String> {
    TOXICITY_OUTPUTS.iter().map(|s| s.to_string()).collect()
}
fn default_public_inputs() -> Vec<String> {
    TOXICITY_PUBLIC_INPUTS.iter().map(|s| s.to_string()).collect()
}
fn default_private_inputs() -> Vec<String> {
    TOXICITY_PRIVATE_INPUTS.iter().map(|s| s.to_string()).collect()
}
fn default_wasm_path() -> String {
    DEFAULT_WASM_PATH.into()
}
fn default_zkey_path() -> String {
    DEFAULT_ZKEY_PATH.into()
}
fn default_vkey_path() -> Option<String> {
    Some(DEFAULT_VKEY_PATH.into())
}

/// External prover settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverConfig {
    #[serde(default = "default_snarkjs_bin")]
    pub snarkjs_bin: String,
    #[serde(default = "default_prove_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_verify_locally")]
    pub verify_locally: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            snarkjs_bin: DEFAULT_SNARKJS_BIN.into(),
            timeout_secs: DEFAULT_PROVE_TIMEOUT_SECS,
            verify_locally: true,
        }
    }
}

fn default_snarkjs_bin() -> String {
    DEFAULT_SNARKJS_BIN.into()
}
fn default_prove_timeout() -> u64 {
    DEFAULT_PROVE_TIMEOUT_SECS
}
fn default_verify_locally() -> bool {
    true
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from env var if present
fn env_string(key: &str, field: &mut String) {
    if let Ok(v) = env::var(key) {
        *field = v;
    }
}

/// Set Option<String> from env var if present
fn env_option_string(key: &str, field: &mut Option<String>) {
    if let Ok(v) = env::var(key) {
        *field = Some(v);
    }
}

/// Set field from env var if present and parseable
fn env_parse<T: FromStr>(key: &str, field: &mut T) {
    if let Ok(v) = env::var(key) {
        match v.parse() {
            Ok(parsed) => *field = parsed,
            Err(_) => tracing::warn!("Ignoring unparseable {}={}", key, v),
        }
    }
}

/// Check if env var is set to a truthy value ("1" or "true")
fn env_bool(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

// ============================================================================
// Implementation
// ============================================================================

impl DarkpoolConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                Self::parse_file(&path)?
            }
            None => {
                tracing::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::parse_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check DP_CONFIG env var
        if let Ok(path) = env::var("DP_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!("DP_CONFIG points at missing file: {}", path.display());
        }

        // 2. Check ./darkpool.toml (current directory)
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.darkpool/config.toml
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Storage
        env_parse("DP_STORE_BACKEND", &mut self.storage.backend);
        env_string("DP_STORE_PATH", &mut self.storage.path);

        // Commitment
        env_parse("DP_SALT_BITS", &mut self.commitment.salt_bits);
        env_parse("DP_REVEAL_DELAY", &mut self.commitment.reveal_delay_blocks);

        // Circuit
        env_string("DP_CIRCUIT_WASM", &mut self.circuit.wasm_path);
        env_string("DP_CIRCUIT_ZKEY", &mut self.circuit.zkey_path);
        env_option_string("DP_CIRCUIT_VKEY", &mut self.circuit.verification_key_path);

        // Prover
        env_string("DP_SNARKJS_BIN", &mut self.prover.snarkjs_bin);
        env_parse("DP_PROVE_TIMEOUT_SECS", &mut self.prover.timeout_secs);
        if let Some(v) = env_bool("DP_VERIFY_LOCALLY") {
            self.prover.verify_locally = v;
        }
    }

    /// Reject settings that would weaken commitments or cannot work
    pub fn validate(&self) -> Result<()> {
        self.salt_policy()?;
        if self.prover.timeout_secs == 0 {
            bail!("prover.timeout_secs must be positive");
        }
        self.signal_layout()?;
        Ok(())
    }

    pub fn salt_policy(&self) -> Result<SaltPolicy> {
        SaltPolicy::new(self.commitment.salt_bits).context("Invalid commitment.salt_bits")
    }

    /// The circuit's signal layout. A custom circuit must name its verifier
    /// input order explicitly; only the toxicity circuit has a built-in one.
    pub fn signal_layout(&self) -> Result<SignalLayout> {
        let c = &self.circuit;
        match &c.verifier_order {
            Some(order) => SignalLayout::from_verifier_names(
                c.name.clone(),
                &c.outputs,
                &c.public_inputs,
                order,
            )
            .context("Invalid circuit.verifier_order"),
            None => {
                let builtin = SignalLayout::toxicity();
                if c.name != builtin.name()
                    || c.outputs != builtin.outputs()
                    || c.public_inputs != builtin.public_inputs()
                {
                    bail!(
                        "circuit '{}' has no built-in verifier order; set circuit.verifier_order",
                        c.name
                    );
                }
                Ok(builtin)
            }
        }
    }

    pub fn circuit_definition(&self) -> Result<CircuitDefinition> {
        let artifacts = CircuitArtifacts {
            wasm: PathBuf::from(&self.circuit.wasm_path),
            zkey: PathBuf::from(&self.circuit.zkey_path),
            verification_key: if self.prover.verify_locally {
                self.circuit.verification_key_path.as_ref().map(PathBuf::from)
            } else {
                None
            },
        };
        Ok(CircuitDefinition::new(
            self.signal_layout()?,
            self.circuit.private_inputs.clone(),
            artifacts,
        ))
    }

    pub fn prove_timeout(&self) -> Duration {
        Duration::from_secs(self.prover.timeout_secs)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let mut sample = Self::default();
        sample.circuit.verifier_order = Some(
            SignalLayout::toxicity()
                .verifier_names()
                .into_iter()
                .map(String::from)
                .collect(),
        );
        toml::to_string_pretty(&sample).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
