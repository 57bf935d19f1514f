use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use darkpool_commitment::U256;
use darkpool_signals::SignalLayout;

use crate::error::{ProverError, Result};

/// Compiled circuit artifacts on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitArtifacts {
    /// Witness generator (`<circuit>.wasm`)
    pub wasm: PathBuf,
    /// Proving key (`<circuit>_final.zkey`)
    pub zkey: PathBuf,
    /// snarkjs `verification_key.json`; local verification is skipped without it
    pub verification_key: Option<PathBuf>,
}

/// Default private inputs of the toxicity circuit
pub const TOXICITY_PRIVATE_INPUTS: [&str; 1] = ["signals"];

/// Everything the pipeline needs to know about one circuit
#[derive(Debug, Clone)]
pub struct CircuitDefinition {
    pub layout: SignalLayout,
    pub private_inputs: Vec<String>,
    pub artifacts: CircuitArtifacts,
}

impl CircuitDefinition {
    pub fn new(
        layout: SignalLayout,
        private_inputs: Vec<String>,
        artifacts: CircuitArtifacts,
    ) -> Self {
        Self {
            layout,
            private_inputs,
            artifacts,
        }
    }

    pub fn toxicity(artifacts: CircuitArtifacts) -> Self {
        Self::new(
            SignalLayout::toxicity(),
            TOXICITY_PRIVATE_INPUTS.iter().map(|s| s.to_string()).collect(),
            artifacts,
        )
    }

    /// Names the witness generator expects: public inputs, then private ones
    pub fn input_names(&self) -> Vec<&str> {
        self.layout
            .public_inputs()
            .iter()
            .chain(&self.private_inputs)
            .map(String::as_str)
            .collect()
    }
}

/// A circuit input: a field element or a (nested) signal array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Scalar(U256),
    Array(Vec<InputValue>),
}

impl InputValue {
    pub fn as_scalar(&self) -> Option<&U256> {
        match self {
            InputValue::Scalar(v) => Some(v),
            InputValue::Array(_) => None,
        }
    }
}

impl From<U256> for InputValue {
    fn from(v: U256) -> Self {
        InputValue::Scalar(v)
    }
}

impl From<u64> for InputValue {
    fn from(v: u64) -> Self {
        InputValue::Scalar(U256::from(v))
    }
}

impl<T: Into<InputValue>> From<Vec<T>> for InputValue {
    fn from(v: Vec<T>) -> Self {
        InputValue::Array(v.into_iter().map(Into::into).collect())
    }
}

/// Input map checked against a circuit's declared input names.
///
/// Serializes to the `input.json` object the witness generator reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CircuitInputs(BTreeMap<String, InputValue>);

impl CircuitInputs {
    /// Every declared input is required and nothing undeclared is accepted
    pub fn build<K, V>(
        circuit: &CircuitDefinition,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<InputValue>,
    {
        let declared: HashSet<&str> = circuit.input_names().into_iter().collect();
        let mut map = BTreeMap::new();

        for (name, value) in values {
            let name = name.into();
            if !declared.contains(name.as_str()) {
                return Err(ProverError::UnknownInput(name));
            }
            if map.contains_key(&name) {
                return Err(ProverError::DuplicateInput(name));
            }
            map.insert(name, value.into());
        }

        for name in circuit.input_names() {
            if !map.contains_key(name) {
                return Err(ProverError::MissingInput(name.to_string()));
            }
        }

        Ok(Self(map))
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
