//! Circuit signal layouts
//!
//! A layout names a circuit's outputs and public inputs and carries the
//! permutation into the verifier's declared order as an explicit index list.
//! The list is data, checked once at construction, never inferred.

use std::collections::HashSet;

use crate::error::{Result, SignalError};
use crate::signals::{NativeSignals, VerifierSignals};

pub const TOXICITY_CIRCUIT: &str = "toxicity";

/// Circuit outputs, emitted first by the proving tool
pub const TOXICITY_OUTPUTS: [&str; 2] = ["valid", "aggregateSignalHash"];

/// Public inputs, emitted after the outputs
pub const TOXICITY_PUBLIC_INPUTS: [&str; 3] =
    ["poolBalance0", "poolBalance1", "toxicityThreshold"];

/// verifier[i] = native[TOXICITY_VERIFIER_ORDER[i]]
pub const TOXICITY_VERIFIER_ORDER: [usize; 5] = [2, 3, 4, 0, 1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalLayout {
    name: String,
    outputs: Vec<String>,
    public_inputs: Vec<String>,
    /// verifier[i] = native[verifier_order[i]]
    verifier_order: Vec<usize>,
}

impl SignalLayout {
    /// Build a layout from an explicit index list.
    ///
    /// `verifier_order[i]` is the native position of the verifier's i-th input.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        outputs: impl IntoIterator<Item = S>,
        public_inputs: impl IntoIterator<Item = S>,
        verifier_order: Vec<usize>,
    ) -> Result<Self> {
        let layout = Self {
            name: name.into(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            public_inputs: public_inputs.into_iter().map(Into::into).collect(),
            verifier_order,
        };
        layout.check_names()?;
        layout.check_permutation()?;
        Ok(layout)
    }

    /// Build a layout from the verifier's declared input names.
    ///
    /// Use this when the deployed verifier publishes its input layout; the
    /// index list is derived from the names rather than typed by hand.
    pub fn from_verifier_names<S: AsRef<str>>(
        name: impl Into<String>,
        outputs: &[S],
        public_inputs: &[S],
        verifier_names: &[S],
    ) -> Result<Self> {
        let native: Vec<String> = outputs
            .iter()
            .chain(public_inputs)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut seen = HashSet::new();
        let mut order = Vec::with_capacity(verifier_names.len());
        for v in verifier_names {
            let v = v.as_ref();
            if !seen.insert(v) {
                return Err(SignalError::DuplicateSignal(v.to_string()));
            }
            let idx = native
                .iter()
                .position(|n| n == v)
                .ok_or_else(|| SignalError::UnknownSignal(v.to_string()))?;
            order.push(idx);
        }

        Self::new(
            name,
            outputs.iter().map(|s| s.as_ref().to_string()),
            public_inputs.iter().map(|s| s.as_ref().to_string()),
            order,
        )
    }

    /// The observed toxicity-check circuit
    pub fn toxicity() -> Self {
        Self {
            name: TOXICITY_CIRCUIT.to_string(),
            outputs: TOXICITY_OUTPUTS.iter().map(|s| s.to_string()).collect(),
            public_inputs: TOXICITY_PUBLIC_INPUTS.iter().map(|s| s.to_string()).collect(),
            verifier_order: TOXICITY_VERIFIER_ORDER.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn public_inputs(&self) -> &[String] {
        &self.public_inputs
    }

    pub fn verifier_order(&self) -> &[usize] {
        &self.verifier_order
    }

    /// Total public signal count (outputs + public inputs)
    pub fn len(&self) -> usize {
        self.outputs.len() + self.public_inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn native_names(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .chain(&self.public_inputs)
            .map(String::as_str)
            .collect()
    }

    pub fn verifier_names(&self) -> Vec<&str> {
        let native = self.native_names();
        self.verifier_order.iter().map(|&i| native[i]).collect()
    }

    pub fn native_index(&self, name: &str) -> Option<usize> {
        self.native_names().iter().position(|n| *n == name)
    }

    /// native[j] = verifier[inverse[j]]
    pub fn inverse_order(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.verifier_order.len()];
        for (i, &j) in self.verifier_order.iter().enumerate() {
            inverse[j] = i;
        }
        inverse
    }

    /// Fatal unless `got` equals the declared count exactly
    pub fn check_count(&self, got: usize) -> Result<()> {
        if got != self.len() {
            return Err(SignalError::CountMismatch {
                layout: self.name.clone(),
                expected: self.len(),
                got,
            });
        }
        Ok(())
    }

    pub fn to_verifier_order<T: Clone>(
        &self,
        native: &NativeSignals<T>,
    ) -> Result<VerifierSignals<T>> {
        self.check_count(native.len())?;
        let values = native.as_slice();
        Ok(VerifierSignals::new(
            self.verifier_order.iter().map(|&i| values[i].clone()).collect(),
        ))
    }

    pub fn to_native_order<T: Clone>(
        &self,
        verifier: &VerifierSignals<T>,
    ) -> Result<NativeSignals<T>> {
        self.check_count(verifier.len())?;
        let values = verifier.as_slice();
        Ok(NativeSignals::new(
            self.inverse_order()
                .into_iter()
                .map(|i| values[i].clone())
                .collect(),
        ))
    }

    /// Look up a native-order signal by its declared name
    pub fn native_value<'a, T>(&self, native: &'a NativeSignals<T>, name: &str) -> Result<&'a T> {
        self.check_count(native.len())?;
        let idx = self
            .native_index(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        Ok(&native.as_slice()[idx])
    }

    fn check_names(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for n in self.outputs.iter().chain(&self.public_inputs) {
            if !seen.insert(n.as_str()) {
                return Err(SignalError::DuplicateSignal(n.clone()));
            }
        }
        Ok(())
    }

    fn check_permutation(&self) -> Result<()> {
        let n = self.len();
        if self.verifier_order.len() != n {
            return Err(SignalError::InvalidPermutation(format!(
                "index list has {} entries for {} signals",
                self.verifier_order.len(),
                n
            )));
        }
        let mut hit = vec![false; n];
        for &i in &self.verifier_order {
            if i >= n {
                return Err(SignalError::InvalidPermutation(format!(
                    "index {} out of range for {} signals",
                    i, n
                )));
            }
            if hit[i] {
                return Err(SignalError::InvalidPermutation(format!(
                    "index {} appears twice",
                    i
                )));
            }
            hit[i] = true;
        }
        Ok(())
    }
}
