//! snarkjs `verification_key.json` ⇄ arkworks `VerifyingKey<Bn254>`

use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::error::{ProverError, Result};
use crate::field::{g1_from_strs, g2_from_strs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsVerificationKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    #[serde(rename = "nPublic")]
    pub n_public: usize,
    pub vk_alpha_1: Vec<String>,
    pub vk_beta_2: Vec<Vec<String>>,
    pub vk_gamma_2: Vec<Vec<String>>,
    pub vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<String>>,
}

impl SnarkjsVerificationKey {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to an arkworks key, validating every point.
    ///
    /// `IC` must hold exactly `nPublic + 1` points.
    pub fn to_ark(&self) -> Result<VerifyingKey<Bn254>> {
        if let Some(protocol) = &self.protocol {
            if protocol != "groth16" {
                return Err(ProverError::VerificationKey(format!(
                    "unsupported protocol '{}'",
                    protocol
                )));
            }
        }
        if self.ic.len() != self.n_public + 1 {
            return Err(ProverError::VerificationKey(format!(
                "nPublic is {} but IC has {} points",
                self.n_public,
                self.ic.len()
            )));
        }

        let gamma_abc_g1 = self
            .ic
            .iter()
            .map(|p| g1_from_strs("IC", p))
            .collect::<Result<Vec<_>>>()?;

        Ok(VerifyingKey {
            alpha_g1: g1_from_strs("vk_alpha_1", &self.vk_alpha_1)?,
            beta_g2: g2_from_strs("vk_beta_2", &self.vk_beta_2)?,
            gamma_g2: g2_from_strs("vk_gamma_2", &self.vk_gamma_2)?,
            delta_g2: g2_from_strs("vk_delta_2", &self.vk_delta_2)?,
            gamma_abc_g1,
        })
    }
}
