//! Groth16 proofs in snarkjs JSON form and the typed bundle the pipeline
//! carries around.

use ark_bn254::Bn254;
use ark_groth16::Proof;
use serde::{Deserialize, Serialize};

use darkpool_commitment::U256;
use darkpool_signals::NativeSignals;

use crate::error::{ProverError, Result};
use crate::field::{g1_point, g2_point, pair_from_strs};

/// `proof.json` as written by `snarkjs groth16 prove|fullprove`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

/// Proof points plus public signals in the proving tool's native order.
///
/// `b` keeps the tool's coordinate order `[[x.c0, x.c1], [y.c0, y.c1]]`;
/// the EVM swap happens only when packing calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkProofBundle {
    pub a: [U256; 2],
    pub b: [[U256; 2]; 2],
    pub c: [U256; 2],
    pub public_signals: NativeSignals<U256>,
}

impl ZkProofBundle {
    pub fn from_snarkjs(proof: &SnarkjsProof, public_signals: &[String]) -> Result<Self> {
        if let Some(protocol) = &proof.protocol {
            if protocol != "groth16" {
                return Err(ProverError::MalformedProof(format!(
                    "unsupported protocol '{}'",
                    protocol
                )));
            }
        }
        if let Some(curve) = &proof.curve {
            if curve != "bn128" && curve != "bn254" {
                return Err(ProverError::MalformedProof(format!(
                    "unsupported curve '{}'",
                    curve
                )));
            }
        }

        let a = g1_words("pi_a", &proof.pi_a)?;
        let b = g2_words("pi_b", &proof.pi_b)?;
        let c = g1_words("pi_c", &proof.pi_c)?;

        let public_signals = public_signals
            .iter()
            .map(|s| s.parse::<U256>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            a,
            b,
            c,
            public_signals: NativeSignals::new(public_signals),
        })
    }

    /// Parse the pair of files snarkjs writes (`proof.json`, `public.json`)
    pub fn from_json(proof_json: &str, public_json: &str) -> Result<Self> {
        let proof: SnarkjsProof = serde_json::from_str(proof_json)?;
        let public: Vec<String> = serde_json::from_str(public_json)?;
        Self::from_snarkjs(&proof, &public)
    }

    /// Inverse of [`Self::from_snarkjs`]: the points in snarkjs projective form
    pub fn to_snarkjs(&self) -> (SnarkjsProof, Vec<String>) {
        let proof = SnarkjsProof {
            pi_a: vec![self.a[0].to_string(), self.a[1].to_string(), "1".into()],
            pi_b: vec![
                vec![self.b[0][0].to_string(), self.b[0][1].to_string()],
                vec![self.b[1][0].to_string(), self.b[1][1].to_string()],
                vec!["1".into(), "0".into()],
            ],
            pi_c: vec![self.c[0].to_string(), self.c[1].to_string(), "1".into()],
            protocol: Some("groth16".into()),
            curve: Some("bn128".into()),
        };
        let public = self.public_signals.iter().map(U256::to_string).collect();
        (proof, public)
    }

    /// Curve points with on-curve and subgroup checks applied
    pub fn to_ark_proof(&self) -> Result<Proof<Bn254>> {
        Ok(Proof {
            a: g1_point("pi_a", &self.a[0], &self.a[1])?,
            b: g2_point("pi_b", &self.b[0], &self.b[1])?,
            c: g1_point("pi_c", &self.c[0], &self.c[1])?,
        })
    }
}

fn g1_words(what: &'static str, coords: &[String]) -> Result<[U256; 2]> {
    match coords {
        [x, y] => Ok([x.parse()?, y.parse()?]),
        [x, y, z] if z.trim() == "1" => Ok([x.parse()?, y.parse()?]),
        [_, _, z] => Err(ProverError::MalformedProof(format!(
            "{} has z = {}, expected 1",
            what, z
        ))),
        _ => Err(ProverError::MalformedProof(format!(
            "{} has {} coordinates",
            what,
            coords.len()
        ))),
    }
}

fn g2_words(what: &'static str, coords: &[Vec<String>]) -> Result<[[U256; 2]; 2]> {
    let (x, y) = match coords {
        [x, y] => (x, y),
        [x, y, z] => {
            if z.len() != 2 || z[0].trim() != "1" || z[1].trim() != "0" {
                return Err(ProverError::MalformedProof(format!(
                    "{} has z = {:?}, expected [1, 0]",
                    what, z
                )));
            }
            (x, y)
        }
        _ => {
            return Err(ProverError::MalformedProof(format!(
                "{} has {} coordinate pairs",
                what,
                coords.len()
            )));
        }
    };
    Ok([pair_from_strs(what, x)?, pair_from_strs(what, y)?])
}
