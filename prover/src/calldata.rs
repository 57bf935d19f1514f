//! Fixed-layout verifier calldata
//!
//! ```text
//! a[0] a[1] | b[0][0] b[0][1] b[1][0] b[1][1] | c[0] c[1] | in[0] .. in[N-1]
//! ```
//!
//! Every entry is one 32-byte big-endian word, no padding or separators.
//! `b` is in the EVM pairing precompile order, each Fq2 coordinate written
//! imaginary part first.

use darkpool_commitment::U256;
use darkpool_signals::VerifierSignals;

use crate::error::{ProverError, Result};
use crate::proof::ZkProofBundle;

pub const WORD_SIZE: usize = 32;

/// Words before the public inputs: a(2) + b(4) + c(2)
const PROOF_WORDS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofCalldata {
    pub a: [U256; 2],
    /// `[[x.c1, x.c0], [y.c1, y.c0]]`
    pub b: [[U256; 2]; 2],
    pub c: [U256; 2],
    pub inputs: VerifierSignals<U256>,
}

impl ProofCalldata {
    /// Pack proof points with signals already in the verifier's order
    pub fn new(bundle: &ZkProofBundle, inputs: VerifierSignals<U256>) -> Self {
        let [[x0, x1], [y0, y1]] = bundle.b;
        Self {
            a: bundle.a,
            b: [[x1, x0], [y1, y0]],
            c: bundle.c,
            inputs,
        }
    }

    pub fn byte_len(&self) -> usize {
        (PROOF_WORDS + self.inputs.len()) * WORD_SIZE
    }

    fn words(&self) -> impl Iterator<Item = &U256> {
        self.a
            .iter()
            .chain(self.b.iter().flatten())
            .chain(self.c.iter())
            .chain(self.inputs.iter())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for word in self.words() {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Parse packed calldata carrying exactly `n_inputs` public inputs
    pub fn from_bytes(bytes: &[u8], n_inputs: usize) -> Result<Self> {
        let expected = PROOF_WORDS
            .checked_add(n_inputs)
            .and_then(|words| words.checked_mul(WORD_SIZE))
            .ok_or_else(|| {
                ProverError::MalformedCalldata(format!("{} inputs cannot fit calldata", n_inputs))
            })?;
        if bytes.len() != expected {
            return Err(ProverError::MalformedCalldata(format!(
                "expected {} bytes for {} inputs, got {}",
                expected,
                n_inputs,
                bytes.len()
            )));
        }

        let words: Vec<U256> = bytes
            .chunks_exact(WORD_SIZE)
            .map(|chunk| {
                let mut w = [0u8; WORD_SIZE];
                w.copy_from_slice(chunk);
                U256::from_be_bytes(w)
            })
            .collect();

        Ok(Self {
            a: [words[0], words[1]],
            b: [[words[2], words[3]], [words[4], words[5]]],
            c: [words[6], words[7]],
            inputs: VerifierSignals::new(words[PROOF_WORDS..].to_vec()),
        })
    }

    pub fn from_hex(s: &str, n_inputs: usize) -> Result<Self> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| ProverError::MalformedCalldata(e.to_string()))?;
        Self::from_bytes(&bytes, n_inputs)
    }

    /// Decimal argument tuple in the shape snarkjs `soliditycalldata` prints
    pub fn to_solidity_args(&self) -> String {
        let pair = |p: &[U256; 2]| format!("[\"{}\",\"{}\"]", p[0], p[1]);
        let inputs = self
            .inputs
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{},[{},{}],{},[{}]",
            pair(&self.a),
            pair(&self.b[0]),
            pair(&self.b[1]),
            pair(&self.c),
            inputs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkpool_signals::NativeSignals;

    fn bundle() -> ZkProofBundle {
        let w = |n: u64| U256::from(n);
        ZkProofBundle {
            a: [w(1), w(2)],
            b: [[w(3), w(4)], [w(5), w(6)]],
            c: [w(7), w(8)],
            public_signals: NativeSignals::new(vec![w(100), w(101), w(102)]),
        }
    }

    #[test]
    fn test_layout_and_length() {
        let inputs = VerifierSignals::new(vec![U256::from(9u64), U256::from(10u64)]);
        let calldata = ProofCalldata::new(&bundle(), inputs);
        let bytes = calldata.to_bytes();
        assert_eq!(bytes.len(), (8 + 2) * 32);
        assert_eq!(calldata.byte_len(), bytes.len());

        let word = |i: usize| bytes[i * 32 + 31];
        // a, swapped b, c, inputs
        assert_eq!(
            (0..10).map(word).collect::<Vec<_>>(),
            vec![1, 2, 4, 3, 6, 5, 7, 8, 9, 10]
        );
        assert!(bytes[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let inputs = VerifierSignals::new(vec![U256::MAX, U256::ZERO, U256::from(5u64)]);
        let calldata = ProofCalldata::new(&bundle(), inputs);
        let parsed = ProofCalldata::from_bytes(&calldata.to_bytes(), 3).unwrap();
        assert_eq!(parsed, calldata);
        assert_eq!(ProofCalldata::from_hex(&calldata.to_hex(), 3).unwrap(), calldata);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let calldata = ProofCalldata::new(&bundle(), VerifierSignals::new(vec![U256::ZERO; 5]));
        let bytes = calldata.to_bytes();
        assert!(matches!(
            ProofCalldata::from_bytes(&bytes, 4),
            Err(ProverError::MalformedCalldata(_))
        ));
        assert!(matches!(
            ProofCalldata::from_bytes(&bytes[..bytes.len() - 1], 5),
            Err(ProverError::MalformedCalldata(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_absurd_input_count() {
        let calldata = ProofCalldata::new(&bundle(), VerifierSignals::new(vec![U256::ZERO]));
        let bytes = calldata.to_bytes();
        assert!(matches!(
            ProofCalldata::from_bytes(&bytes, usize::MAX),
            Err(ProverError::MalformedCalldata(_))
        ));
        assert!(matches!(
            ProofCalldata::from_bytes(&bytes, usize::MAX / WORD_SIZE),
            Err(ProverError::MalformedCalldata(_))
        ));
    }

    #[test]
    fn test_solidity_args() {
        let inputs = VerifierSignals::new(vec![U256::from(9u64)]);
        let calldata = ProofCalldata::new(&bundle(), inputs);
        assert_eq!(
            calldata.to_solidity_args(),
            r#"["1","2"],[["4","3"],["6","5"]],["7","8"],["9"]"#
        );
    }
}
