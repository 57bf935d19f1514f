//! Decimal strings ⇄ BN254 field elements and curve points
//!
//! snarkjs writes every coordinate as a decimal string and G1/G2 points in
//! projective form with `z = 1`. Values are range-checked against the field
//! modulus instead of being silently reduced.

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use num_bigint::BigUint;

use darkpool_commitment::U256;

use crate::error::{ProverError, Result};

/// Canonical field element from a 256-bit word; values ≥ p are rejected
pub fn field_from_u256<F: PrimeField>(value: &U256) -> Result<F> {
    let n = value.to_biguint();
    let modulus: BigUint = F::MODULUS.into();
    if n >= modulus {
        return Err(ProverError::FieldOverflow {
            value: value.to_string(),
        });
    }
    Ok(F::from(n))
}

pub fn field_to_u256<F: PrimeField>(f: &F) -> Result<U256> {
    let n: BigUint = f.into_bigint().into();
    Ok(U256::from_biguint(&n)?)
}

/// Parse a snarkjs G1 point `[x, y]` or `[x, y, z]`
pub fn g1_from_strs(what: &'static str, coords: &[String]) -> Result<G1Affine> {
    let (x, y) = match coords {
        [x, y] => (x, y),
        [x, y, z] => {
            match z.trim() {
                "1" => {}
                "0" => return Ok(G1Affine::zero()),
                other => {
                    return Err(ProverError::InvalidPoint {
                        what,
                        reason: format!("expected affine z = 1, got {}", other),
                    });
                }
            }
            (x, y)
        }
        _ => {
            return Err(ProverError::InvalidPoint {
                what,
                reason: format!("expected 2 or 3 coordinates, got {}", coords.len()),
            });
        }
    };
    g1_point(what, &x.parse()?, &y.parse()?)
}

/// Parse a snarkjs G2 point `[[x.c0, x.c1], [y.c0, y.c1]]` with optional z
pub fn g2_from_strs(what: &'static str, coords: &[Vec<String>]) -> Result<G2Affine> {
    let (x, y) = match coords {
        [x, y] => (x, y),
        [x, y, z] => {
            let z: Vec<&str> = z.iter().map(|s| s.trim()).collect();
            match z.as_slice() {
                ["1", "0"] => {}
                ["0", "0"] => return Ok(G2Affine::zero()),
                _ => {
                    return Err(ProverError::InvalidPoint {
                        what,
                        reason: format!("expected affine z = [1, 0], got {:?}", z),
                    });
                }
            }
            (x, y)
        }
        _ => {
            return Err(ProverError::InvalidPoint {
                what,
                reason: format!("expected 2 or 3 coordinate pairs, got {}", coords.len()),
            });
        }
    };
    g2_point(what, &pair_from_strs(what, x)?, &pair_from_strs(what, y)?)
}

/// Affine G1 point from coordinates, checked on curve and in the subgroup
pub fn g1_point(what: &'static str, x: &U256, y: &U256) -> Result<G1Affine> {
    let point = G1Affine::new_unchecked(field_from_u256::<Fq>(x)?, field_from_u256::<Fq>(y)?);
    if !point.is_on_curve() {
        return Err(ProverError::InvalidPoint {
            what,
            reason: "not on curve".into(),
        });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(ProverError::InvalidPoint {
            what,
            reason: "not in prime-order subgroup".into(),
        });
    }
    Ok(point)
}

/// Affine G2 point from `[c0, c1]` coordinate pairs
pub fn g2_point(what: &'static str, x: &[U256; 2], y: &[U256; 2]) -> Result<G2Affine> {
    let point = G2Affine::new_unchecked(fq2(x)?, fq2(y)?);
    if !point.is_on_curve() {
        return Err(ProverError::InvalidPoint {
            what,
            reason: "not on curve".into(),
        });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(ProverError::InvalidPoint {
            what,
            reason: "not in prime-order subgroup".into(),
        });
    }
    Ok(point)
}

pub(crate) fn pair_from_strs(what: &'static str, pair: &[String]) -> Result<[U256; 2]> {
    match pair {
        [c0, c1] => Ok([c0.parse()?, c1.parse()?]),
        _ => Err(ProverError::InvalidPoint {
            what,
            reason: format!("expected an Fq2 pair, got {} values", pair.len()),
        }),
    }
}

fn fq2(pair: &[U256; 2]) -> Result<Fq2> {
    Ok(Fq2::new(field_from_u256(&pair[0])?, field_from_u256(&pair[1])?))
}
