use darkpool_commitment::{
    CommitmentOpening, Hash256, U256, compute_commitment, compute_nullifier, keccak256,
    verify_commitment,
};

// Observed swap fixture
const AMOUNT: u64 = 10_000_000;
const MIN_OUT: u64 = 4_000_000_000_000_000;
const SALT: u64 = 52_555_232;

const FIXTURE_COMMITMENT: &str =
    "0xa4156ce6679fbcc43833e220d1183c652030cd662021f99664e85ba03985a70c";
const FIXTURE_NULLIFIER: &str =
    "0xa94e7fb590976e192bf94f0fd2ae124b6ffbe8cfdc224b3bbb0774aa86076fa1";

/// Pre-image built by hand, independent of `encode_packed`
fn manual_preimage(words: &[u64]) -> Vec<u8> {
    let mut out = Vec::new();
    for w in words {
        out.extend_from_slice(&[0u8; 24]);
        out.extend_from_slice(&w.to_be_bytes());
    }
    out
}

#[test]
fn fixture_commitment_matches_packed_keccak() {
    let commitment = compute_commitment(&AMOUNT.into(), &MIN_OUT.into(), &SALT.into());

    let independent = keccak256(&manual_preimage(&[AMOUNT, MIN_OUT, SALT]));
    assert_eq!(commitment, independent);

    let expected: Hash256 = FIXTURE_COMMITMENT.parse().unwrap();
    assert_eq!(commitment, expected);
}

#[test]
fn fixture_nullifier_matches_packed_keccak() {
    let nullifier = compute_nullifier(&SALT.into());
    assert_eq!(nullifier, keccak256(&manual_preimage(&[SALT])));
    assert_eq!(nullifier.to_hex(), FIXTURE_NULLIFIER);
}

#[test]
fn fixture_parses_from_decimal_strings() {
    let amount: U256 = "10000000".parse().unwrap();
    let min_out: U256 = "4000000000000000".parse().unwrap();
    let salt: U256 = "52555232".parse().unwrap();
    assert_eq!(
        compute_commitment(&amount, &min_out, &salt).to_hex(),
        FIXTURE_COMMITMENT
    );
}

#[test]
fn perturbing_any_field_breaks_verification() {
    let base = [
        (U256::from(AMOUNT), U256::from(MIN_OUT), U256::from(SALT)),
        (U256::ZERO, U256::ZERO, U256::ZERO),
        (U256::MAX, U256::from(1u64), U256::from(u128::MAX)),
    ];
    let deltas = [1u64, 2, 255, 1 << 32];

    for (amount, min_out, salt) in base {
        let expected = compute_commitment(&amount, &min_out, &salt);
        assert!(verify_commitment(&salt, &amount, &min_out, &expected));

        for delta in deltas {
            let d = U256::from(delta);
            if let Some(a) = amount.checked_add(&d) {
                assert!(!verify_commitment(&salt, &a, &min_out, &expected));
            }
            if let Some(m) = min_out.checked_add(&d) {
                assert!(!verify_commitment(&salt, &amount, &m, &expected));
            }
            if let Some(s) = salt.checked_add(&d) {
                assert!(!verify_commitment(&s, &amount, &min_out, &expected));
            }
        }
    }
}

#[test]
fn different_salts_give_different_nullifiers() {
    let salts = [0u64, 1, 2, SALT, u64::MAX];
    for (i, a) in salts.iter().enumerate() {
        for b in &salts[i + 1..] {
            assert_ne!(compute_nullifier(&(*a).into()), compute_nullifier(&(*b).into()));
        }
    }
}

#[test]
fn opening_verify_is_hard_failure() {
    let opening = CommitmentOpening::new(AMOUNT.into(), MIN_OUT.into(), SALT.into());
    let expected: Hash256 = FIXTURE_COMMITMENT.parse().unwrap();
    assert!(opening.verify(&expected).is_ok());

    let drifted = CommitmentOpening::new(AMOUNT.into(), (MIN_OUT + 1).into(), SALT.into());
    assert!(drifted.verify(&expected).is_err());
}
