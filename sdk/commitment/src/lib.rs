//! Dark-pool commitment primitives
//!
//! Hash commitments binding a trader to hidden swap parameters until reveal.
//!
//! ```text
//! commitment = keccak256( be32(amount) || be32(min_out) || be32(salt) )
//! nullifier  = keccak256( be32(salt) )
//! ```
//!
//! Every field is a 256-bit unsigned integer packed as a 32-byte big-endian
//! word. There is no length prefix and no type tag: the on-chain verifier
//! recomputes the same pre-image and equality must hold bit-for-bit.

pub mod commitment;
pub mod error;
pub mod hash;
pub mod salt;
pub mod uint;

pub use commitment::{
    CommitmentOpening, check_salt_input, compute_commitment, compute_nullifier, verify_commitment,
};
pub use error::{CommitmentError, EncodingError};
pub use hash::{Hash256, encode_packed, keccak256};
pub use salt::{DEFAULT_SALT_BITS, MAX_SALT_BITS, MIN_SALT_BITS, SaltPolicy};
pub use uint::U256;
