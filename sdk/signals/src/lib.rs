//! Public-signal ordering
//!
//! A Groth16 toolchain emits public signals outputs-first; the deployed
//! verifier may declare them inputs-first. The two orders are modelled as
//! distinct types and only [`SignalLayout`] converts between them.
//!
//! ```text
//!  native   : [ valid, aggregateSignalHash, poolBalance0, poolBalance1, toxicityThreshold ]
//!                  │            │               │             │               │
//!  order    : [    2,           3,              4,            0,              1 ]   (verifier[i] = native[order[i]])
//!                  ▼            ▼               ▼             ▼               ▼
//!  verifier : [ poolBalance0, poolBalance1, toxicityThreshold, valid, aggregateSignalHash ]
//! ```

pub mod error;
pub mod layout;
pub mod signals;

pub use error::SignalError;
pub use layout::{
    SignalLayout, TOXICITY_CIRCUIT, TOXICITY_OUTPUTS, TOXICITY_PUBLIC_INPUTS,
    TOXICITY_VERIFIER_ORDER,
};
pub use signals::{NativeSignals, VerifierSignals};
