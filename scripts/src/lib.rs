//! Shared output helpers for the dark-pool test scripts

pub mod output;
