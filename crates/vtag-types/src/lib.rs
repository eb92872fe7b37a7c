//! Shared off-chain types for the VeriTag authenticity registry.
//!
//! The registry contract only ever sees opaque 32-byte commitments; this
//! crate owns the commitment construction used by the registering
//! manufacturer's tooling and the verifying scanner.

pub mod commitment;

pub use commitment::{serial_commitment, SerialCommitment};
