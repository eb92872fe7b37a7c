// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! # vtag-sdk
//!
//! Client library for **VeriTag** — the product authenticity registry on
//! Stellar.
//!
//! `vtag-sdk` provides everything manufacturer tooling and scanning
//! clients need: computing serial commitments, managing the local
//! registrar profile, submitting registrations and verifications to the
//! on-chain registry, and querying the event indexer for read-side data.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | *crate root* | Re-exports the commitment scheme (`SerialCommitment`, `serial_commitment`) |
//! | [`client`] | High-level registry client: authorize, register, verify, read |
//! | [`profile`] | Registrar profile persistence at `~/.vtag/profile.json` |
//! | [`soroban`] | Stellar CLI wrapper for on-chain contract invocation |
//!
//! ## Typical integration flow
//!
//! ```rust,no_run
//! use vtag_sdk::client::VtagClient;
//! use vtag_sdk::profile;
//!
//! # async fn example() -> vtag_sdk::error::VtagResult<()> {
//! let client = VtagClient::from_profile(&profile::load_profile()?)?;
//!
//! // 1. Register a batch — commitments computed from plaintext serials
//! let serials = vec!["SN123456789".to_string()];
//! client.register_batch(1, "Premium Sneakers", "Nike", &serials).await?;
//!
//! // 2. Later, anyone scans a unit
//! let outcome = client.verify_serial(1, "SN123456789").await?;
//! assert!(outcome.authentic);
//! # Ok(())
//! # }
//! ```

// Re-exports from vtag-types
pub use vtag_types::{serial_commitment, SerialCommitment};

pub mod client;
pub mod error;
pub mod profile;
pub mod soroban;
