// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! High-level integration client for VeriTag.
//!
//! Wraps profile, commitment computation, soroban invocation, and indexer
//! queries into a small surface area: authorize → register → verify →
//! read.
//!
//! ```rust,no_run
//! use vtag_sdk::client::VtagClient;
//!
//! # async fn example() -> vtag_sdk::error::VtagResult<()> {
//! let client = VtagClient::new(
//!     "http://localhost:3000",
//!     "C_REGISTRY...",
//!     "S_SECRET...",
//!     "testnet",
//! )?;
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;

use crate::error::{VtagError, VtagResult};
use crate::profile::{ProfileData, PLACEHOLDER};
use crate::{serial_commitment, SerialCommitment};

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

pub struct VtagClient {
    indexer_url: String,
    registry_contract_id: String,
    stellar_secret: String,
    network: String,
    http: reqwest::Client,
}

pub struct RegisterResult {
    pub batch_id: u64,
    pub serial_count: usize,
    pub commitments: Vec<String>,
    pub tx_result: String,
}

pub struct VerifyOutcome {
    pub batch_id: u64,
    pub commitment: String,
    pub authentic: bool,
}

// ---------------------------------------------------------------------------
// Indexer response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ProductRecord {
    pub batch_id: u64,
    pub name: String,
    pub brand: String,
    pub serial_count: u32,
    pub registered_ledger: u64,
    pub exists: bool,
}

#[derive(Deserialize)]
pub struct SerialStatus {
    pub commitment: String,
    pub verified: bool,
}

#[derive(Deserialize)]
pub struct RegistryStats {
    pub total_products: u64,
    pub total_verifications: u64,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl VtagClient {
    pub fn new(
        indexer_url: &str,
        registry_contract_id: &str,
        stellar_secret: &str,
        network: &str,
    ) -> VtagResult<Self> {
        Ok(Self {
            indexer_url: indexer_url.to_string(),
            registry_contract_id: registry_contract_id.to_string(),
            stellar_secret: stellar_secret.to_string(),
            network: network.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn from_profile(profile: &ProfileData) -> VtagResult<Self> {
        Ok(Self {
            indexer_url: profile.indexer_url.clone(),
            registry_contract_id: profile.registry_contract_id.clone(),
            stellar_secret: profile.stellar_secret.clone(),
            network: profile.network.clone(),
            http: reqwest::Client::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require_registry_contract(&self) -> VtagResult<()> {
        if self.registry_contract_id == PLACEHOLDER {
            return Err(VtagError::Config(
                "registry_contract_id not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn invoke(&self, function: &str, args: &[(&str, &str)]) -> VtagResult<String> {
        crate::soroban::invoke_contract(
            &self.registry_contract_id,
            &self.network,
            &self.stellar_secret,
            function,
            args,
        )
        .await
        .map_err(|e| VtagError::Soroban(e.to_string()))
    }

    async fn caller_public_key(&self) -> VtagResult<String> {
        crate::soroban::get_public_key(&self.stellar_secret)
            .await
            .map_err(|e| VtagError::Soroban(e.to_string()))
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> VtagResult<T> {
        let url = format!("{}{}", self.indexer_url, path);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| VtagError::Indexer(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(VtagError::Indexer(format!(
                "{path}: status {}",
                resp.status()
            )));
        }
        resp.json::<T>()
            .await
            .map_err(|e| VtagError::Indexer(format!("parse {path}: {e}")))
    }

    // -----------------------------------------------------------------------
    // Mutations — submitted on-chain via the stellar CLI
    // -----------------------------------------------------------------------

    /// Grant or revoke a manufacturer's registration privilege (admin only).
    pub async fn authorize_manufacturer(
        &self,
        manufacturer: &str,
        authorized: bool,
    ) -> VtagResult<String> {
        self.require_registry_contract()?;
        let caller = self.caller_public_key().await?;
        self.invoke(
            "set_manufacturer_authorization",
            &[
                ("caller", &caller),
                ("manufacturer", manufacturer),
                ("authorized", if authorized { "true" } else { "false" }),
            ],
        )
        .await
    }

    /// Register a batch: compute commitments from plaintext serials and
    /// submit the registration on-chain. Plaintext never leaves this call.
    pub async fn register_batch(
        &self,
        batch_id: u64,
        name: &str,
        brand: &str,
        serials: &[String],
    ) -> VtagResult<RegisterResult> {
        self.require_registry_contract()?;
        if batch_id == 0 {
            return Err(VtagError::InvalidInput("batch_id must be nonzero".into()));
        }
        if name.is_empty() {
            return Err(VtagError::InvalidInput("name must be non-empty".into()));
        }
        if brand.is_empty() {
            return Err(VtagError::InvalidInput("brand must be non-empty".into()));
        }
        if serials.is_empty() {
            return Err(VtagError::InvalidInput(
                "at least one serial is required".into(),
            ));
        }

        let commitments: Vec<String> = serials
            .iter()
            .map(|s| serial_commitment(batch_id, s).to_hex())
            .collect();
        let serials_json = serde_json::to_string(&commitments)
            .map_err(|e| VtagError::Other(e.into()))?;

        let caller = self.caller_public_key().await?;
        let batch_id_str = batch_id.to_string();
        let tx_result = self
            .invoke(
                "register_product",
                &[
                    ("caller", &caller),
                    ("batch_id", &batch_id_str),
                    ("name", name),
                    ("brand", brand),
                    ("serials", &serials_json),
                ],
            )
            .await?;

        Ok(RegisterResult {
            batch_id,
            serial_count: commitments.len(),
            commitments,
            tx_result,
        })
    }

    /// Verify a plaintext serial against a batch.
    pub async fn verify_serial(&self, batch_id: u64, serial: &str) -> VtagResult<VerifyOutcome> {
        self.verify_commitment(batch_id, &serial_commitment(batch_id, serial))
            .await
    }

    /// Verify a precomputed commitment against a batch.
    pub async fn verify_commitment(
        &self,
        batch_id: u64,
        commitment: &SerialCommitment,
    ) -> VtagResult<VerifyOutcome> {
        self.require_registry_contract()?;
        if batch_id == 0 {
            return Err(VtagError::InvalidInput("batch_id must be nonzero".into()));
        }

        let caller = self.caller_public_key().await?;
        let serial_hex = commitment.to_hex();
        let batch_id_str = batch_id.to_string();
        let out = self
            .invoke(
                "verify",
                &[
                    ("caller", &caller),
                    ("serial", &serial_hex),
                    ("batch_id", &batch_id_str),
                ],
            )
            .await?;
        let authentic =
            crate::soroban::parse_bool_output(&out).map_err(|e| VtagError::Soroban(e.to_string()))?;

        Ok(VerifyOutcome {
            batch_id,
            commitment: serial_hex,
            authentic,
        })
    }

    // -----------------------------------------------------------------------
    // Reads — served by the indexer
    // -----------------------------------------------------------------------

    /// Look up a registered batch. `exists = false` when never registered.
    pub async fn product(&self, batch_id: u64) -> VtagResult<ProductRecord> {
        self.fetch_json(&format!("/v1/product/{batch_id}")).await
    }

    /// Current consumed state of a commitment.
    pub async fn serial_status(&self, commitment: &SerialCommitment) -> VtagResult<SerialStatus> {
        self.fetch_json(&format!("/v1/serial/{}", commitment.to_hex()))
            .await
    }

    /// Registry-wide counters as observed by the indexer.
    pub async fn stats(&self) -> VtagResult<RegistryStats> {
        self.fetch_json("/v1/stats").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(contract_id: &str) -> VtagClient {
        VtagClient::new("http://localhost:3000", contract_id, "S_SECRET", "testnet").unwrap()
    }

    #[test]
    fn from_profile_accepts_placeholder() {
        let profile = ProfileData::placeholder();
        assert!(VtagClient::from_profile(&profile).is_ok());
    }

    #[test]
    fn require_registry_rejects_placeholder() {
        let client = test_client(PLACEHOLDER);
        assert!(client.require_registry_contract().is_err());
    }

    #[test]
    fn require_registry_accepts_real_id() {
        let client = test_client("C_REGISTRY_REAL");
        assert!(client.require_registry_contract().is_ok());
    }

    #[test]
    fn register_batch_validates_before_invoking() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let client = test_client("C_REGISTRY_REAL");
            let serial = vec!["SN1".to_string()];

            let err = client.register_batch(0, "x", "y", &serial).await;
            assert!(matches!(err, Err(VtagError::InvalidInput(_))));

            let err = client.register_batch(1, "", "y", &serial).await;
            assert!(matches!(err, Err(VtagError::InvalidInput(_))));

            let err = client.register_batch(1, "x", "", &serial).await;
            assert!(matches!(err, Err(VtagError::InvalidInput(_))));

            let err = client.register_batch(1, "x", "y", &[]).await;
            assert!(matches!(err, Err(VtagError::InvalidInput(_))));
        });
    }

    #[test]
    fn verify_rejects_zero_batch_locally() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let client = test_client("C_REGISTRY_REAL");
            let cm = serial_commitment(1, "SN1");
            let err = client.verify_commitment(0, &cm).await;
            assert!(matches!(err, Err(VtagError::InvalidInput(_))));
        });
    }
}
