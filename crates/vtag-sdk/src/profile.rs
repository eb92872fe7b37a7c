// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! Registrar profile persistence.
//!
//! Stores the Stellar signing secret, network selection, and service
//! endpoints as JSON at `~/.vtag/profile.json`. Fields that have not been
//! configured yet hold the literal `"PLACEHOLDER"`; the client refuses to
//! submit transactions while the contract id is a placeholder.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const PLACEHOLDER: &str = "PLACEHOLDER";

#[derive(Serialize, Deserialize, Clone)]
pub struct ProfileData {
    pub stellar_secret: String,
    pub network: String,
    pub rpc_url: String,
    pub indexer_url: String,
    pub registry_contract_id: String,
}

impl ProfileData {
    /// Fresh profile with testnet defaults and unconfigured secrets.
    pub fn placeholder() -> Self {
        Self {
            stellar_secret: PLACEHOLDER.into(),
            network: "testnet".into(),
            rpc_url: "https://soroban-testnet.stellar.org:443".into(),
            indexer_url: "http://localhost:3000".into(),
            registry_contract_id: PLACEHOLDER.into(),
        }
    }
}

pub fn profile_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".vtag").join("profile.json"))
}

pub fn load_profile() -> Result<ProfileData> {
    let path = profile_path()?;
    let data = fs::read_to_string(&path)
        .with_context(|| format!("cannot read profile at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid profile JSON")
}

pub fn save_profile(profile: &ProfileData) -> Result<()> {
    let path = profile_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(&path, json)?;
    Ok(())
}
