use anyhow::Result;
use vtag_sdk::profile::{load_profile, save_profile};

use crate::output;

const ALLOWED_KEYS: &[&str] = &[
    "stellar_secret",
    "network",
    "rpc_url",
    "indexer_url",
    "registry_contract_id",
];

pub fn set(key: &str, value: &str) -> Result<()> {
    if !ALLOWED_KEYS.contains(&key) {
        return Err(output::fail_with_hint(
            &format!("unknown config key: {key}"),
            &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
        ));
    }

    let mut profile = load_profile()?;
    match key {
        "stellar_secret" => profile.stellar_secret = value.to_string(),
        "network" => profile.network = value.to_string(),
        "rpc_url" => profile.rpc_url = value.to_string(),
        "indexer_url" => profile.indexer_url = value.to_string(),
        "registry_contract_id" => profile.registry_contract_id = value.to_string(),
        _ => unreachable!(),
    }
    save_profile(&profile)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "key": key, "value": value }));
    } else {
        output::success(&format!("{key} updated"));
    }
    Ok(())
}

fn mask(s: &str) -> String {
    if s.len() <= 8 || s == "PLACEHOLDER" {
        return s.to_string();
    }
    format!("{}***{}", &s[..4], &s[s.len() - 4..])
}

pub fn show() -> Result<()> {
    let profile = load_profile()?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "stellar_secret": mask(&profile.stellar_secret),
            "network": profile.network,
            "rpc_url": profile.rpc_url,
            "indexer_url": profile.indexer_url,
            "registry_contract_id": profile.registry_contract_id,
        }));
    } else {
        output::label("stellar_secret", &mask(&profile.stellar_secret));
        output::label("network", &profile.network);
        output::label("rpc_url", &profile.rpc_url);
        output::label("indexer_url", &profile.indexer_url);
        output::label("registry_contract_id", &profile.registry_contract_id);
    }
    Ok(())
}
