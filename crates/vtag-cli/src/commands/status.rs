use anyhow::Result;
use colored::Colorize;
use vtag_sdk::profile::{load_profile, profile_path, PLACEHOLDER};

use crate::output;

pub async fn run() -> Result<()> {
    let path = profile_path()?;
    if !path.exists() {
        if output::is_json() {
            output::json_output(serde_json::json!({
                "profile_loaded": false,
                "contract_configured": false,
                "indexer_reachable": false,
            }));
        } else {
            output::label("profile", &"not found".red().to_string());
            output::info("run `vtag init` to create a profile");
        }
        return Ok(());
    }

    let profile = load_profile()?;

    let contract_configured =
        profile.stellar_secret != PLACEHOLDER && profile.registry_contract_id != PLACEHOLDER;

    // ping indexer
    let http = reqwest::Client::new();
    let indexer_reachable = http
        .get(format!("{}/v1/health", profile.indexer_url))
        .timeout(std::time::Duration::from_secs(3))
        .send()
        .await
        .map(|r| r.status().is_success())
        .unwrap_or(false);

    let stats: Option<serde_json::Value> = if indexer_reachable {
        match http
            .get(format!("{}/v1/stats", profile.indexer_url))
            .timeout(std::time::Duration::from_secs(3))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => resp.json().await.ok(),
            _ => None,
        }
    } else {
        None
    };

    if output::is_json() {
        output::json_output(serde_json::json!({
            "profile_loaded": true,
            "contract_configured": contract_configured,
            "indexer_reachable": indexer_reachable,
            "stats": stats,
        }));
    } else {
        output::label("profile", &"loaded".green().to_string());
        let contracts_str = if contract_configured {
            "configured".green().to_string()
        } else {
            "missing PLACEHOLDERs".yellow().to_string()
        };
        output::label("contract", &contracts_str);
        let indexer_str = if indexer_reachable {
            format!("{} ({})", "reachable".green(), profile.indexer_url)
        } else {
            format!("{} ({})", "unreachable".red(), profile.indexer_url)
        };
        output::label("indexer", &indexer_str);
        if let Some(stats) = stats {
            output::label(
                "registered batches",
                &stats["total_products"].to_string(),
            );
            output::label(
                "authentic verifications",
                &stats["total_verifications"].to_string(),
            );
        }
    }

    Ok(())
}
