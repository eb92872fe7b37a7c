use anyhow::Result;
use vtag_sdk::profile::{profile_path, save_profile, ProfileData};

use crate::output;

pub fn run() -> Result<()> {
    let path = profile_path()?;
    if path.exists() {
        anyhow::bail!(
            "profile already exists at {}\ndelete it first to recreate",
            path.display()
        );
    }

    let profile = ProfileData::placeholder();
    save_profile(&profile)?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "profile_path": path.display().to_string(),
            "network": profile.network,
        }));
    } else {
        output::success(&format!("profile created at {}", path.display()));
        output::warn("run `vtag config set stellar_secret <SECRET>` to configure");
        output::warn("run `vtag config set registry_contract_id <C_...>` to configure");
    }
    Ok(())
}
