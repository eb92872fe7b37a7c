use anyhow::Result;
use vtag_sdk::client::VtagClient;
use vtag_sdk::profile::load_profile;

use crate::output;

pub async fn run(manufacturer: &str, authorized: bool) -> Result<()> {
    let profile = load_profile()?;
    let client = VtagClient::from_profile(&profile)?;

    let action = if authorized { "granting" } else { "revoking" };
    let pb = output::spinner(&format!("{action} authorization for {manufacturer}..."));
    let result = client.authorize_manufacturer(manufacturer, authorized).await;
    pb.finish_and_clear();

    let tx_result = result?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "manufacturer": manufacturer,
            "authorized": authorized,
            "tx_result": tx_result,
        }));
    } else {
        let verb = if authorized { "authorized" } else { "revoked" };
        output::success(&format!("manufacturer {verb}"));
        output::label("manufacturer", manufacturer);
    }
    Ok(())
}
