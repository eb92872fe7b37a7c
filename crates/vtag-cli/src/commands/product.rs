use anyhow::Result;
use vtag_sdk::client::VtagClient;
use vtag_sdk::profile::load_profile;

use crate::output;

pub async fn run(batch_id: u64) -> Result<()> {
    let profile = load_profile()?;
    let client = VtagClient::from_profile(&profile)?;

    let product = client.product(batch_id).await?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "batch_id": product.batch_id,
            "name": product.name,
            "brand": product.brand,
            "serial_count": product.serial_count,
            "registered_ledger": product.registered_ledger,
            "exists": product.exists,
        }));
    } else if product.exists {
        output::label("batch", &product.batch_id.to_string());
        output::label("name", &product.name);
        output::label("brand", &product.brand);
        output::label("serials", &product.serial_count.to_string());
        output::label("registered at ledger", &product.registered_ledger.to_string());
    } else {
        output::warn(&format!("batch {batch_id} is not registered"));
    }
    Ok(())
}
