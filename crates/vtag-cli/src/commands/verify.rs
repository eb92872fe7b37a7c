use anyhow::Result;
use colored::Colorize;
use vtag_sdk::client::VtagClient;
use vtag_sdk::profile::load_profile;
use vtag_types::SerialCommitment;

use crate::output;

pub async fn run(batch_id: u64, serial: &str, is_commitment: bool) -> Result<()> {
    let profile = load_profile()?;
    let client = VtagClient::from_profile(&profile)?;

    let pb = output::spinner("verifying...");
    let result = if is_commitment {
        let cm = SerialCommitment::from_hex(serial).map_err(|_| {
            output::fail_with_hint(
                "invalid commitment",
                "expected 64 hex chars (optionally 0x-prefixed)",
            )
        })?;
        client.verify_commitment(batch_id, &cm).await
    } else {
        client.verify_serial(batch_id, serial).await
    };
    pb.finish_and_clear();

    let outcome = result?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "batch_id": outcome.batch_id,
            "commitment": outcome.commitment,
            "authentic": outcome.authentic,
        }));
    } else {
        if outcome.authentic {
            eprintln!("{}", "AUTHENTIC".green().bold());
            output::info("first presentation of this serial — it is now claimed");
        } else {
            eprintln!("{}", "COUNTERFEIT".red().bold());
            output::info("this serial was already claimed, or was never issued for this batch");
        }
        output::label("commitment", &outcome.commitment);
    }
    Ok(())
}
