use std::path::PathBuf;

use anyhow::Result;
use vtag_sdk::client::VtagClient;
use vtag_sdk::profile::load_profile;

use crate::output;

pub async fn run(
    batch_id: u64,
    name: &str,
    brand: &str,
    serials: Option<String>,
    serials_file: Option<PathBuf>,
) -> Result<()> {
    let serials = read_serials(serials, serials_file)?;

    let profile = load_profile()?;
    let client = VtagClient::from_profile(&profile)?;

    let pb = output::spinner(&format!(
        "registering batch {batch_id} with {} serials...",
        serials.len()
    ));
    let result = client.register_batch(batch_id, name, brand, &serials).await;
    pb.finish_and_clear();

    let result = result?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "batch_id": result.batch_id,
            "name": name,
            "brand": brand,
            "serial_count": result.serial_count,
            "commitments": result.commitments,
            "tx_result": result.tx_result,
        }));
    } else {
        output::success(&format!("batch {batch_id} registered"));
        output::label("name", name);
        output::label("brand", brand);
        output::label("serials", &result.serial_count.to_string());
        output::info("commitments (print these as codes on the units):");
        for cm in &result.commitments {
            output::info(&format!("  {cm}"));
        }
    }
    Ok(())
}

fn read_serials(inline: Option<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    let raw = match (inline, file) {
        (Some(list), None) => list.split(',').map(str::to_string).collect::<Vec<_>>(),
        (None, Some(path)) => std::fs::read_to_string(&path)?
            .lines()
            .map(str::to_string)
            .collect(),
        _ => {
            return Err(output::fail_with_hint(
                "no serials given",
                "pass --serials SN1,SN2 or --serials-file serials.txt",
            ))
        }
    };

    let serials: Vec<String> = raw
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if serials.is_empty() {
        return Err(output::fail_with_hint(
            "no serials given",
            "the serial list is empty after trimming blank entries",
        ));
    }
    Ok(serials)
}
