use base64::{engine::general_purpose::STANDARD as B64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{Limits, ReadXdr, ScVal, WriteXdr};

/// Decoded `("product",)` event: one batch registration.
#[derive(Debug)]
pub struct ProductEvent {
    pub batch_id: u64,
    pub name: String,
    pub brand: String,
    pub serial_count: u32,
    pub ledger: u64,
}

/// Decoded `("verified",)` event: one verification attempt, authentic or
/// not. `caller` is the base64 XDR encoding of the caller address.
#[derive(Debug)]
pub struct VerifiedEvent {
    pub serial: [u8; 32],
    pub batch_id: u64,
    pub authentic: bool,
    pub caller: String,
    pub ledger: u64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GetEventsResult {
    events: Vec<RpcEvent>,
    #[serde(rename = "latestLedger")]
    latest_ledger: String,
}

#[derive(Deserialize)]
struct RpcEvent {
    #[serde(rename = "ledger")]
    ledger: String,
    value: String,
    #[serde(rename = "pagingToken")]
    paging_token: Option<String>,
}

#[derive(Deserialize)]
struct GetLatestLedgerResult {
    sequence: u64,
}

pub struct PollResult<T> {
    pub events: Vec<T>,
    pub latest_ledger: u64,
    pub cursor: Option<String>,
}

pub async fn get_latest_ledger(client: &Client, rpc_url: &str) -> anyhow::Result<u64> {
    let req = JsonRpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getLatestLedger",
        params: serde_json::json!({}),
    };
    let resp: JsonRpcResponse<GetLatestLedgerResult> =
        client.post(rpc_url).json(&req).send().await?.json().await?;
    match resp.result {
        Some(r) => Ok(r.sequence),
        None => Err(anyhow::anyhow!("getLatestLedger error: {:?}", resp.error)),
    }
}

fn build_topic_filter(contract_id: &str, topic: &str) -> serde_json::Value {
    // Encode Symbol(topic) as XDR -> base64
    let topic_xdr = ScVal::Symbol(stellar_xdr::curr::ScSymbol(topic.try_into().unwrap()));
    let buf = topic_xdr.to_xdr(Limits::none()).unwrap();
    let topic_b64 = B64.encode(&buf);

    serde_json::json!([{
        "type": "contract",
        "contractIds": [contract_id],
        "topics": [[topic_b64]]
    }])
}

async fn poll_raw(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    topic: &str,
    start_ledger: u64,
    cursor: Option<&str>,
) -> anyhow::Result<(Vec<RpcEvent>, u64, Option<String>)> {
    let filters = build_topic_filter(contract_id, topic);

    let mut params = serde_json::json!({
        "filters": filters,
        "pagination": { "limit": 100 }
    });

    if let Some(c) = cursor {
        params["pagination"]["cursor"] = serde_json::json!(c);
    } else {
        params["startLedger"] = serde_json::json!(start_ledger);
    }

    let req = JsonRpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getEvents",
        params,
    };

    let resp: JsonRpcResponse<GetEventsResult> =
        client.post(rpc_url).json(&req).send().await?.json().await?;

    let result = match resp.result {
        Some(r) => r,
        None => return Err(anyhow::anyhow!("getEvents error: {:?}", resp.error)),
    };

    let latest_ledger = result.latest_ledger.parse::<u64>()?;
    let mut last_cursor = None;
    for ev in &result.events {
        last_cursor = ev.paging_token.clone();
    }

    Ok((result.events, latest_ledger, last_cursor))
}

pub async fn poll_product_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u64,
    cursor: Option<&str>,
) -> anyhow::Result<PollResult<ProductEvent>> {
    let (raw, latest_ledger, cursor) =
        poll_raw(client, rpc_url, contract_id, "product", start_ledger, cursor).await?;

    let mut events = Vec::new();
    for ev in &raw {
        let ledger = ev.ledger.parse::<u64>()?;
        match parse_product_value(&ev.value, ledger) {
            Ok(pe) => events.push(pe),
            Err(e) => eprintln!("skip product event parse: {e}"),
        }
    }

    Ok(PollResult {
        events,
        latest_ledger,
        cursor,
    })
}

pub async fn poll_verified_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u64,
    cursor: Option<&str>,
) -> anyhow::Result<PollResult<VerifiedEvent>> {
    let (raw, latest_ledger, cursor) =
        poll_raw(client, rpc_url, contract_id, "verified", start_ledger, cursor).await?;

    let mut events = Vec::new();
    for ev in &raw {
        let ledger = ev.ledger.parse::<u64>()?;
        match parse_verified_value(&ev.value, ledger) {
            Ok(ve) => events.push(ve),
            Err(e) => eprintln!("skip verified event parse: {e}"),
        }
    }

    Ok(PollResult {
        events,
        latest_ledger,
        cursor,
    })
}

fn parse_product_value(value_b64: &str, ledger: u64) -> anyhow::Result<ProductEvent> {
    let xdr_bytes = B64.decode(value_b64)?;
    let sc_val = ScVal::from_xdr(&xdr_bytes, Limits::none())?;

    match sc_val {
        ScVal::Vec(Some(vec)) if vec.len() == 4 => Ok(ProductEvent {
            batch_id: extract_u64(&vec[0], "batch_id")?,
            name: extract_string(&vec[1], "name")?,
            brand: extract_string(&vec[2], "brand")?,
            serial_count: extract_u32(&vec[3], "serial_count")?,
            ledger,
        }),
        _ => Err(anyhow::anyhow!("unexpected event value shape: {sc_val:?}")),
    }
}

fn parse_verified_value(value_b64: &str, ledger: u64) -> anyhow::Result<VerifiedEvent> {
    let xdr_bytes = B64.decode(value_b64)?;
    let sc_val = ScVal::from_xdr(&xdr_bytes, Limits::none())?;

    match sc_val {
        ScVal::Vec(Some(vec)) if vec.len() == 4 => Ok(VerifiedEvent {
            serial: extract_bytes32(&vec[0], "serial")?,
            batch_id: extract_u64(&vec[1], "batch_id")?,
            authentic: extract_bool(&vec[2], "authentic")?,
            caller: extract_address_b64(&vec[3], "caller")?,
            ledger,
        }),
        _ => Err(anyhow::anyhow!("unexpected event value shape: {sc_val:?}")),
    }
}

fn extract_bytes32(val: &ScVal, name: &str) -> anyhow::Result<[u8; 32]> {
    match val {
        ScVal::Bytes(b) => {
            let slice: &[u8] = b.as_ref();
            slice
                .try_into()
                .map_err(|_| anyhow::anyhow!("{name}: expected 32 bytes, got {}", slice.len()))
        }
        _ => Err(anyhow::anyhow!("{name}: expected Bytes, got {val:?}")),
    }
}

fn extract_u64(val: &ScVal, name: &str) -> anyhow::Result<u64> {
    match val {
        ScVal::U64(n) => Ok(*n),
        _ => Err(anyhow::anyhow!("{name}: expected U64, got {val:?}")),
    }
}

fn extract_u32(val: &ScVal, name: &str) -> anyhow::Result<u32> {
    match val {
        ScVal::U32(n) => Ok(*n),
        _ => Err(anyhow::anyhow!("{name}: expected U32, got {val:?}")),
    }
}

fn extract_bool(val: &ScVal, name: &str) -> anyhow::Result<bool> {
    match val {
        ScVal::Bool(b) => Ok(*b),
        _ => Err(anyhow::anyhow!("{name}: expected Bool, got {val:?}")),
    }
}

fn extract_string(val: &ScVal, name: &str) -> anyhow::Result<String> {
    match val {
        ScVal::String(s) => Ok(s.0.to_utf8_string_lossy()),
        _ => Err(anyhow::anyhow!("{name}: expected String, got {val:?}")),
    }
}

// Addresses are kept as base64 XDR; the API exposes them verbatim.
fn extract_address_b64(val: &ScVal, name: &str) -> anyhow::Result<String> {
    match val {
        ScVal::Address(_) => {
            let xdr = val.to_xdr(Limits::none())?;
            Ok(B64.encode(xdr))
        }
        _ => Err(anyhow::anyhow!("{name}: expected Address, got {val:?}")),
    }
}
