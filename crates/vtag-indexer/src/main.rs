use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use vtag_indexer::api::{self, AppState, SharedState};
use vtag_indexer::db::{Db, ProductRow, VerificationRow};
use vtag_indexer::rpc;

// ── Config ───────────────────────────────────────────────────────────
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const PRODUCT_TOPIC: &str = "product";
const VERIFIED_TOPIC: &str = "verified";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

#[tokio::main]
async fn main() {
    let rpc_url = env_or("VTAG_RPC_URL", "https://soroban-testnet.stellar.org:443");
    let contract_id = env_or("VTAG_CONTRACT_ID", "PLACEHOLDER_CONTRACT_ID");
    let db_path = env_or("VTAG_DB_PATH", "vtag-indexer.db");
    let listen_addr = env_or("VTAG_LISTEN_ADDR", "0.0.0.0:3000");

    eprintln!("vtag-indexer starting...");
    eprintln!("  contract: {contract_id}");
    eprintln!("  rpc:      {rpc_url}");

    let db = Db::open(std::path::Path::new(&db_path)).expect("failed to open db");

    let product_cursor = db.load_cursor(PRODUCT_TOPIC).expect("failed to load cursor");
    let verified_cursor = db
        .load_cursor(VERIFIED_TOPIC)
        .expect("failed to load cursor");

    let state: SharedState = Arc::new(RwLock::new(AppState { db }));

    let poller_state = state.clone();
    let poller_rpc = rpc_url.clone();
    let poller_contract = contract_id.clone();
    tokio::spawn(async move {
        poller_loop(
            poller_state,
            product_cursor,
            verified_cursor,
            &poller_rpc,
            &poller_contract,
        )
        .await;
    });

    let router = api::router(state);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .expect("failed to bind");
    eprintln!("listening on {listen_addr}");
    axum::serve(listener, router).await.expect("server error");
}

async fn initial_cursor(
    client: &reqwest::Client,
    rpc_url: &str,
    saved: Option<(u64, Option<String>)>,
    topic: &str,
) -> (u64, Option<String>) {
    if let Some((ledger, cursor)) = saved {
        return (ledger, cursor);
    }
    // First run: start from the current ledger tip
    loop {
        match rpc::get_latest_ledger(client, rpc_url).await {
            Ok(seq) => {
                eprintln!("no {topic} cursor, starting from ledger {seq}");
                return (seq, None);
            }
            Err(e) => {
                eprintln!("failed to get latest ledger: {e}, retrying...");
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    }
}

async fn poller_loop(
    state: SharedState,
    product_saved: Option<(u64, Option<String>)>,
    verified_saved: Option<(u64, Option<String>)>,
    rpc_url: &str,
    contract_id: &str,
) {
    let client = reqwest::Client::new();

    let (mut product_ledger, mut product_cursor) =
        initial_cursor(&client, rpc_url, product_saved, PRODUCT_TOPIC).await;
    let (mut verified_ledger, mut verified_cursor) =
        initial_cursor(&client, rpc_url, verified_saved, VERIFIED_TOPIC).await;

    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        match rpc::poll_product_events(
            &client,
            rpc_url,
            contract_id,
            product_ledger,
            product_cursor.as_deref(),
        )
        .await
        {
            Ok(result) => {
                if !result.events.is_empty() {
                    let s = state.read().await;
                    for ev in &result.events {
                        let row = ProductRow {
                            batch_id: ev.batch_id,
                            name: ev.name.clone(),
                            brand: ev.brand.clone(),
                            serial_count: ev.serial_count,
                            ledger: ev.ledger,
                        };
                        if let Err(e) = s.db.insert_product(&row) {
                            eprintln!("db insert product error: {e}");
                        }
                    }
                    eprintln!("indexed {} product registrations", result.events.len());
                }
                product_ledger = result.latest_ledger;
                product_cursor = result.cursor;
                let s = state.read().await;
                if let Err(e) =
                    s.db.save_cursor(PRODUCT_TOPIC, product_ledger, product_cursor.as_deref())
                {
                    eprintln!("save cursor error: {e}");
                }
            }
            Err(e) => eprintln!("product poll error: {e}"),
        }

        match rpc::poll_verified_events(
            &client,
            rpc_url,
            contract_id,
            verified_ledger,
            verified_cursor.as_deref(),
        )
        .await
        {
            Ok(result) => {
                if !result.events.is_empty() {
                    let s = state.read().await;
                    for ev in &result.events {
                        let row = VerificationRow {
                            commitment: ev.serial,
                            batch_id: ev.batch_id,
                            authentic: ev.authentic,
                            caller: ev.caller.clone(),
                            ledger: ev.ledger,
                        };
                        if let Err(e) = s.db.insert_verification(&row) {
                            eprintln!("db insert verification error: {e}");
                        }
                    }
                    eprintln!("indexed {} verification attempts", result.events.len());
                }
                verified_ledger = result.latest_ledger;
                verified_cursor = result.cursor;
                let s = state.read().await;
                if let Err(e) =
                    s.db.save_cursor(VERIFIED_TOPIC, verified_ledger, verified_cursor.as_deref())
                {
                    eprintln!("save cursor error: {e}");
                }
            }
            Err(e) => eprintln!("verified poll error: {e}"),
        }
    }
}
