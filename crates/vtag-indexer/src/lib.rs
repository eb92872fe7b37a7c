//! Event indexer for the VeriTag registry.
//!
//! Polls registration and verification events from the registry contract
//! over Soroban RPC, persists them to SQLite, and serves the public read
//! API the scanning frontend consumes.

pub mod api;
pub mod db;
pub mod rpc;
