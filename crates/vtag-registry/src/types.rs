// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! Contract types and error taxonomy for the VeriTag registry

use soroban_sdk::{contracterror, contracttype, String};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    /// Caller lacks the required privilege.
    Unauthorized = 1,
    /// Malformed or out-of-range argument.
    InvalidInput = 2,
    /// A batch with this id already exists.
    Conflict = 3,
    /// Referenced batch does not exist.
    NotFound = 4,
    AlreadyInitialized = 5,
    NotInitialized = 6,
}

/// Stored record of one registered production run. Written exactly once;
/// the serial commitment set lives under per-commitment storage keys.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Batch {
    pub name: String,
    pub brand: String,
    pub serial_count: u32,
    pub registered_at: u64,
}

/// Read view returned by `get_product`. `exists = false` with default
/// fields distinguishes "never registered" from a stored batch.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProductInfo {
    pub batch_id: u64,
    pub name: String,
    pub brand: String,
    pub serial_count: u32,
    pub registered_at: u64,
    pub exists: bool,
}
