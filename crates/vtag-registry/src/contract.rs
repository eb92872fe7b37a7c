// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! VeriTag registry — manufacturer authorization, batch registration, and
//! the one-shot verification state machine.
//!
//! Every invocation is a single atomic transaction, so concurrent `verify`
//! calls racing on the same commitment serialize at the host: exactly one
//! observes the commitment unconsumed.

use crate::types::{Batch, ProductInfo, RegistryError};
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String, Vec};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Manufacturer(Address),
    Batch(u64),
    BatchSerial(u64, BytesN<32>),
    Consumed(BytesN<32>),
    TotalProducts,
    TotalVerifications,
}

const PERSISTENT_TTL: u32 = 535_680; // ~30 days
const PERSISTENT_THRESHOLD: u32 = 267_840; // ~15 days

#[contract]
pub struct VtagRegistry;

#[contractimpl]
impl VtagRegistry {
    /// Initialize with admin address. The admin starts out authorized as a
    /// manufacturer.
    pub fn initialize(env: Env, admin: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(RegistryError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);

        let mfr_key = DataKey::Manufacturer(admin);
        env.storage().persistent().set(&mfr_key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&mfr_key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);
        env.storage()
            .instance()
            .extend_ttl(PERSISTENT_THRESHOLD, PERSISTENT_TTL);
        Ok(())
    }

    /// Grant or revoke a manufacturer's registration privilege. Admin only.
    /// Re-setting an already-set value succeeds and re-publishes the event.
    pub fn set_manufacturer_authorization(
        env: Env,
        caller: Address,
        manufacturer: Address,
        authorized: bool,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(RegistryError::NotInitialized)?;
        if caller != admin {
            return Err(RegistryError::Unauthorized);
        }

        let key = DataKey::Manufacturer(manufacturer.clone());
        env.storage().persistent().set(&key, &authorized);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);
        env.storage()
            .instance()
            .extend_ttl(PERSISTENT_THRESHOLD, PERSISTENT_TTL);

        env.events()
            .publish(("mfr_auth",), (manufacturer, authorized));
        Ok(())
    }

    /// Check whether an identity may register batches
    pub fn is_authorized(env: Env, identity: Address) -> bool {
        Self::manufacturer_authorized(&env, &identity)
    }

    /// Register a production batch with its set of serial commitments.
    ///
    /// Validation fully precedes mutation; a failed call commits nothing.
    pub fn register_product(
        env: Env,
        caller: Address,
        batch_id: u64,
        name: String,
        brand: String,
        serials: Vec<BytesN<32>>,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        if !Self::manufacturer_authorized(&env, &caller) {
            return Err(RegistryError::Unauthorized);
        }
        if batch_id == 0 {
            return Err(RegistryError::InvalidInput);
        }
        if name.len() == 0 {
            return Err(RegistryError::InvalidInput);
        }
        if brand.len() == 0 {
            return Err(RegistryError::InvalidInput);
        }
        if serials.len() == 0 {
            return Err(RegistryError::InvalidInput);
        }
        let batch_key = DataKey::Batch(batch_id);
        if env.storage().persistent().has(&batch_key) {
            return Err(RegistryError::Conflict);
        }

        let batch = Batch {
            name: name.clone(),
            brand: brand.clone(),
            serial_count: serials.len(),
            registered_at: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&batch_key, &batch);
        env.storage()
            .persistent()
            .extend_ttl(&batch_key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);

        for serial in serials.iter() {
            let key = DataKey::BatchSerial(batch_id, serial);
            env.storage().persistent().set(&key, &true);
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);
        }

        Self::bump_counter(&env, DataKey::TotalProducts);

        env.events()
            .publish(("product",), (batch_id, name, brand, batch.serial_count));
        Ok(())
    }

    /// Verify a serial commitment against a batch.
    ///
    /// Returns `Ok(true)` exactly once per commitment — the first
    /// presentation of a member commitment consumes it. Non-member and
    /// already-consumed commitments both yield `Ok(false)` with no state
    /// change; callers cannot tell the two apart.
    pub fn verify(
        env: Env,
        caller: Address,
        serial: BytesN<32>,
        batch_id: u64,
    ) -> Result<bool, RegistryError> {
        caller.require_auth();
        if batch_id == 0 {
            return Err(RegistryError::InvalidInput);
        }
        if !env.storage().persistent().has(&DataKey::Batch(batch_id)) {
            return Err(RegistryError::NotFound);
        }

        let member = env
            .storage()
            .persistent()
            .has(&DataKey::BatchSerial(batch_id, serial.clone()));
        let consumed_key = DataKey::Consumed(serial.clone());
        if !member || env.storage().persistent().has(&consumed_key) {
            env.events()
                .publish(("verified",), (serial, batch_id, false, caller));
            return Ok(false);
        }

        env.storage().persistent().set(&consumed_key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&consumed_key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);

        Self::bump_counter(&env, DataKey::TotalVerifications);

        env.events()
            .publish(("verified",), (serial, batch_id, true, caller));
        Ok(true)
    }

    /// Get the stored batch record, or an `exists = false` default
    pub fn get_product(env: Env, batch_id: u64) -> ProductInfo {
        match env
            .storage()
            .persistent()
            .get::<_, Batch>(&DataKey::Batch(batch_id))
        {
            Some(batch) => ProductInfo {
                batch_id,
                name: batch.name,
                brand: batch.brand,
                serial_count: batch.serial_count,
                registered_at: batch.registered_at,
                exists: true,
            },
            None => ProductInfo {
                batch_id,
                name: String::from_str(&env, ""),
                brand: String::from_str(&env, ""),
                serial_count: 0,
                registered_at: 0,
                exists: false,
            },
        }
    }

    /// Check whether a commitment has been consumed by a prior authentic
    /// verification
    pub fn is_serial_verified(env: Env, serial: BytesN<32>) -> bool {
        env.storage().persistent().has(&DataKey::Consumed(serial))
    }

    /// Count of successful registrations
    pub fn total_products(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalProducts)
            .unwrap_or(0)
    }

    /// Count of verifications that returned authentic
    pub fn total_verifications(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalVerifications)
            .unwrap_or(0)
    }

    fn manufacturer_authorized(env: &Env, identity: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Manufacturer(identity.clone()))
            .unwrap_or(false)
    }

    fn bump_counter(env: &Env, key: DataKey) {
        let total: u64 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(total + 1));
        env.storage()
            .instance()
            .extend_ttl(PERSISTENT_THRESHOLD, PERSISTENT_TTL);
    }
}
