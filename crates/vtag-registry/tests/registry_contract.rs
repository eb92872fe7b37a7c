// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! Integration tests for the VeriTag registry: authorization, batch
//! registration, one-shot verification, counters.

use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, String, Vec};
use vtag_registry::{RegistryError, VtagRegistry, VtagRegistryClient};
use vtag_types::serial_commitment;

fn setup(env: &Env) -> (VtagRegistryClient<'_>, Address) {
    env.mock_all_auths();
    let admin = Address::generate(env);
    let contract_id = env.register(VtagRegistry, ());
    let client = VtagRegistryClient::new(env, &contract_id);
    client.initialize(&admin);
    (client, admin)
}

/// Real commitment bytes, as the manufacturer's tooling would compute them
fn commitment(env: &Env, batch_id: u64, serial: &str) -> BytesN<32> {
    BytesN::from_array(env, &serial_commitment(batch_id, serial).0)
}

fn sneaker_serials(env: &Env) -> Vec<BytesN<32>> {
    Vec::from_array(env, [commitment(env, 1, "SN123456789")])
}

// ── Access control ──

#[test]
fn admin_is_authorized_after_initialize() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    assert!(client.is_authorized(&admin));
    let stranger = Address::generate(&env);
    assert!(!client.is_authorized(&stranger));
}

#[test]
fn initialize_twice_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    assert_eq!(
        client.try_initialize(&admin),
        Err(Ok(RegistryError::AlreadyInitialized))
    );
}

#[test]
fn admin_grants_and_revokes_authorization() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let mfr = Address::generate(&env);

    assert!(!client.is_authorized(&mfr));
    client.set_manufacturer_authorization(&admin, &mfr, &true);
    assert!(client.is_authorized(&mfr));

    // idempotent re-grant
    client.set_manufacturer_authorization(&admin, &mfr, &true);
    assert!(client.is_authorized(&mfr));

    client.set_manufacturer_authorization(&admin, &mfr, &false);
    assert!(!client.is_authorized(&mfr));
}

#[test]
fn non_admin_cannot_set_authorization() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    let imposter = Address::generate(&env);
    let mfr = Address::generate(&env);

    assert_eq!(
        client.try_set_manufacturer_authorization(&imposter, &mfr, &true),
        Err(Ok(RegistryError::Unauthorized))
    );
    assert!(!client.is_authorized(&mfr));
}

// ── Registration ──

#[test]
fn register_and_get_product() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &sneaker_serials(&env),
    );

    let product = client.get_product(&1);
    assert!(product.exists);
    assert_eq!(product.batch_id, 1);
    assert_eq!(product.name, String::from_str(&env, "Premium Sneakers"));
    assert_eq!(product.brand, String::from_str(&env, "Nike"));
    assert_eq!(product.serial_count, 1);
    assert_eq!(client.total_products(), 1);
}

#[test]
fn unauthorized_register_rejected() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    let stranger = Address::generate(&env);

    assert_eq!(
        client.try_register_product(
            &stranger,
            &1,
            &String::from_str(&env, "Premium Sneakers"),
            &String::from_str(&env, "Nike"),
            &sneaker_serials(&env),
        ),
        Err(Ok(RegistryError::Unauthorized))
    );
    assert!(!client.get_product(&1).exists);
    assert_eq!(client.total_products(), 0);
}

#[test]
fn revoked_manufacturer_cannot_register() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let mfr = Address::generate(&env);

    client.set_manufacturer_authorization(&admin, &mfr, &true);
    client.register_product(
        &mfr,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &sneaker_serials(&env),
    );

    client.set_manufacturer_authorization(&admin, &mfr, &false);
    assert_eq!(
        client.try_register_product(
            &mfr,
            &2,
            &String::from_str(&env, "Premium Sneakers"),
            &String::from_str(&env, "Nike"),
            &Vec::from_array(&env, [commitment(&env, 2, "SN123456789")]),
        ),
        Err(Ok(RegistryError::Unauthorized))
    );
    assert_eq!(client.total_products(), 1);
}

#[test]
fn register_validates_inputs() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let name = String::from_str(&env, "x");
    let brand = String::from_str(&env, "y");
    let serials = sneaker_serials(&env);
    let empty = String::from_str(&env, "");

    assert_eq!(
        client.try_register_product(&admin, &0, &name, &brand, &serials),
        Err(Ok(RegistryError::InvalidInput))
    );
    assert_eq!(
        client.try_register_product(&admin, &1, &empty, &brand, &serials),
        Err(Ok(RegistryError::InvalidInput))
    );
    assert_eq!(
        client.try_register_product(&admin, &1, &name, &empty, &serials),
        Err(Ok(RegistryError::InvalidInput))
    );
    assert_eq!(
        client.try_register_product(&admin, &1, &name, &brand, &Vec::new(&env)),
        Err(Ok(RegistryError::InvalidInput))
    );
    assert_eq!(client.total_products(), 0);
}

#[test]
fn duplicate_batch_rejected() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &sneaker_serials(&env),
    );
    // same id, different arguments — still a conflict
    assert_eq!(
        client.try_register_product(
            &admin,
            &1,
            &String::from_str(&env, "Other Product"),
            &String::from_str(&env, "Adidas"),
            &Vec::from_array(&env, [commitment(&env, 1, "OTHER-1")]),
        ),
        Err(Ok(RegistryError::Conflict))
    );
    assert_eq!(client.total_products(), 1);
}

#[test]
fn get_product_missing_returns_empty() {
    let env = Env::default();
    let (client, _admin) = setup(&env);

    let product = client.get_product(&999);
    assert!(!product.exists);
    assert_eq!(product.name, String::from_str(&env, ""));
    assert_eq!(product.brand, String::from_str(&env, ""));
    assert_eq!(product.serial_count, 0);
    assert_eq!(product.registered_at, 0);
}

// ── Verification ──

#[test]
fn first_verify_authentic_then_counterfeit() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let scanner = Address::generate(&env);
    let cm = commitment(&env, 1, "SN123456789");

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &sneaker_serials(&env),
    );

    assert!(!client.is_serial_verified(&cm));
    assert!(client.verify(&scanner, &cm, &1));
    assert!(client.is_serial_verified(&cm));
    assert_eq!(client.total_verifications(), 1);

    // replay — same caller or any other
    assert!(!client.verify(&scanner, &cm, &1));
    let other = Address::generate(&env);
    assert!(!client.verify(&other, &cm, &1));
    assert_eq!(client.total_verifications(), 1);
    assert!(client.is_serial_verified(&cm));
}

#[test]
fn verify_unknown_batch_fails() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    let scanner = Address::generate(&env);
    let cm = commitment(&env, 1, "SN123456789");

    assert_eq!(
        client.try_verify(&scanner, &cm, &999),
        Err(Ok(RegistryError::NotFound))
    );
    assert_eq!(
        client.try_verify(&scanner, &cm, &0),
        Err(Ok(RegistryError::InvalidInput))
    );
    assert_eq!(client.total_verifications(), 0);
    assert!(!client.is_serial_verified(&cm));
}

#[test]
fn verify_non_member_is_counterfeit_not_error() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let scanner = Address::generate(&env);

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &sneaker_serials(&env),
    );

    let unknown = commitment(&env, 1, "NEVER-ISSUED");
    assert!(!client.verify(&scanner, &unknown, &1));
    assert_eq!(client.total_verifications(), 0);
    assert!(!client.is_serial_verified(&unknown));

    // the real serial is unaffected by the failed probe
    let cm = commitment(&env, 1, "SN123456789");
    assert!(client.verify(&scanner, &cm, &1));
}

#[test]
fn membership_is_per_batch() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let scanner = Address::generate(&env);
    let cm1 = commitment(&env, 1, "SN123456789");
    let cm2 = commitment(&env, 2, "SN999");

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &Vec::from_array(&env, [cm1.clone()]),
    );
    client.register_product(
        &admin,
        &2,
        &String::from_str(&env, "Hoodie"),
        &String::from_str(&env, "Nike"),
        &Vec::from_array(&env, [cm2.clone()]),
    );

    // batch 1's commitment presented against batch 2: counterfeit, no state
    assert!(!client.verify(&scanner, &cm1, &2));
    assert_eq!(client.total_verifications(), 0);
    assert!(!client.is_serial_verified(&cm1));

    assert!(client.verify(&scanner, &cm1, &1));
    assert!(client.verify(&scanner, &cm2, &2));
    assert_eq!(client.total_verifications(), 2);
}

#[test]
fn consumed_flag_is_global_across_batches() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let scanner = Address::generate(&env);
    let shared = commitment(&env, 1, "SN123456789");

    client.register_product(
        &admin,
        &1,
        &String::from_str(&env, "Premium Sneakers"),
        &String::from_str(&env, "Nike"),
        &Vec::from_array(&env, [shared.clone()]),
    );
    // a second batch that (pathologically) lists the same commitment
    client.register_product(
        &admin,
        &2,
        &String::from_str(&env, "Hoodie"),
        &String::from_str(&env, "Nike"),
        &Vec::from_array(&env, [shared.clone()]),
    );

    assert!(client.verify(&scanner, &shared, &1));
    // consumed everywhere — at most one authentic verification per commitment
    assert!(!client.verify(&scanner, &shared, &2));
    assert_eq!(client.total_verifications(), 1);
}

#[test]
fn hundred_serials_each_verify_once() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let scanner = Address::generate(&env);

    let mut serials = Vec::new(&env);
    for i in 0..100u32 {
        // distinct plaintext serials SN-0 .. SN-99
        let serial = format!("SN-{i}");
        serials.push_back(commitment(&env, 7, &serial));
    }

    client.register_product(
        &admin,
        &7,
        &String::from_str(&env, "Limited Run"),
        &String::from_str(&env, "Acme"),
        &serials,
    );
    assert_eq!(client.total_products(), 1);
    assert_eq!(client.get_product(&7).serial_count, 100);

    for serial in serials.iter() {
        assert!(client.verify(&scanner, &serial, &7));
        assert!(!client.verify(&scanner, &serial, &7));
    }
    assert_eq!(client.total_verifications(), 100);
}
