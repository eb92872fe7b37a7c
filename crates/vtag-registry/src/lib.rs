// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! vtag-registry: batch registration and one-shot serial verification on Soroban

#![no_std]

mod contract;
mod types;

pub use contract::*;
pub use types::*;
