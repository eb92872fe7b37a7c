// Copyright 2026 VeriTag contributors
// Licensed under the Apache License, Version 2.0

//! Typed errors for [`VtagClient`](crate::client::VtagClient) operations.

#[derive(Debug, thiserror::Error)]
pub enum VtagError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("indexer: {0}")]
    Indexer(String),

    #[error("soroban: {0}")]
    Soroban(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type VtagResult<T> = Result<T, VtagError>;
