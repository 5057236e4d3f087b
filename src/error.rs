//! Error types for key discovery, wallet validation and reference parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or interpret an on-disk key file.
#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load address from {path}")]
    MissingAddress { path: PathBuf },
    #[error("wrong (not hex) address {address:?} in {path}")]
    InvalidAddress { path: PathBuf, address: String },
}

/// Reason a single wallet entry failed validation.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("address {0:?} is not valid (must be hex string starting from 0x)")]
    InvalidAddress(String),
    #[error("failed to unpack private key from hex: {0}")]
    InvalidPrivateKey(String),
    #[error("address loaded from {source_kind} ({derived}) differs from specified address {declared}")]
    AddressMismatch {
        source_kind: &'static str,
        declared: String,
        derived: String,
    },
    #[error("no password is provided for the account keyfile")]
    MissingPassword,
    #[error("keyfile {0} is not found or cannot be read")]
    KeyFileNotFound(PathBuf),
    #[error("keyfile has wrong format: {0}")]
    KeyFileFormat(#[source] KeyFileError),
    #[error("failed to search keyfile in keystore {dir}: {source}")]
    KeyStoreScan {
        dir: PathBuf,
        #[source]
        source: KeyFileError,
    },
    #[error("failed to locate private key for {address} in keystore {dir}")]
    KeyNotLocated { address: String, dir: PathBuf },
    #[error("unable to load private key from keyfile {0}")]
    Decrypt(PathBuf),
}

/// Reason a reference token could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("{0:?} is not a reference (expected @wallet, @wallet.field, @@ or $N)")]
    NotAReference(String),
    #[error("reference must have two parts: walletName.fieldName (got {0:?})")]
    Malformed(String),
    #[error("value reference targets unknown wallet: {0}")]
    UnknownWallet(String),
    #[error("value reference targets unknown wallet field: {wallet}.{field}")]
    UnknownField { wallet: String, field: String },
    #[error("call result reference {0:?} must be $ followed by a call index")]
    InvalidResultIndex(String),
}
