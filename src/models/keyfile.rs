use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::KeyFileError;

/// Header of an encrypted (web3 secret storage) key file.
///
/// Only the fields needed to route a file to an account are read here; the
/// encrypted payload is left to the key cache to decrypt on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFileRecord {
    /// Hex account identifier, with or without the `0x` prefix
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: u32,
    /// Location the record was read from
    #[serde(skip)]
    pub path: PathBuf,
}

impl KeyFileRecord {
    /// Read and check a key file.
    ///
    /// Rejects files that are not JSON, carry no `address`, or carry one that
    /// is not a 20-byte hex account identifier.
    pub fn load(path: &Path) -> Result<Self, KeyFileError> {
        let data = fs::read(path).map_err(|source| KeyFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut record: KeyFileRecord =
            serde_json::from_slice(&data).map_err(|source| KeyFileError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if record.address.is_empty() {
            return Err(KeyFileError::MissingAddress {
                path: path.to_path_buf(),
            });
        }
        if !is_hex_address(&record.address) {
            return Err(KeyFileError::InvalidAddress {
                path: path.to_path_buf(),
                address: record.address,
            });
        }

        record.path = path.to_path_buf();
        Ok(record)
    }

    /// Account this key file unlocks.
    pub fn account(&self) -> Address {
        // Checked in `load`
        parse_hex_address(&self.address).unwrap_or_default()
    }
}

fn hex_digits(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Whether `s` is a 40 hex digit account identifier, `0x` prefix optional.
pub fn is_hex_address(s: &str) -> bool {
    let digits = hex_digits(s);
    digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a hex account identifier, `0x` prefix optional and case ignored.
pub fn parse_hex_address(s: &str) -> Option<Address> {
    if !is_hex_address(s) {
        return None;
    }
    Address::from_str(hex_digits(s)).ok()
}
