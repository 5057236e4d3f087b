//! Named collection of wallets
//!
//! Names are kept sorted so selection by pattern is reproducible.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::key_cache::KeyCache;
use super::ring::HashRing;
use crate::models::keyfile::parse_hex_address;
use crate::models::{FieldValue, WalletFieldReference, WalletSpec};

/// Wallet inventory keyed by wallet name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallets(BTreeMap<String, WalletSpec>);

impl Wallets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the YAML `name -> wallet` mapping
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: WalletSpec) -> Option<WalletSpec> {
        self.0.insert(name.into(), spec)
    }

    pub fn wallet_spec(&self, name: &str) -> Option<&WalletSpec> {
        self.0.get(name)
    }

    pub fn wallet_spec_mut(&mut self, name: &str) -> Option<&mut WalletSpec> {
        self.0.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Wallet names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WalletSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate every wallet, in name order.
    ///
    /// All wallets are checked so every problem gets logged; the result is
    /// `false` if any of them failed.
    pub fn validate(&mut self, cache: &dyn KeyCache) -> bool {
        let mut valid = true;
        for (name, spec) in self.0.iter_mut() {
            valid &= spec.validate(cache, name);
        }
        if !valid {
            tracing::error!(section = "Wallets", "wallet inventory failed validation");
        }
        valid
    }

    /// Name of the wallet holding `address`, compared case-insensitively
    pub fn name_of(&self, address: &str) -> Option<&str> {
        let wanted = parse_hex_address(address);
        self.iter()
            .find(|(_, spec)| match wanted {
                Some(wanted) => parse_hex_address(&spec.address) == Some(wanted),
                None => spec.address == address,
            })
            .map(|(name, _)| name)
    }

    /// Sorted names matching `pattern`
    pub fn matching_names(&self, pattern: &Regex) -> Vec<&str> {
        self.names().filter(|name| pattern.is_match(name)).collect()
    }

    /// Name of the wallet `shard_key` maps to among those matching `pattern`
    pub fn select_name(&self, pattern: &Regex, shard_key: &str) -> Option<&str> {
        let ring = HashRing::new(self.matching_names(pattern));
        let name = ring.get_node(shard_key)?;
        // Borrow the name from the map rather than the ring
        self.0.get_key_value(name).map(|(name, _)| name.as_str())
    }

    /// Wallet `shard_key` maps to among those matching `pattern`.
    ///
    /// The same matching set and key always give the same wallet.
    pub fn get_one(&self, pattern: &Regex, shard_key: &str) -> Option<&WalletSpec> {
        self.select_name(pattern, shard_key)
            .and_then(|name| self.wallet_spec(name))
    }

    /// All wallets matching `pattern`, in name order
    pub fn get_all(&self, pattern: &Regex) -> Vec<&WalletSpec> {
        self.iter()
            .filter(|(name, _)| pattern.is_match(name))
            .map(|(_, spec)| spec)
            .collect()
    }

    /// Read the value a wallet field reference points at
    pub fn field_value(&self, reference: &WalletFieldReference) -> Option<FieldValue<'_>> {
        self.wallet_spec(&reference.wallet_name)
            .map(|spec| spec.field_value(reference.field_name))
    }
}

impl FromIterator<(String, WalletSpec)> for Wallets {
    fn from_iter<T: IntoIterator<Item = (String, WalletSpec)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
