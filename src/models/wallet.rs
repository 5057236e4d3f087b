use alloy::primitives::U256;
use alloy::signers::local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Address sentinel meaning "derive the address from the key source"
pub const ZERO_ADDRESS: &str = "0x0";

/// One entry of the wallet inventory.
///
/// The key-discovery strategy is picked from whichever of `privkey`,
/// `keyfile` and `keystore` are populated, in that priority order. See
/// [`WalletSpec::key_source`].
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WalletSpec {
    #[serde(default)]
    pub address: String,
    /// Raw hex private key. Cleared once validation has loaded it.
    #[serde(default, rename = "privkey", skip_serializing_if = "String::is_empty")]
    pub priv_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, rename = "keystore", skip_serializing_if = "String::is_empty")]
    pub key_store: String,
    #[serde(default, rename = "keyfile", skip_serializing_if = "String::is_empty")]
    pub key_file: String,
    /// Populated by callers that query the chain; never read from config
    #[serde(skip)]
    pub balance: Option<U256>,

    #[serde(skip)]
    pub(crate) signer: Option<PrivateKeySigner>,
}

impl WalletSpec {
    /// Watch-only wallet with a declared address
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Wallet whose address is derived from a raw hex private key
    pub fn with_private_key(private_key: impl Into<String>) -> Self {
        Self {
            priv_key: private_key.into(),
            ..Default::default()
        }
    }

    /// Wallet whose key file is searched for by address in `key_store`
    pub fn with_key_store(
        address: impl Into<String>,
        key_store: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            key_store: key_store.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Wallet unlocked from an explicit key file, relative to `key_store`
    /// unless absolute
    pub fn with_key_file(
        key_store: impl Into<String>,
        key_file: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            key_store: key_store.into(),
            key_file: key_file.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Key loaded by a successful validation, if any
    pub fn signer(&self) -> Option<&PrivateKeySigner> {
        self.signer.as_ref()
    }

    pub fn has_private_key(&self) -> bool {
        self.signer.is_some()
    }

    /// Whether no address is declared (empty or the zero sentinel)
    pub fn address_is_unset(&self) -> bool {
        self.address.is_empty() || self.address == ZERO_ADDRESS
    }

    /// Pick the key-discovery strategy from the populated fields.
    ///
    /// Falls through to a lower priority source only when the higher one is
    /// absent. A key-store entry missing its address or password is a
    /// placeholder rather than an error.
    pub fn key_source(&self) -> KeySource {
        if !self.priv_key.is_empty() {
            KeySource::InlineKey
        } else if !self.key_file.is_empty() {
            KeySource::KeyFile
        } else if self.key_store.is_empty() {
            KeySource::None
        } else if self.address.is_empty() {
            KeySource::Placeholder("no account is specified to search the keyfile in keystore prefix")
        } else if self.password.is_empty() {
            KeySource::Placeholder("no password is provided for the account keyfile")
        } else {
            KeySource::KeyStoreScan
        }
    }

    /// Read a field by name for reference dereferencing
    pub fn field_value(&self, field: FieldName) -> FieldValue<'_> {
        match field {
            FieldName::Address => FieldValue::Text(&self.address),
            FieldName::Password => FieldValue::Text(&self.password),
            FieldName::KeyStore => FieldValue::Text(&self.key_store),
            FieldName::KeyFile => FieldValue::Text(&self.key_file),
            FieldName::Balance => FieldValue::Balance(self.balance),
        }
    }

    /// Store the outcome of [`WalletSpec::resolve`].
    ///
    /// The raw key is erased so the signer is the only copy left. A key
    /// loaded earlier is kept when the resolution produced none, so
    /// validating again never drops it.
    pub fn apply(&mut self, resolved: ResolvedWallet) {
        self.address = resolved.address;
        self.key_store = resolved.key_store;
        self.key_file = resolved.key_file;
        if let Some(signer) = resolved.signer {
            self.priv_key.clear();
            self.signer = Some(signer);
        }
    }
}

impl fmt::Debug for WalletSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSpec")
            .field("address", &self.address)
            .field("priv_key", &redacted(&self.priv_key))
            .field("password", &redacted(&self.password))
            .field("key_store", &self.key_store)
            .field("key_file", &self.key_file)
            .field("balance", &self.balance)
            .field("has_private_key", &self.signer.is_some())
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

/// Key-discovery strategy of a wallet, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Raw hex private key in the config
    InlineKey,
    /// Explicit key file (optionally relative to the key store), unlocked with the password
    KeyFile,
    /// Search the key store directory for the file matching the address
    KeyStoreScan,
    /// Key store declared but the address or password is missing
    Placeholder(&'static str),
    /// No way to produce a private key
    None,
}

/// Outcome of validating a [`WalletSpec`].
#[derive(Clone, Default)]
pub struct ResolvedWallet {
    /// Lower-case hex address, or the declared one unchanged
    pub address: String,
    pub key_store: String,
    pub key_file: String,
    pub signer: Option<PrivateKeySigner>,
}

impl fmt::Debug for ResolvedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedWallet")
            .field("address", &self.address)
            .field("key_store", &self.key_store)
            .field("key_file", &self.key_file)
            .field("has_private_key", &self.signer.is_some())
            .finish()
    }
}

/// Fields of a wallet that references may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Address,
    Password,
    KeyStore,
    KeyFile,
    Balance,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::Address,
        FieldName::Password,
        FieldName::KeyStore,
        FieldName::KeyFile,
        FieldName::Balance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Address => "address",
            FieldName::Password => "password",
            FieldName::KeyStore => "keystore",
            FieldName::KeyFile => "keyfile",
            FieldName::Balance => "balance",
        }
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown wallet field: {s}"))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value read from a wallet field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// `None` until a caller has fetched the balance
    Balance(Option<U256>),
}
