//! Wallet validation and key discovery
//!
//! A wallet is resolved by the first populated key source, in priority
//! order: inline private key, explicit key file, key store scan. Resolving
//! only reads the spec; [`WalletSpec::validate`] stores the result.

use alloy::primitives::{Address, hex};
use alloy::signers::local::PrivateKeySigner;
use std::path::{Path, PathBuf};

use super::key_cache::KeyCache;
use super::keystore::find_key_file;
use crate::error::WalletError;
use crate::models::keyfile::{is_hex_address, parse_hex_address};
use crate::models::{KeyFileRecord, KeySource, ResolvedWallet, WalletSpec};

/// Prefix marking a key file path whose parent directory is the key store
pub const KEYSTORE_SCHEME: &str = "keystore://";

impl WalletSpec {
    /// Validate the wallet and load its key, recording the outcome in place.
    ///
    /// Failures are logged against the wallet `name` and reported as `false`.
    pub fn validate(&mut self, cache: &dyn KeyCache, name: &str) -> bool {
        match self.resolve(cache, name) {
            Ok(resolved) => {
                self.apply(resolved);
                true
            }
            Err(e) => {
                tracing::error!(section = "Wallets", wallet = %name, "{}", e);
                false
            }
        }
    }

    /// Work out the wallet's address and key without modifying the spec.
    ///
    /// Key files that get bound in `cache` along the way are unbound again if
    /// a later step fails.
    pub fn resolve(&self, cache: &dyn KeyCache, name: &str) -> Result<ResolvedWallet, WalletError> {
        if !self.address_is_unset() && !is_hex_address(&self.address) {
            return Err(WalletError::InvalidAddress(self.address.clone()));
        }
        let declared = if self.address_is_unset() {
            None
        } else {
            parse_hex_address(&self.address)
        };

        let resolved = ResolvedWallet {
            address: self.address.clone(),
            key_store: self.key_store.clone(),
            key_file: self.key_file.clone(),
            signer: None,
        };

        match self.key_source() {
            KeySource::InlineKey => self.resolve_inline_key(name, declared, resolved),
            KeySource::KeyFile => self.resolve_key_file(cache, name, declared, resolved),
            KeySource::KeyStoreScan => self.resolve_key_store(cache, name, declared, resolved),
            KeySource::Placeholder(reason) => {
                tracing::warn!(section = "Wallets", wallet = %name, "{}", reason);
                Ok(resolved)
            }
            KeySource::None => {
                tracing::warn!(
                    section = "Wallets",
                    wallet = %name,
                    "no privkey, keyfile or keystore prefix specified"
                );
                Ok(resolved)
            }
        }
    }

    fn resolve_inline_key(
        &self,
        name: &str,
        declared: Option<Address>,
        mut resolved: ResolvedWallet,
    ) -> Result<ResolvedWallet, WalletError> {
        if !self.password.is_empty() {
            tracing::warn!(
                wallet = %name,
                "private key is being loaded from string, but password is provided"
            );
        }
        if !self.key_file.is_empty() {
            tracing::warn!(
                wallet = %name,
                "private key is being loaded from string, but keyfile is provided"
            );
        }

        let signer = self
            .priv_key
            .parse::<PrivateKeySigner>()
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;

        if let Some(address) = bind_address(name, declared, signer.address(), "privkey")? {
            resolved.address = address;
        }
        resolved.signer = Some(signer);
        Ok(resolved)
    }

    fn resolve_key_file(
        &self,
        cache: &dyn KeyCache,
        name: &str,
        declared: Option<Address>,
        mut resolved: ResolvedWallet,
    ) -> Result<ResolvedWallet, WalletError> {
        if self.password.is_empty() {
            return Err(WalletError::MissingPassword);
        }

        let (key_store, key_file) = self.key_file_location(name);
        let path = Path::new(&key_store).join(&key_file);
        resolved.key_store = key_store;
        resolved.key_file = key_file;

        if !is_file(&path) {
            return Err(WalletError::KeyFileNotFound(path));
        }
        let record = KeyFileRecord::load(&path).map_err(WalletError::KeyFileFormat)?;
        let account = record.account();
        if let Some(address) = bind_address(name, declared, account, "keyfile")? {
            resolved.address = address;
        }

        resolved.signer = Some(unlock(cache, account, &path, &self.password)?);
        Ok(resolved)
    }

    fn resolve_key_store(
        &self,
        cache: &dyn KeyCache,
        name: &str,
        declared: Option<Address>,
        mut resolved: ResolvedWallet,
    ) -> Result<ResolvedWallet, WalletError> {
        let dir = PathBuf::from(&self.key_store);
        // The zero sentinel is searched for literally
        let account = declared.unwrap_or(Address::ZERO);

        let record = match find_key_file(&dir, account) {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Err(WalletError::KeyNotLocated {
                    address: self.address.clone(),
                    dir,
                });
            }
            Err(source) => return Err(WalletError::KeyStoreScan { dir, source }),
        };

        resolved.signer = Some(unlock(cache, account, &record.path, &self.password)?);
        tracing::info!(
            wallet = %name,
            address = %self.address,
            keyfile = %record.path.display(),
            "located keyfile by address"
        );
        Ok(resolved)
    }

    /// Split the configured key file into (key store, file name).
    ///
    /// `keystore://dir/file` overrides any configured key store. An absolute
    /// key file is used as is and the key store is dropped, relative or not.
    fn key_file_location(&self, name: &str) -> (String, String) {
        if let Some(rest) = self.key_file.strip_prefix(KEYSTORE_SCHEME) {
            if !self.key_store.is_empty() {
                tracing::warn!(
                    wallet = %name,
                    "replacing keystore path with keyfile dir, detected keystore:// prefix"
                );
            }
            let path = Path::new(rest);
            let key_store = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
                _ => ".".to_string(),
            };
            let key_file = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            return (key_store, key_file);
        }

        if Path::new(&self.key_file).is_absolute() {
            if !self.key_store.is_empty() {
                tracing::warn!(
                    wallet = %name,
                    "removing keystore path, since keyfile path was absolute"
                );
            }
            return (String::new(), self.key_file.clone());
        }
        (self.key_store.clone(), self.key_file.clone())
    }
}

/// Check a key-derived address against the declared one.
///
/// Returns the lower-case address to adopt when none was declared.
fn bind_address(
    name: &str,
    declared: Option<Address>,
    derived: Address,
    source_kind: &'static str,
) -> Result<Option<String>, WalletError> {
    match declared {
        None => {
            let address = lower_hex(derived);
            tracing::info!(wallet = %name, address = %address, "loaded address from {}", source_kind);
            Ok(Some(address))
        }
        Some(declared) if declared == derived => Ok(None),
        Some(declared) => Err(WalletError::AddressMismatch {
            source_kind,
            declared: lower_hex(declared),
            derived: lower_hex(derived),
        }),
    }
}

/// Bind the key file in the cache and decrypt it, unbinding on any failure.
fn unlock(
    cache: &dyn KeyCache,
    account: Address,
    path: &Path,
    password: &str,
) -> Result<PrivateKeySigner, WalletError> {
    cache.set_path(account, path);

    let Some(signer) = cache.private_key(account, password) else {
        cache.unset_path(account, path);
        return Err(WalletError::Decrypt(path.to_path_buf()));
    };

    if signer.address() != account {
        cache.unset_path(account, path);
        return Err(WalletError::AddressMismatch {
            source_kind: "keyfile",
            declared: lower_hex(account),
            derived: lower_hex(signer.address()),
        });
    }

    Ok(signer)
}

pub(crate) fn lower_hex(address: Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn is_file(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| !m.is_dir())
}
