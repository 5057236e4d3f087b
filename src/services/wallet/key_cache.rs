//! Cache of account → key file bindings and decrypted keys
//!
//! Built once at startup and shared by reference with every wallet
//! validation, so that two wallets backed by the same key file only pay for
//! one decryption.

use alloy::primitives::{Address, B256, keccak256};
use alloy::signers::local::PrivateKeySigner;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Capability wallet validation needs from its host.
pub trait KeyCache: Send + Sync {
    /// Bind `account` to the key file at `path`
    fn set_path(&self, account: Address, path: &Path);

    /// Drop the binding, but only if it still points at `path`
    fn unset_path(&self, account: Address, path: &Path);

    /// Decrypt the bound key file with `password`.
    ///
    /// Returns `None` when nothing is bound or decryption fails.
    fn private_key(&self, account: Address, password: &str) -> Option<PrivateKeySigner>;
}

#[derive(Clone)]
struct CachedKey {
    path: PathBuf,
    unlocked: Option<UnlockedKey>,
}

#[derive(Clone)]
struct UnlockedKey {
    password_hash: B256,
    signer: PrivateKeySigner,
}

/// [`KeyCache`] backed by encrypted key files on disk.
#[derive(Default)]
pub struct KeystoreCache {
    entries: RwLock<HashMap<Address, CachedKey>>,
}

impl KeystoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key file currently bound to `account`
    pub fn path_of(&self, account: Address) -> Option<PathBuf> {
        self.entries.read().get(&account).map(|e| e.path.clone())
    }

    /// Previously decrypted key for `account`, if any
    pub fn signer(&self, account: Address) -> Option<PrivateKeySigner> {
        self.entries
            .read()
            .get(&account)
            .and_then(|e| e.unlocked.as_ref())
            .map(|u| u.signer.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyCache for KeystoreCache {
    fn set_path(&self, account: Address, path: &Path) {
        let mut entries = self.entries.write();
        match entries.get_mut(&account) {
            Some(entry) if entry.path == path => {}
            Some(entry) => {
                tracing::debug!(
                    "Rebinding {} from {} to {}",
                    account,
                    entry.path.display(),
                    path.display()
                );
                entry.path = path.to_path_buf();
                entry.unlocked = None;
            }
            None => {
                entries.insert(
                    account,
                    CachedKey {
                        path: path.to_path_buf(),
                        unlocked: None,
                    },
                );
            }
        }
    }

    fn unset_path(&self, account: Address, path: &Path) {
        let mut entries = self.entries.write();
        if entries.get(&account).is_some_and(|e| e.path == path) {
            entries.remove(&account);
            tracing::debug!("Unbound {} from {}", account, path.display());
        }
    }

    fn private_key(&self, account: Address, password: &str) -> Option<PrivateKeySigner> {
        let password_hash = keccak256(password.as_bytes());

        let path = {
            let entries = self.entries.read();
            let entry = entries.get(&account)?;
            if let Some(unlocked) = &entry.unlocked
                && unlocked.password_hash == password_hash
            {
                return Some(unlocked.signer.clone());
            }
            entry.path.clone()
        };

        // Decrypt outside the lock; scrypt is slow
        let signer = match PrivateKeySigner::decrypt_keystore(&path, password) {
            Ok(signer) => signer,
            Err(e) => {
                tracing::debug!("Failed to decrypt {}: {}", path.display(), e);
                return None;
            }
        };

        let mut entries = self.entries.write();
        if let Some(entry) = entries.get_mut(&account)
            && entry.path == path
        {
            entry.unlocked = Some(UnlockedKey {
                password_hash,
                signer: signer.clone(),
            });
        }
        Some(signer)
    }
}
