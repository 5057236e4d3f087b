//! Mock key cache for testing
//!
//! Records every binding change so tests can check that failed validations
//! leave nothing behind, and can be told to reject every password.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use super::key_cache::{KeyCache, KeystoreCache};

/// A binding change observed by [`RecordingKeyCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCacheCall {
    SetPath(Address, PathBuf),
    UnsetPath(Address, PathBuf),
}

/// [`KeyCache`] wrapper that records calls and can fail decryption
#[derive(Default)]
pub struct RecordingKeyCache {
    inner: KeystoreCache,
    calls: Mutex<Vec<KeyCacheCall>>,
    fail_decrypt: bool,
}

impl RecordingKeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache whose `private_key` always fails
    pub fn failing_decrypt() -> Self {
        Self {
            fail_decrypt: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<KeyCacheCall> {
        self.calls.lock().clone()
    }

    /// Underlying cache, for inspecting what is still bound
    pub fn inner(&self) -> &KeystoreCache {
        &self.inner
    }
}

impl KeyCache for RecordingKeyCache {
    fn set_path(&self, account: Address, path: &Path) {
        self.calls
            .lock()
            .push(KeyCacheCall::SetPath(account, path.to_path_buf()));
        self.inner.set_path(account, path);
    }

    fn unset_path(&self, account: Address, path: &Path) {
        self.calls
            .lock()
            .push(KeyCacheCall::UnsetPath(account, path.to_path_buf()));
        self.inner.unset_path(account, path);
    }

    fn private_key(&self, account: Address, password: &str) -> Option<PrivateKeySigner> {
        if self.fail_decrypt {
            return None;
        }
        self.inner.private_key(account, password)
    }
}
