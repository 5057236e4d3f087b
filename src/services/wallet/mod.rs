//! Wallet inventory and key discovery
//!
//! - KeystoreCache: account → key file bindings and decrypted keys
//! - for_each_key_file: non-recursive key store scanning
//! - WalletSpec validation: inline key, key file and key store strategies
//! - Wallets: the named inventory, with hash-ring selection by pattern

pub mod key_cache;
pub mod keystore;
pub mod mock;
pub mod registry;
pub mod ring;
pub mod validation;

pub use key_cache::{KeyCache, KeystoreCache};
pub use keystore::{ScanControl, find_key_file, for_each_key_file};
pub use mock::{KeyCacheCall, RecordingKeyCache};
pub use registry::Wallets;
pub use ring::HashRing;
pub use validation::KEYSTORE_SCHEME;

// Re-export model types for convenience
pub use crate::models::{KeySource, ResolvedWallet, WalletSpec};
