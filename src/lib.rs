//! Wallet and value-reference resolution for RPC test plans.
//!
//! A plan names its wallets once; each wallet's key comes from an inline hex
//! key, an encrypted key file, or a scan of a key store directory. Calls then
//! pick wallets by name pattern through a consistent hash ring and refer to
//! wallet fields or earlier call results with `@wallet.field`, `@@` and `$N`
//! tokens.

pub mod error;
pub mod models;
pub mod services;

pub use error::{KeyFileError, ReferenceError, WalletError};
pub use models::{
    FieldName, FieldValue, PlanWalletsConfig, Reference, WalletFieldReference, WalletSpec,
};
pub use services::reference::{parse_reference, parse_wallet_field};
pub use services::wallet::{KeyCache, KeystoreCache, Wallets};

use regex::Regex;
use std::process::ExitCode;

/// Load, validate and report the wallet inventory described by `config`.
pub fn run(config: &PlanWalletsConfig) -> Result<bool, String> {
    let yaml = std::fs::read_to_string(&config.wallets_file).map_err(|e| {
        format!(
            "Failed to read wallets file {}: {e}",
            config.wallets_file.display()
        )
    })?;
    let mut wallets =
        Wallets::from_yaml(&yaml).map_err(|e| format!("Failed to parse wallets file: {e}"))?;
    let filter = Regex::new(&config.wallet_filter)
        .map_err(|e| format!("Invalid wallet filter '{}': {e}", config.wallet_filter))?;

    tracing::info!(
        "Loaded {} wallets from {}",
        wallets.len(),
        config.wallets_file.display()
    );

    let cache = KeystoreCache::new();
    let valid = wallets.validate(&cache);

    for name in wallets.matching_names(&filter) {
        if let Some(spec) = wallets.wallet_spec(name) {
            tracing::info!(
                "  - {}: {} (private key: {})",
                name,
                if spec.address.is_empty() { "<none>" } else { spec.address.as_str() },
                if spec.has_private_key() { "loaded" } else { "absent" }
            );
        }
    }

    if let Some(shard_key) = &config.shard_key {
        match wallets.select_name(&filter, shard_key) {
            Some(name) => tracing::info!("Shard key '{}' selects wallet {}", shard_key, name),
            None => tracing::warn!("No wallet matches filter '{}'", config.wallet_filter),
        }
    }

    Ok(valid)
}

/// Exit status for a finished [`run`]
pub fn exit_code(outcome: Result<bool, String>) -> ExitCode {
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
    }
}
