use std::path::PathBuf;

/// Settings for the `plan-wallets` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWalletsConfig {
    /// YAML file holding the wallet inventory
    pub wallets_file: PathBuf,
    /// Regular expression selecting wallets by name
    pub wallet_filter: String,
    /// Sharding key to report a single wallet selection for
    pub shard_key: Option<String>,
}

impl PlanWalletsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wallets_file = lookup("WALLETS_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or("WALLETS_FILE environment variable not set")?;

        let wallet_filter = lookup("WALLET_FILTER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ".*".to_string());

        regex::Regex::new(&wallet_filter)
            .map_err(|e| format!("Invalid WALLET_FILTER '{wallet_filter}': {e}"))?;

        Ok(Self {
            wallets_file,
            wallet_filter,
            shard_key: lookup("SHARD_KEY").filter(|s| !s.is_empty()),
        })
    }
}
