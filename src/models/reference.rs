use serde::{Deserialize, Serialize};
use std::fmt;

use super::wallet::FieldName;

/// Pointer into a named wallet's fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletFieldReference {
    pub wallet_name: String,
    pub field_name: FieldName,
}

impl WalletFieldReference {
    pub fn new(wallet_name: impl Into<String>, field_name: FieldName) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            field_name,
        }
    }
}

impl fmt::Display for WalletFieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}.{}", self.wallet_name, self.field_name)
    }
}

/// Where a call parameter takes its value from.
///
/// Produced when the plan is loaded; read when the call is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// `@wallet` or `@wallet.field`
    Wallet(WalletFieldReference),
    /// `@@` or `@@.field`: the wallet bound to the call being built
    BoundWallet(FieldName),
    /// `$N`: result of the N-th prior call
    CallResult(usize),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Wallet(wallet_ref) => wallet_ref.fmt(f),
            Reference::BoundWallet(field) => write!(f, "@@.{field}"),
            Reference::CallResult(index) => write!(f, "${index}"),
        }
    }
}
