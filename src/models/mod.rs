pub mod config;
pub mod keyfile;
pub mod reference;
pub mod wallet;

pub use config::PlanWalletsConfig;
pub use keyfile::KeyFileRecord;
pub use reference::{Reference, WalletFieldReference};
pub use wallet::{FieldName, FieldValue, KeySource, ResolvedWallet, WalletSpec, ZERO_ADDRESS};
