//! Parsing of value reference tokens
//!
//! Tokens are checked against the wallet inventory when the plan is loaded,
//! so a typo in a wallet or field name fails early instead of at call time.
//! Reading the referenced value is left to the caller.

use crate::error::ReferenceError;
use crate::models::{FieldName, Reference, WalletFieldReference};
use crate::services::wallet::Wallets;

/// Sigil of a wallet reference (`@wallet`, `@wallet.field`, `@@`)
pub const WALLET_SIGIL: char = '@';
/// Sigil of a prior call result reference (`$N`)
pub const RESULT_SIGIL: char = '$';
/// Separator between wallet name and field name
pub const REF_DELIM: char = '.';

/// Whether `token` starts with a reference sigil
pub fn is_reference(token: &str) -> bool {
    token.starts_with(WALLET_SIGIL) || token.starts_with(RESULT_SIGIL)
}

/// Parse a full reference token, sigil included.
pub fn parse_reference(token: &str, wallets: &Wallets) -> Result<Reference, ReferenceError> {
    if let Some(body) = token.strip_prefix(WALLET_SIGIL) {
        if let Some(bound) = body.strip_prefix(WALLET_SIGIL) {
            return parse_bound_wallet(token, bound);
        }
        return parse_wallet_field(body, wallets).map(Reference::Wallet);
    }

    if let Some(index) = token.strip_prefix(RESULT_SIGIL) {
        return index
            .parse::<usize>()
            .map(Reference::CallResult)
            .map_err(|_| ReferenceError::InvalidResultIndex(token.to_string()));
    }

    Err(ReferenceError::NotAReference(token.to_string()))
}

/// Parse the body of a wallet reference (sigil already stripped).
///
/// A bare wallet name refers to its address, and only resolves if that
/// wallet exists. Otherwise the body must be exactly `wallet.field`.
pub fn parse_wallet_field(
    body: &str,
    wallets: &Wallets,
) -> Result<WalletFieldReference, ReferenceError> {
    let parts: Vec<&str> = body.split(REF_DELIM).collect();
    match parts.as_slice() {
        [wallet_name] => {
            if wallets.contains(wallet_name) {
                Ok(WalletFieldReference::new(*wallet_name, FieldName::Address))
            } else {
                Err(ReferenceError::Malformed(body.to_string()))
            }
        }
        [wallet_name, field] => {
            if !wallets.contains(wallet_name) {
                return Err(ReferenceError::UnknownWallet(wallet_name.to_string()));
            }
            let field_name = field
                .parse::<FieldName>()
                .map_err(|_| ReferenceError::UnknownField {
                    wallet: wallet_name.to_string(),
                    field: field.to_string(),
                })?;
            Ok(WalletFieldReference::new(*wallet_name, field_name))
        }
        _ => Err(ReferenceError::Malformed(body.to_string())),
    }
}

/// `@@` or `@@.field`; the wallet itself is only known when the call is built
fn parse_bound_wallet(token: &str, rest: &str) -> Result<Reference, ReferenceError> {
    if rest.is_empty() {
        return Ok(Reference::BoundWallet(FieldName::Address));
    }
    let Some(field) = rest.strip_prefix(REF_DELIM) else {
        return Err(ReferenceError::Malformed(token.to_string()));
    };
    field
        .parse::<FieldName>()
        .map(Reference::BoundWallet)
        .map_err(|_| ReferenceError::UnknownField {
            wallet: "@".to_string(),
            field: field.to_string(),
        })
}
