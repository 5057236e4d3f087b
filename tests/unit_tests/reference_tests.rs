// Unit tests for reference parsing against a wallet inventory
use plan_wallets::models::Reference;
use plan_wallets::{
    FieldName, FieldValue, ReferenceError, WalletFieldReference, WalletSpec, Wallets,
    parse_reference, parse_wallet_field,
};

fn wallets() -> Wallets {
    let mut alice = WalletSpec::with_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    alice.password = "alice-pw".to_string();

    let mut wallets = Wallets::new();
    wallets.insert("alice", alice);
    wallets.insert("bob", WalletSpec::default());
    wallets
}

#[test]
fn test_bare_name_resolves_to_address_only_if_wallet_exists() {
    let wallets = wallets();
    assert_eq!(
        parse_wallet_field("alice", &wallets).unwrap(),
        WalletFieldReference::new("alice", FieldName::Address)
    );
    assert!(parse_wallet_field("carol", &wallets).is_err());
}

#[test]
fn test_every_field_name_is_accepted() {
    let wallets = wallets();
    for field in FieldName::ALL {
        let body = format!("bob.{field}");
        assert_eq!(
            parse_wallet_field(&body, &wallets).unwrap(),
            WalletFieldReference::new("bob", field)
        );
    }
}

#[test]
fn test_distinct_errors() {
    let wallets = wallets();
    assert_eq!(
        parse_wallet_field("alice.nosuchfield", &wallets),
        Err(ReferenceError::UnknownField {
            wallet: "alice".to_string(),
            field: "nosuchfield".to_string(),
        })
    );
    assert_eq!(
        parse_wallet_field("carol.address", &wallets),
        Err(ReferenceError::UnknownWallet("carol".to_string()))
    );
    assert_eq!(
        parse_wallet_field("a.b.c", &wallets),
        Err(ReferenceError::Malformed("a.b.c".to_string()))
    );
    assert_eq!(
        parse_wallet_field("alice.password.x", &wallets),
        Err(ReferenceError::Malformed("alice.password.x".to_string()))
    );
}

#[test]
fn test_parsed_reference_dereferences() {
    let wallets = wallets();
    let Reference::Wallet(reference) = parse_reference("@alice.password", &wallets).unwrap()
    else {
        panic!("expected a wallet reference");
    };
    assert_eq!(
        wallets.field_value(&reference),
        Some(FieldValue::Text("alice-pw"))
    );

    let Reference::Wallet(balance) = parse_reference("@bob.balance", &wallets).unwrap() else {
        panic!("expected a wallet reference");
    };
    assert_eq!(wallets.field_value(&balance), Some(FieldValue::Balance(None)));
}

#[test]
fn test_reference_display_round_trips() {
    let wallets = wallets();
    for token in ["@alice.password", "@@.balance", "$12"] {
        let reference = parse_reference(token, &wallets).unwrap();
        assert_eq!(reference.to_string(), token);
    }
    // Bare names display in their explicit form
    assert_eq!(
        parse_reference("@alice", &wallets).unwrap().to_string(),
        "@alice.address"
    );
}
