// Inline private key validation
use alloy::primitives::Address;
use plan_wallets::{KeystoreCache, WalletError, WalletSpec, Wallets};

const KEYS: [(&str, &str); 3] = [
    (
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
    ),
    (
        "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    ),
    (
        "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
        "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
    ),
];

fn wallet(address: &str, private_key: &str) -> WalletSpec {
    let mut spec = WalletSpec::with_private_key(private_key);
    spec.address = address.to_string();
    spec
}

#[test]
fn test_inline_key_derives_lowercase_address() {
    let cache = KeystoreCache::new();
    for (key, expected) in KEYS {
        let mut spec = wallet("", key);
        assert!(spec.validate(&cache, "w"));
        assert_eq!(spec.address, expected);
        assert_eq!(
            spec.signer().unwrap().address(),
            expected.parse::<Address>().unwrap()
        );
    }
}

#[test]
fn test_inline_key_accepts_matching_checksummed_address() {
    let mut spec = wallet("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", KEYS[0].0);
    assert!(spec.validate(&KeystoreCache::new(), "w"));
    // A matching declared address is kept as written
    assert_eq!(spec.address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    assert!(spec.has_private_key());
}

#[test]
fn test_inline_key_mismatch_fails_without_caching() {
    let mut spec = wallet(KEYS[1].1, KEYS[0].0);
    let cache = KeystoreCache::new();

    let err = spec.resolve(&cache, "w").unwrap_err();
    assert!(matches!(err, WalletError::AddressMismatch { .. }));

    assert!(!spec.validate(&cache, "w"));
    assert!(!spec.has_private_key());
    assert!(spec.signer().is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_inline_key_with_redundant_fields_still_validates() {
    let mut spec = wallet("", KEYS[2].0);
    spec.password = "unused".to_string();
    spec.key_file = "/nowhere/key.json".to_string();
    assert!(spec.validate(&KeystoreCache::new(), "w"));
    assert_eq!(spec.address, KEYS[2].1);
}

#[test]
fn test_validated_key_is_not_serialized() {
    let mut wallets = Wallets::new();
    wallets.insert("alice", wallet("", KEYS[0].0));
    assert!(wallets.validate(&KeystoreCache::new()));

    let json = serde_json::to_string(&wallets).unwrap();
    assert!(!json.contains("privkey"));
    assert!(!json.contains(&KEYS[0].0[..16]));
    assert!(json.contains(KEYS[0].1));
}
