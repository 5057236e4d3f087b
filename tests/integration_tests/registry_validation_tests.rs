#[cfg(test)]
mod tests {
    use crate::test_utils::{
        ACCOUNT_0, PASSWORD, TEST_PRIVATE_KEYS, inline_wallet, lower_hex, write_key_file,
    };
    use plan_wallets::models::Reference;
    use plan_wallets::{FieldValue, KeystoreCache, Wallets, parse_reference};
    use regex::Regex;

    fn inventory_yaml(key_store: &std::path::Path, keystore_address: &str) -> String {
        format!(
            r#"
funder:
  privkey: "{key0}"
worker-1:
  address: "{keystore_address}"
  keystore: "{store}"
  password: "{PASSWORD}"
worker-2:
  privkey: "{key2}"
pending:
  keystore: "{store}"
"#,
            key0 = TEST_PRIVATE_KEYS[0],
            key2 = TEST_PRIVATE_KEYS[2],
            store = key_store.display(),
        )
    }

    #[test]
    fn test_yaml_inventory_validates() {
        let dir = tempfile::tempdir().unwrap();
        let (address, _) = write_key_file(dir.path(), "w1.json", TEST_PRIVATE_KEYS[1], PASSWORD);
        let mut wallets =
            Wallets::from_yaml(&inventory_yaml(dir.path(), &lower_hex(address))).unwrap();

        assert!(wallets.validate(&KeystoreCache::new()));
        assert_eq!(wallets.name_of(ACCOUNT_0), Some("funder"));
        assert_eq!(wallets.name_of(&lower_hex(address)), Some("worker-1"));
        assert!(!wallets.wallet_spec("pending").unwrap().has_private_key());

        let workers = Regex::new("^worker-").unwrap();
        for spec in wallets.get_all(&workers) {
            assert!(spec.has_private_key());
        }
    }

    #[test]
    fn test_validating_twice_keeps_loaded_keys() {
        let dir = tempfile::tempdir().unwrap();
        let (address, _) = write_key_file(dir.path(), "w1.json", TEST_PRIVATE_KEYS[1], PASSWORD);
        let mut wallets =
            Wallets::from_yaml(&inventory_yaml(dir.path(), &lower_hex(address))).unwrap();
        let cache = KeystoreCache::new();

        assert!(wallets.validate(&cache));
        assert!(wallets.validate(&cache));

        for name in ["funder", "worker-1", "worker-2"] {
            let spec = wallets.wallet_spec(name).unwrap();
            assert!(spec.has_private_key(), "{name} lost its key");
        }
        assert_eq!(
            wallets.wallet_spec("funder").unwrap().address,
            ACCOUNT_0
        );
    }

    #[test]
    fn test_one_bad_wallet_fails_batch_but_all_are_checked() {
        let mut wallets = Wallets::new();
        // Sorts first and fails
        wallets.insert("a-broken", inline_wallet("not a key"));
        wallets.insert("b-good", inline_wallet(TEST_PRIVATE_KEYS[1]));

        assert!(!wallets.validate(&KeystoreCache::new()));

        // The later wallet was still validated
        let good = wallets.wallet_spec("b-good").unwrap();
        assert!(good.has_private_key());
        assert!(!good.address.is_empty());
    }

    #[test]
    fn test_selection_and_references_after_validation() {
        let mut wallets = Wallets::new();
        for (i, key) in TEST_PRIVATE_KEYS.iter().enumerate() {
            wallets.insert(format!("worker-{i}"), inline_wallet(key));
        }
        assert!(wallets.validate(&KeystoreCache::new()));

        let pattern = Regex::new("^worker-").unwrap();
        let chosen = wallets.get_one(&pattern, "req-7").unwrap();
        let chosen_name = wallets.name_of(&chosen.address).unwrap();
        assert_eq!(wallets.select_name(&pattern, "req-7"), Some(chosen_name));

        let token = format!("@{chosen_name}");
        let Reference::Wallet(reference) = parse_reference(&token, &wallets).unwrap() else {
            panic!("expected a wallet reference");
        };
        assert_eq!(
            wallets.field_value(&reference),
            Some(FieldValue::Text(chosen.address.as_str()))
        );
    }
}
