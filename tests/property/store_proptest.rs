//! Property-based tests for the persistent note log

use proptest::prelude::*;

use lanshare::backend::store::LogStore;
use lanshare::shared::LogEntry;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_append_order_and_single_removal(
        contents in proptest::collection::vec("[a-z ]{0,16}", 1..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("messages.json"));
        let rt = runtime();

        // Every entry shares one timestamp so removal must take only the first match
        for content in &contents {
            rt.block_on(store.append(LogEntry::with_time("2024-05-01 10:00:00", content.clone())))
                .unwrap();
        }
        let loaded = rt.block_on(store.load_all()).unwrap();
        let expected: Vec<&String> = contents.iter().rev().collect();
        prop_assert_eq!(
            loaded.iter().map(|e| &e.content).collect::<Vec<_>>(),
            expected
        );

        let removed = rt.block_on(store.remove("2024-05-01 10:00:00")).unwrap();
        prop_assert_eq!(&removed, &loaded[0]);
        let after = rt.block_on(store.load_all()).unwrap();
        prop_assert_eq!(after.as_slice(), &loaded[1..]);

        let missing = rt.block_on(store.remove("1999-01-01 00:00:00"));
        prop_assert!(missing.unwrap_err().is_not_found());
    }
}
