//! Property-based tests for save/load roundtrip correctness.
//!
//! These tests verify that load(save(v, k)) == v for random values and keys.

mod common;

use common::{Section, User, memory_adapter};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u64,
    delta: i32,
    ratio: f64,
    weight: f32,
    active: bool,
    label: String,
    note: Option<String>,
    owner: User,
    sections: Vec<Section>,
}

fn user_strategy() -> impl Strategy<Value = User> {
    "[a-z]{0,12}".prop_map(|name| User { name })
}

fn section_strategy() -> impl Strategy<Value = Section> {
    (".{0,16}", proptest::option::of(any::<u32>()))
        .prop_map(|(heading, words)| Section { heading, words })
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("JSON has no NaN or infinity", |v| v.is_finite())
}

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("JSON has no NaN or infinity", |v| v.is_finite())
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        any::<u64>(),
        any::<i32>(),
        finite_f64(),
        finite_f32(),
        any::<bool>(),
        ".{0,32}",
        proptest::option::of(".{0,8}"),
        user_strategy(),
        proptest::collection::vec(section_strategy(), 0..4),
    )
        .prop_map(|(id, delta, ratio, weight, active, label, note, owner, sections)| Record {
            id,
            delta,
            ratio,
            weight,
            active,
            label,
            note,
            owner,
            sections,
        })
}

proptest! {
    #[test]
    fn roundtrip_record(record in record_strategy(), key in proptest::option::of("[a-zA-Z0-9._-]{0,24}")) {
        let (adapter, _) = memory_adapter();

        adapter.save(Some(&record), key.as_deref()).unwrap();
        let loaded: Record = adapter.load(key.as_deref()).unwrap();

        prop_assert_eq!(loaded, record);
    }

    #[test]
    fn roundtrip_sequence(values in proptest::collection::vec(any::<i64>(), 0..64)) {
        let (adapter, _) = memory_adapter();

        adapter.save(Some(&values), None).unwrap();
        let loaded: Vec<i64> = adapter.load(None).unwrap();

        prop_assert_eq!(loaded, values);
    }

    #[test]
    fn roundtrip_f64_bits(value in finite_f64()) {
        let (adapter, _) = memory_adapter();

        adapter.save(Some(&value), None).unwrap();
        let loaded: f64 = adapter.load(None).unwrap();

        prop_assert_eq!(loaded.to_bits(), value.to_bits());
    }

    #[test]
    fn roundtrip_f32_bits(value in finite_f32()) {
        let (adapter, _) = memory_adapter();

        adapter.save(Some(&value), None).unwrap();
        let loaded: f32 = adapter.load(None).unwrap();

        prop_assert_eq!(loaded.to_bits(), value.to_bits());
    }

    #[test]
    fn save_none_leaves_key_absent(record in record_strategy(), key in "[a-z]{1,8}") {
        let (adapter, store) = memory_adapter();

        adapter.save(Some(&record), Some(&key)).unwrap();
        adapter.save::<Record>(None, Some(&key)).unwrap();

        prop_assert!(store.is_empty());
        prop_assert!(adapter.load::<Record>(Some(&key)).is_err_and(|e| e.is_not_found()));
    }
}
