#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ringkv::{MemoryStorage, StorageConfig};
use std::collections::HashMap;

#[derive(Arbitrary, Debug)]
enum StorageOp {
    Store { key: Vec<u8>, value: Vec<u8> },
    Set { key: Vec<u8>, value: Vec<u8> },
    Get { key: Vec<u8> },
    Has { key: Vec<u8> },
    Remove { key: Vec<u8> },
    Count,
}

fuzz_target!(|ops: Vec<StorageOp>| {
    // Bounded engine: occupancy may never exceed capacity, and whatever
    // `has` reports as live must resolve through `get`.
    let bounded = MemoryStorage::new(StorageConfig::bounded(8));

    // Unbounded engine: without eviction, get/has must agree with a plain
    // map model (count intentionally not compared; duplicate stores keep
    // unindexed slots alive).
    let unbounded = MemoryStorage::new(StorageConfig::unbounded());
    let mut model: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

    for op in ops.iter().take(100) {
        match op {
            StorageOp::Store { key, value } | StorageOp::Set { key, value } => {
                if key.is_empty() || key.len() > 64 || value.len() > 64 {
                    continue;
                }
                match op {
                    StorageOp::Store { .. } => {
                        bounded.store(key, value).unwrap();
                        unbounded.store(key, value).unwrap();
                    }
                    _ => {
                        bounded.set(key, value).unwrap();
                        unbounded.set(key, value).unwrap();
                    }
                }
                model.insert(key.clone(), value.clone());
            }
            StorageOp::Get { key } => {
                let _ = bounded.get(key);
                if !key.is_empty() {
                    assert_eq!(unbounded.get(key).unwrap(), model.get(key).cloned());
                }
            }
            StorageOp::Has { key } => {
                let _ = bounded.has(key);
                if !key.is_empty() {
                    assert_eq!(unbounded.has(key).unwrap(), model.contains_key(key));
                }
            }
            StorageOp::Remove { key } => {
                if key.is_empty() {
                    continue;
                }
                bounded.remove(key).unwrap();
                unbounded.remove(key).unwrap();
                model.remove(key);
            }
            StorageOp::Count => {
                assert!(bounded.count().unwrap() <= 8);
            }
        }

        // Liveness must be coherent after every operation
        if let StorageOp::Store { key, .. } | StorageOp::Set { key, .. } = op {
            if !key.is_empty() && key.len() <= 64 {
                assert!(bounded.get(key).unwrap().is_some() || !bounded.has(key).unwrap());
            }
        }
    }
});
