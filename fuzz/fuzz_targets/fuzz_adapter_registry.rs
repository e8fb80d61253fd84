#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ringkv::{MemoryAdapter, StorageOptions};

#[derive(Arbitrary, Debug)]
struct RegistryInput {
    names: Vec<String>,
    capacities: Vec<u16>,
    connect_first: bool,
}

fuzz_target!(|input: RegistryInput| {
    let adapter = MemoryAdapter::default();
    if input.connect_first {
        let _ = adapter.connect();
    }

    for (i, name) in input.names.iter().take(32).enumerate() {
        if name.len() > 64 {
            continue;
        }

        let options = input
            .capacities
            .get(i)
            .map(|&capacity| StorageOptions::capacity(capacity as usize));

        let first = adapter.storage(name, options).unwrap();
        let second = adapter.storage(name, Some(StorageOptions::infinite())).unwrap();

        // Registry hits share state and keep the creation-time config
        assert_eq!(first.config(), second.config());
        first.store(b"probe", b"value").unwrap();
        assert_eq!(second.get(b"probe").unwrap(), Some(b"value".to_vec()));
    }

    let _ = adapter.reset();
    let _ = adapter.disconnect();
});
