use ringkv::logging::LogConfig;
use ringkv::{MemoryAdapter, StorageOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (debug level so eviction events are visible)
    let _guard = LogConfig::debug().init();

    println!("=== RingKV Logging Demo ===\n");

    let adapter = MemoryAdapter::default();

    // Logs "memory adapter connected"
    adapter.connect()?;

    // Logs "registering storage"
    let cache = adapter.storage("cache", Some(StorageOptions::capacity(3)))?;

    println!("\n1. Filling the storage...");
    cache.store(b"a", b"1")?;
    cache.store(b"b", b"2")?;
    cache.store(b"c", b"3")?;

    println!("\n2. Overflowing it - watch for eviction debug events...");
    cache.store(b"d", b"4")?;
    cache.store(b"e", b"5")?;

    println!("\n3. Disconnecting...");
    adapter.disconnect()?;

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");

    Ok(())
}
