use ringkv::{MemoryAdapter, StorageOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== RingKV Eviction Demo ===\n");

    let adapter = MemoryAdapter::default();
    adapter.connect()?;

    // Bounded storage: five slots, then the cursor wraps
    let recent = adapter.storage("recent", Some(StorageOptions::capacity(5)))?;
    for i in 0..8u32 {
        recent.store(format!("event:{i}").as_bytes(), b"...")?;
    }

    println!("stored 8 events into a 5-slot storage");
    println!("count = {}", recent.count()?);
    for i in 0..8u32 {
        let key = format!("event:{i}");
        println!("  has({key}) = {}", recent.has(key.as_bytes())?);
    }

    // Unbounded storage: same writes, nothing evicted
    let archive = adapter.storage("archive", Some(StorageOptions::infinite()))?;
    for i in 0..8u32 {
        archive.store(format!("event:{i}").as_bytes(), b"...")?;
    }
    println!("\nunbounded archive count = {}", archive.count()?);

    Ok(())
}
