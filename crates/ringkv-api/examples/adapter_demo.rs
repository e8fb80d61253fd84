use ringkv::MemoryAdapter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== RingKV Adapter Demo ===\n");

    let adapter = MemoryAdapter::default();

    println!("1. Connecting...");
    let handle = adapter.connect()?;
    println!("   connected via '{}' backend", handle.backend());

    println!("\n2. Opening the 'users' storage...");
    let users = adapter.storage("users", None)?;

    println!("\n3. Storing entries...");
    users.store(b"user:1", b"Alice")?;
    users.store(b"user:2", b"Bob")?;
    println!("   count = {}", users.count()?);

    println!("\n4. Updating in place...");
    users.set(b"user:1", b"Alice Cooper")?;
    if let Some(name) = users.get(b"user:1")? {
        println!("   user:1 = {}", String::from_utf8_lossy(&name));
    }

    println!("\n5. Removing...");
    users.remove(b"user:2")?;
    println!("   has(user:2) = {}", users.has(b"user:2")?);

    let stats = users.stats();
    println!(
        "\n6. Stats: {} occupied / {} allocated slots, {} free, capacity {}",
        stats.occupied, stats.allocated, stats.free_slots, stats.capacity
    );

    adapter.disconnect()?;
    println!("\n=== Demo Complete ===");

    Ok(())
}
