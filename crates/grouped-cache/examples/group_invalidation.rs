use grouped_cache::prelude::*;

#[tokio::main]
async fn main() {
    let store = MemoryStore::new();
    let cache = GroupCacheProvider::new(store.clone(), ProviderConfig::with_schema("shop"));

    // users:1 is listed by both the users and admins catalogs
    println!("Setting users:1 = Alice (users, admins)");
    cache.set(&["users", "admins"], "users", "1", &"Alice", 300).await;

    println!("Setting users:2 = Bob (users)");
    cache.set(&["users"], "users", "2", &"Bob", 300).await;

    println!("Setting products:1 = Laptop (products)");
    cache.set(&["products"], "products", "1", &"Laptop", 0).await;

    println!("\nadmins catalog: {:?}", cache.catalog_members("admins").await);
    println!("users catalog:  {:?}", cache.catalog_members("users").await);

    println!("\nInvalidating admins group...");
    let removed = cache.invalidate_group(&["admins"]).await;
    println!("Removed anything: {}", removed);

    let alice: Option<String> = cache.get("users", "1", None).await;
    let bob: Option<String> = cache.get("users", "2", None).await;
    let laptop: Option<String> = cache.get("products", "1", None).await;

    println!("users:1 = {:?}", alice);
    println!("users:2 = {:?}", bob);
    println!("products:1 = {:?}", laptop);

    assert_eq!(alice, None);
    assert_eq!(bob, Some("Bob".to_string()));
    assert_eq!(laptop, Some("Laptop".to_string()));

    println!("\nFlushing everything...");
    cache.invalidate_all().await;
    println!("Keys left: {}", store.len());

    let stats = store.stats();
    println!(
        "\nStore stats: {} writes, {} hits, {} misses, {} deletes",
        stats.writes, stats.hits, stats.misses, stats.deletes
    );
}
