use grouped_cache::prelude::*;
use grouped_cache::TracingMetrics;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // TRACE shows per-operation latency events as well as sweeps
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let metrics = TracingMetrics::new().with_service_name("example-service");

    // Sweep on every catalog write so the GC events show up
    let config = ProviderConfig::with_schema("app").gc_policy(GcPolicy::Always);
    let cache = GroupCacheProvider::with_serializer_and_metrics(
        MemoryStore::new(),
        JsonSerializer,
        metrics,
        config,
    );

    println!("\nSetting value...");
    cache.set(&["users"], "users", "1", &"Alice", 60).await;

    println!("\nGetting value (hit)...");
    let hit: Option<String> = cache.get("users", "1", None).await;
    println!("   Got: {:?}", hit);

    println!("\nGetting missing value (miss)...");
    let miss: Option<String> = cache.get("users", "99", None).await;
    println!("   Got: {:?}", miss);

    println!("\nInvalidating group...");
    cache.invalidate_group(&["users"]).await;

    println!("\nCheck the console output for structured logs");
}
