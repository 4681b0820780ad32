use grouped_cache::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Reads GROUPED_CACHE_REDIS_* variables, defaulting to 127.0.0.1:6379 db 0
    let redis = RedisConfig::from_env()
        .read_timeout(Duration::from_millis(500))
        .retries(2);

    println!("Connecting to Redis at {}", redis.url());

    let (cache, status) =
        GroupCacheProvider::connect(redis, ProviderConfig::with_schema("example")).await;

    if !status.enabled {
        eprintln!(
            "Redis unavailable ({}), caching is disabled",
            status
                .error
                .map(|e| e.to_string())
                .unwrap_or_default()
        );
        println!("Make sure Redis is running or set GROUPED_CACHE_REDIS_HOST");

        // Calls still succeed as no-ops
        let fallback: String = cache.get("greetings", "hello", "default".to_string()).await;
        println!("get on disabled provider: {}", fallback);
        return;
    }

    cache
        .set(&["greetings"], "greetings", "hello", &"world", 300)
        .await;
    let value: String = cache.get("greetings", "hello", String::new()).await;
    println!("greetings:hello = {}", value);

    cache
        .set(&["users", "admins"], "users", "1", &"sachin", 300)
        .await;
    println!("admins catalog: {:?}", cache.catalog_members("admins").await);

    let removed = cache.invalidate_group(&["admins", "greetings"]).await;
    println!("Invalidated admins and greetings: {}", removed);

    let after: Option<String> = cache.get("users", "1", None).await;
    println!("users:1 after invalidation = {:?}", after);

    // Scratch work in another logical database
    if cache.select(1).await {
        cache.set(&[], "", "scratch", &1, 10).await;
        cache.invalidate_all().await;
        cache.select(0).await;
    }
}
