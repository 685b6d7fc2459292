//! lru_ttl demo driver
//!
//! Walks a small cache through inserts with staggered TTLs, reads,
//! an overwrite, and capacity eviction, printing what happens.

use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl::{CacheConfig, CacheStats, LruCache};

/// Capacity used by the walkthrough, small enough to force evictions.
const DEMO_CAPACITY: usize = 3;

/// Final report printed as JSON.
#[derive(Debug, Serialize)]
struct DemoReport {
    generated_at: String,
    capacity: usize,
    recency_order: Vec<String>,
    stats: CacheStats,
    hit_rate: f64,
}

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig {
        capacity: DEMO_CAPACITY,
        ..CacheConfig::from_env().context("failed to load cache configuration")?
    };
    info!(
        "Configuration loaded: capacity={}, default_ttl={:?}",
        config.capacity, config.default_ttl_secs
    );

    let mut cache: LruCache<String, u64> =
        LruCache::from_config(&config).context("failed to build cache")?;

    // Key i lives for i seconds; "0" and "1" are evicted by capacity
    for i in 0..5u64 {
        if let Some((key, _)) = cache.set(i.to_string(), i, Some(Duration::from_secs(i))) {
            info!("set {} evicted {}", i, key);
        }
    }

    for i in 0..5u64 {
        let key = i.to_string();
        println!("get {:>2} -> {:?}", key, cache.get(&key));
    }

    cache.set("2".to_string(), 1, None);
    println!("get  3 -> {:?}", cache.get("3"));

    let recency_order: Vec<String> = cache.keys().cloned().collect();
    println!("recency order (MRU -> LRU): {}", recency_order.join(" -> "));

    let stats = cache.stats();
    let report = DemoReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        capacity: cache.capacity(),
        recency_order,
        hit_rate: stats.hit_rate(),
        stats,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    Ok(())
}
