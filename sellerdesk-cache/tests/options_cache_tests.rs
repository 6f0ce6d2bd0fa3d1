use pretty_assertions::assert_eq;
use sellerdesk_cache::{CacheConfig, OptionsCache};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn countries() -> Vec<String> {
    vec!["DE".to_string(), "FR".to_string(), "US".to_string()]
}

async fn load_countries(calls: &AtomicUsize) -> Result<Vec<String>, String> {
    calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(countries())
}

// ── Loading ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn loads_once_and_reuses() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    let first = cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    let second = cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();

    assert_eq!(*first, countries());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_load() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    let (a, b, c) = tokio::join!(
        cache.get_or_load("countries", || load_countries(&calls)),
        cache.get_or_load("countries", || load_countries(&calls)),
        cache.get_or_load("countries", || load_countries(&calls)),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let a = a.unwrap();
    assert!(Arc::ptr_eq(&a, &b.unwrap()));
    assert!(Arc::ptr_eq(&a, &c.unwrap()));
}

#[tokio::test(start_paused = true)]
async fn distinct_keys_load_separately() {
    let cache: OptionsCache<String, usize> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    for key in ["warehouses", "carriers", "warehouses"] {
        cache
            .get_or_load(key.to_string(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(key.len())
            })
            .await
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.peek(&"carriers".to_string()).await.as_deref(), Some(&8));
}

// ── Failures ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn failed_load_is_not_cached() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    let err = cache
        .get_or_load("countries", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<Vec<String>, _>("upstream unavailable".to_string())
        })
        .await
        .unwrap_err();
    assert_eq!(err, "upstream unavailable");
    assert!(cache.peek(&"countries").await.is_none());

    let value = cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    assert_eq!(*value, countries());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ── Invalidation ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn invalidate_forces_reload() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    assert!(cache.invalidate(&"countries").await);
    assert!(!cache.invalidate(&"countries").await);
    assert!(cache.peek(&"countries").await.is_none());

    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn clear_drops_everything() {
    let cache: OptionsCache<u32, u32> = OptionsCache::default();
    for key in 0..3 {
        cache
            .get_or_load(key, || async move { Ok::<_, ()>(key * 10) })
            .await
            .unwrap();
    }
    assert_eq!(cache.len().await, 3);

    cache.clear().await;
    assert!(cache.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn peek_does_not_load() {
    let cache: OptionsCache<&str, u32> = OptionsCache::default();
    assert!(cache.peek(&"missing").await.is_none());
    assert!(cache.is_empty().await);
}

// ── Expiry ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn entries_expire_after_max_age() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::new(CacheConfig {
        max_age: Some(Duration::from_secs(60)),
    });
    let calls = AtomicUsize::new(0);

    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(cache.peek(&"countries").await.is_some());
    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(31)).await;
    assert!(cache.peek(&"countries").await.is_none());
    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn entries_never_expire_without_max_age() {
    let cache: OptionsCache<&str, Vec<String>> = OptionsCache::default();
    let calls = AtomicUsize::new(0);

    cache
        .get_or_load("countries", || load_countries(&calls))
        .await
        .unwrap();
    tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;
    assert!(cache.peek(&"countries").await.is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
