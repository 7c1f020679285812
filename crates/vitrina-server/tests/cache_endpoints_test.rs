mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use vitrina_cache::{CacheConfig, TtlCache};

use helpers::{client_with_cache, seeded_cache};

#[tokio::test]
async fn stats_lists_sorted_keys() {
    let (cache, _) = seeded_cache();
    cache.get("admin:Role:1:10::::");
    cache.get("admin:Missing:1:10::::");

    let response = client_with_cache(cache).get("/cache/stats").await;
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["size"], 5);
    assert_eq!(body["keys"][0], "admin:Role:1:10::::");
    assert_eq!(body["keys"][4], "catalog:1:24::Marca::::precio_asc");
    assert_eq!(body["hits"], 1);
    assert_eq!(body["misses"], 1);
    assert_eq!(body["hit_rate"], 0.5);
}

#[tokio::test]
async fn stats_include_expired_until_swept() {
    let (cache, clock) = seeded_cache();
    cache.set_with_ttl("admin:Tmp:1:10::::", json!(1), Duration::from_secs(1));
    clock.advance(Duration::from_secs(2));

    let client = client_with_cache(cache.clone());
    assert_eq!(client.get("/cache/stats").await.json()["size"], 6);

    cache.purge_expired();
    assert_eq!(client.get("/cache/stats").await.json()["size"], 5);
}

#[tokio::test]
async fn clear_invalidates_everything() {
    let (cache, _) = seeded_cache();
    let client = client_with_cache(cache.clone());

    let response = client.delete("/cache").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["invalidated"], 5);

    assert!(cache.is_empty());
}

#[tokio::test]
async fn delete_key_returns_404_when_absent() {
    let (cache, _) = seeded_cache();
    let client = client_with_cache(cache.clone());

    let response = client.delete("/cache/keys/admin:User:1:10::::").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["invalidated"], 1);
    assert!(cache.get("admin:User:1:10::::").is_none());

    let response = client.delete("/cache/keys/admin:User:1:10::::").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Not Found");
}

#[tokio::test]
async fn delete_key_decodes_percent_encoding() {
    let cache: TtlCache<serde_json::Value> = TtlCache::new(CacheConfig::default());
    cache.set("admin:User:1:10:a%3Ab:::", json!(1));
    let client = client_with_cache(cache.clone());

    client
        .delete("/cache/keys/admin:User:1:10:a%253Ab:::")
        .await
        .assert_status(StatusCode::OK);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn resource_invalidation_is_scoped() {
    let (cache, _) = seeded_cache();
    let client = client_with_cache(cache.clone());

    let response = client.delete("/cache/resources/Role").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["invalidated"], 2);

    assert!(cache.get("admin:RoleGroup:1:10::::").is_some());
    assert!(cache.get("admin:User:1:10::::").is_some());
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn pattern_invalidation() {
    let (cache, _) = seeded_cache();
    let client = client_with_cache(cache.clone());

    let response = client
        .post_json(
            "/cache/invalidate",
            &json!({ "patterns": ["^catalog:", "^admin:User:"] }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["invalidated"], 2);
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn invalid_pattern_returns_400_and_keeps_entries() {
    let (cache, _) = seeded_cache();
    let client = client_with_cache(cache.clone());

    let response = client
        .post_json("/cache/invalidate", &json!({ "patterns": ["^admin:", "(("] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Bad Request");
    assert_eq!(cache.len(), 5);
}

#[tokio::test]
async fn empty_pattern_list_is_rejected() {
    let (cache, _) = seeded_cache();

    client_with_cache(cache)
        .post_json("/cache/invalidate", &json!({ "patterns": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
