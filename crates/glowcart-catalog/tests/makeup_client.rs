//! Integration tests for `MakeupClient` aggregation and `CatalogBrowser`.
//!
//! Each test stands up a local `wiremock` server, so no real network traffic
//! is made.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glowcart_catalog::{
    BrowseQuery, CatalogBrowser, CatalogError, CategoryFilter, LoadOutcome, MakeupClient,
    LOAD_ERROR_MESSAGE,
};
use glowcart_core::Category;

/// Test client: 5-second timeout, no retries.
fn test_client(server: &MockServer) -> MakeupClient {
    MakeupClient::new(&server.uri(), 5, "glowcart-test/0.1", 0, 0)
        .expect("failed to build test MakeupClient")
}

fn record(id: i64, name: &str, product_type: &str) -> serde_json::Value {
    json!({
        "id": id,
        "brand": "maybelline",
        "name": name,
        "price": "9.99",
        "image_link": format!("http://cdn.example.com/{id}.jpg"),
        "product_type": product_type
    })
}

/// Any list request not matched by a more specific mock returns `[]`.
async fn mount_empty_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

async fn mount_type(server: &MockServer, product_type: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("product_type", product_type))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .with_priority(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// fetch_by_types
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_by_types_merges_and_dedupes() {
    let server = MockServer::start().await;
    mount_type(
        &server,
        "mascara",
        json!([record(1, "Lash Sensational", "mascara"), record(2, "Falsies", "mascara")]),
    )
    .await;
    mount_type(
        &server,
        "eyeliner",
        json!([record(2, "Falsies Liner", "eyeliner"), record(3, "Master Precise", "eyeliner")]),
    )
    .await;

    let products = test_client(&server)
        .fetch_by_types(&["mascara", "eyeliner"], None)
        .await
        .unwrap();

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let dup = products.iter().find(|p| p.id == 2).unwrap();
    assert_eq!(dup.name, "Falsies Liner", "later record should win");
    assert!(products
        .iter()
        .all(|p| p.image.as_deref().is_some_and(|i| i.starts_with("https://"))));
}

#[tokio::test]
async fn fetch_by_types_forwards_trimmed_name_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("product_type", "lipstick"))
        .and(query_param("product_name", "red"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([record(9, "Red Revival", "lipstick")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_by_types(&["lipstick"], Some("  red "))
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, Category::Lips);
}

#[tokio::test]
async fn fetch_by_types_fails_whole_batch_when_one_type_fails() {
    let server = MockServer::start().await;
    mount_type(&server, "mascara", json!([record(1, "Lash", "mascara")])).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("product_type", "eyebrow"))
        .respond_with(ResponseTemplate::new(503))
        .with_priority(1)
        .mount(&server)
        .await;

    let result = test_client(&server)
        .fetch_by_types(&["mascara", "eyebrow"], None)
        .await;

    assert!(
        matches!(result, Err(CatalogError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_by_types_reports_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_by_types(&["primer"], None).await;
    assert!(matches!(result, Err(CatalogError::Deserialize { .. })));
}

#[tokio::test]
async fn fetch_by_types_retries_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_type(&server, "blush", json!([record(4, "Fit Me Blush", "blush")])).await;

    let client = MakeupClient::new(&server.uri(), 5, "glowcart-test/0.1", 2, 0).unwrap();
    let products = client.fetch_by_types(&["blush"], None).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, Category::Skin);
}

#[tokio::test]
async fn rate_limit_waits_at_least_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_type(&server, "bronzer", json!([record(8, "Sun Bronzer", "bronzer")])).await;

    let client = MakeupClient::new(&server.uri(), 5, "glowcart-test/0.1", 2, 0).unwrap();
    let started = std::time::Instant::now();
    let products = client.fetch_by_types(&["bronzer"], None).await.unwrap();
    assert_eq!(products.len(), 1);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn rate_limit_with_long_retry_after_fails_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "120"))
        .expect(1)
        .mount(&server)
        .await;

    let client = MakeupClient::new(&server.uri(), 5, "glowcart-test/0.1", 2, 0).unwrap();
    let result = client.fetch_by_types(&["bronzer"], None).await;
    assert!(matches!(
        result,
        Err(CatalogError::RateLimited {
            retry_after_secs: 120
        })
    ));
}

// ---------------------------------------------------------------------------
// fetch_products_by_category / fetch_all_categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_by_category_queries_every_type_tag() {
    let server = MockServer::start().await;
    for tag in Category::Lips.type_tags() {
        Mock::given(method("GET"))
            .and(path("/products.json"))
            .and(query_param("product_type", *tag))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let products = test_client(&server)
        .fetch_products_by_category(Category::Lips, None)
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_all_categories_has_no_duplicate_ids() {
    let server = MockServer::start().await;
    mount_empty_fallback(&server).await;
    // Product 7 is returned under an eyes tag and a skin tag.
    mount_type(&server, "eyeshadow", json!([record(7, "Palette", "eyeshadow")])).await;
    mount_type(
        &server,
        "highlighter",
        json!([record(7, "Palette", "highlighter"), record(8, "Glow", "highlighter")]),
    )
    .await;
    mount_type(&server, "nail_polish", json!([record(9, "Gel", "nail_polish")])).await;

    let products = test_client(&server).fetch_all_categories(None).await.unwrap();

    let mut ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![7, 8, 9]);
}

// ---------------------------------------------------------------------------
// fetch_product_by_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_by_id_normalizes_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/42.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "name": "Sky High",
                "price": null,
                "image_link": "",
                "product_type": "mascara"
            })),
        )
        .mount(&server)
        .await;

    let product = test_client(&server).fetch_product_by_id(42).await.unwrap();
    assert_eq!(product.name, "Sky High");
    assert!(product.price_usd.abs() < f64::EPSILON);
    assert!(product.image.is_none());
    assert_eq!(product.category, Category::Eyes);
}

#[tokio::test]
async fn fetch_product_by_id_404_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/404.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(test_client(&server).fetch_product_by_id(404).await.is_none());
}

#[tokio::test]
async fn fetch_product_by_id_server_error_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/5.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(test_client(&server).fetch_product_by_id(5).await.is_none());
}

// ---------------------------------------------------------------------------
// CatalogBrowser
// ---------------------------------------------------------------------------

#[tokio::test]
async fn browser_load_failure_leaves_empty_listing_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let browser = CatalogBrowser::new(test_client(&server));
    let outcome = browser.load(&BrowseQuery::default()).await;

    assert_eq!(outcome, LoadOutcome::Applied);
    let state = browser.state();
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
}

#[tokio::test]
async fn browser_load_drops_products_without_images() {
    let server = MockServer::start().await;
    mount_empty_fallback(&server).await;
    mount_type(
        &server,
        "nail_polish",
        json!([
            record(1, "Gel Red", "nail_polish"),
            {"id": 2, "name": "No Picture", "price": "3.00", "image_link": null, "product_type": "nail_polish"}
        ]),
    )
    .await;

    let browser = CatalogBrowser::new(test_client(&server));
    let query = BrowseQuery {
        filter: CategoryFilter::Only(Category::Nails),
        search: String::new(),
    };
    browser.load(&query).await;

    let state = browser.state();
    assert!(state.error.is_none());
    let ids: Vec<i64> = state.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn browser_discards_superseded_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("product_name", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([record(1, "slow result", "mascara")]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("product_name", "fast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([record(2, "fast result", "mascara")])),
        )
        .mount(&server)
        .await;

    let browser = Arc::new(CatalogBrowser::new(test_client(&server)));
    let eyes = |search: &str| BrowseQuery {
        filter: CategoryFilter::Only(Category::Eyes),
        search: search.to_owned(),
    };

    let slow = {
        let browser = Arc::clone(&browser);
        let query = eyes("slow");
        tokio::spawn(async move { browser.load(&query).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast_outcome = browser.load(&eyes("fast")).await;
    let slow_outcome = slow.await.unwrap();

    assert_eq!(fast_outcome, LoadOutcome::Applied);
    assert_eq!(slow_outcome, LoadOutcome::Superseded);
    let ids: Vec<i64> = browser.state().items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}
