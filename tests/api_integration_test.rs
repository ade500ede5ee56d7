use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use wake_scraper::{build_app, ServiceConfig, UpstreamConfig};

const RESULTS_PAGE: &str = r#"
<html><body>
  <div class="wake-product">
    <h4>Buffalo Trace Bourbon</h4>
    <span class="price">$29.99</span>
    <span class="size">750ml</span>
    <small>12345</small>
    <div class="inventory-collapse">
      <ul>
        <li>
          <span class="address">123 Main St, Anytown, USA</span>
          <span class="quantity">5 in stock</span>
        </li>
        <li>
          <span class="address">8311 Brier Creek Pkwy<br>Raleigh, NC</span>
          <span class="quantity">0 in stock</span>
        </li>
      </ul>
    </div>
  </div>
  <div class="wake-product">
    <h4>Buffalo Trace Kentucky Cream</h4>
    <span class="price">$24.95</span>
    <span class="size">750ml</span>
    <small>67890</small>
  </div>
</body></html>
"#;

fn config_for(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        upstream: UpstreamConfig {
            endpoint: server.url("/search-results"),
            ..UpstreamConfig::default()
        },
        ..ServiceConfig::default()
    }
}

fn search_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_search_returns_products_envelope() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST)
            .path("/search-results")
            .body("productSearch=buffalo+trace");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(RESULTS_PAGE);
    });

    let app = build_app(&config_for(&server)).unwrap();
    let response = app
        .oneshot(search_request(json!({ "query": "buffalo trace" })))
        .await
        .unwrap();

    upstream.assert();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({
            "products": [
                {
                    "product_name": "Buffalo Trace Bourbon",
                    "product_price": "$29.99",
                    "product_size": "750ml",
                    "plu_number": "12345",
                    "inventory_data": [
                        { "store_address": "123 Main St, Anytown, USA", "quantity": "5" },
                        { "store_address": "8311 Brier Creek Pkwy\nRaleigh, NC", "quantity": "0" }
                    ]
                },
                {
                    "product_name": "Buffalo Trace Kentucky Cream",
                    "product_price": "$24.95",
                    "product_size": "750ml",
                    "plu_number": "67890",
                    "inventory_data": []
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_query_parameter_is_accepted_without_body() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/search-results").body("productSearch=tequila");
        then.status(200).body("<html><body></body></html>");
    });

    let app = build_app(&config_for(&server)).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/search?query=tequila")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    upstream.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "products": [] }));
}

#[tokio::test]
async fn test_upstream_failure_is_service_unavailable() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/search-results");
        then.status(502).body("bad gateway");
    });

    let app = build_app(&config_for(&server)).unwrap();
    let response = app
        .oneshot(search_request(json!({ "query": "scotch" })))
        .await
        .unwrap();

    upstream.assert();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to fetch data:"), "detail was {detail}");
}

#[tokio::test]
async fn test_unreachable_upstream_is_service_unavailable() {
    let config = ServiceConfig {
        upstream: UpstreamConfig {
            endpoint: "http://127.0.0.1:1/search-results".to_string(),
            ..UpstreamConfig::default()
        },
        ..ServiceConfig::default()
    };

    let app = build_app(&config).unwrap();
    let response = app
        .oneshot(search_request(json!({ "query": "rye" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_changed_markup_is_bad_gateway() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search-results");
        then.status(200)
            .body(r#"<div class="wake-product"><span class="price">$5</span></div>"#);
    });

    let app = build_app(&config_for(&server)).unwrap();
    let response = app
        .oneshot(search_request(json!({ "query": "vermouth" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("product_name"));
}

#[tokio::test]
async fn test_missing_or_malformed_query_is_rejected() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/search-results");
        then.status(200).body("");
    });

    let app = build_app(&config_for(&server)).unwrap();

    let missing = app.clone().oneshot(search_request(json!({}))).await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let not_a_string = app
        .clone()
        .oneshot(search_request(json!({ "query": 5 })))
        .await
        .unwrap();
    assert_eq!(not_a_string.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(not_a_string).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let malformed = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"query": "gin""#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let no_body = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(no_body.status(), StatusCode::UNPROCESSABLE_ENTITY);

    upstream.assert_hits(0);
}

#[tokio::test]
async fn test_empty_query_is_forwarded_upstream() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/search-results").body("productSearch=");
        then.status(200).body(RESULTS_PAGE);
    });

    let app = build_app(&config_for(&server)).unwrap();
    let response = app
        .oneshot(search_request(json!({ "query": "" })))
        .await
        .unwrap();

    upstream.assert();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_json_body_ignores_query_string() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/search-results").body("productSearch=gin");
        then.status(200).body("<html><body></body></html>");
    });

    let app = build_app(&config_for(&server)).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/search?query=a&query=b&utm_source=newsletter")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "query": "gin" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    upstream.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "products": [] }));
}

#[tokio::test]
async fn test_health() {
    let app = build_app(&ServiceConfig::default()).unwrap();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "wake-scraper");
}
