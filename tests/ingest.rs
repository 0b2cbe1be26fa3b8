//! End-to-end ingestion tests: HTTP accept -> buffer -> drain -> rows

use alert_relay::config::Config;
use alert_relay::db::SqliteDb;
use alert_relay::drainer::BatchDrainer;
use alert_relay::error::{AppError, Result};
use alert_relay::forwarder::{ExchangeApi, Forwarder};
use alert_relay::models::Alert;
use alert_relay::queue::AlertQueue;
use alert_relay::server;
use alert_relay::state::AppState;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Exchange double that records calls and optionally fails every one
struct FakeExchange {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl ExchangeApi for FakeExchange {
    async fn submit(&self, alert: &Alert) -> Result<()> {
        self.calls.lock().push(alert.symbol.clone());
        if self.fail {
            Err(AppError::Internal("Trading API returned 500".to_string()))
        } else {
            Ok(())
        }
    }
}

struct Harness {
    _dir: TempDir,
    app: Router,
    queue: Arc<AlertQueue>,
    db: Arc<SqliteDb>,
    exchange: Arc<FakeExchange>,
}

fn harness(fail_forwarding: bool) -> Harness {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Arc::new(SqliteDb::new(&db_path).unwrap());
    let queue = Arc::new(AlertQueue::new());
    let exchange = Arc::new(FakeExchange {
        calls: Mutex::new(Vec::new()),
        fail: fail_forwarding,
    });

    let state = Arc::new(AppState {
        sqlite: Arc::clone(&db),
        queue: Arc::clone(&queue),
        forwarder: Forwarder::new(exchange.clone() as Arc<dyn ExchangeApi>),
        config: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: PathBuf::from(&db_path),
            exchange_api_url: "http://localhost:0".to_string(),
            exchange_timeout: Duration::from_secs(5),
            max_batch_size: 100,
            drain_interval: Duration::from_secs(10),
            drain_on_start: false,
        },
    });

    Harness {
        _dir: dir,
        app: server::router(state),
        queue,
        db,
        exchange,
    }
}

fn post_alert(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/alert")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_up() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Server is up");
}

#[tokio::test]
async fn valid_alert_is_acknowledged_and_buffered() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(post_alert(r#"{"symbol":"BTC","action":"open"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Request received");
    assert_eq!(h.queue.len(), 1);
}

#[tokio::test]
async fn coin_field_is_accepted_for_the_instrument() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(post_alert(r#"{"coin":"ETH","action":"close"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(h.queue.len(), 1);
}

#[tokio::test]
async fn missing_action_is_rejected_and_never_buffered() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(post_alert(r#"{"symbol":"BTC"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(h.queue.is_empty());
}

#[tokio::test]
async fn unknown_action_is_rejected_and_never_buffered() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(post_alert(r#"{"symbol":"BTC","action":"hold"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(h.queue.is_empty());
}

#[tokio::test]
async fn missing_symbol_is_rejected() {
    let h = harness(false);

    let response = h
        .app
        .oneshot(post_alert(r#"{"action":"open"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(h.queue.is_empty());
}

#[tokio::test]
async fn accepted_alert_survives_a_drain_cycle() {
    let h = harness(false);

    let response = h
        .app
        .clone()
        .oneshot(post_alert(r#"{"symbol":"BTC","action":"open"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let drainer = BatchDrainer::new(
        Arc::clone(&h.queue),
        Arc::clone(&h.db),
        100,
        Duration::from_secs(10),
        false,
    );
    assert_eq!(drainer.drain_cycle().unwrap(), 1);

    assert_eq!(h.db.count_alerts().unwrap(), 1);
    let trade = h.db.get_trade_by_symbol("BTC").unwrap().unwrap();
    assert_eq!(trade.status, "open");
}

#[tokio::test]
async fn forwarding_failure_never_affects_ingestion_or_persistence() {
    let h = harness(true);

    let response = h
        .app
        .clone()
        .oneshot(post_alert(r#"{"symbol":"BTC","action":"open"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // The forwarding task runs detached; wait for it to have fired.
    for _ in 0..50 {
        if !h.exchange.calls.lock().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(*h.exchange.calls.lock(), vec!["BTC".to_string()]);

    let drainer = BatchDrainer::new(
        Arc::clone(&h.queue),
        Arc::clone(&h.db),
        100,
        Duration::from_secs(10),
        false,
    );
    assert_eq!(drainer.drain_cycle().unwrap(), 1);
    assert_eq!(h.db.count_alerts().unwrap(), 1);
    assert_eq!(h.db.count_trades().unwrap(), 1);
}

#[tokio::test]
async fn ingestion_order_is_preserved_through_drain() {
    let h = harness(false);

    for (symbol, action) in [("AAA", "open"), ("BBB", "open"), ("AAA", "close")] {
        let body = format!(r#"{{"symbol":"{}","action":"{}"}}"#, symbol, action);
        let response = h.app.clone().oneshot(post_alert(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let drainer = BatchDrainer::new(
        Arc::clone(&h.queue),
        Arc::clone(&h.db),
        100,
        Duration::from_secs(10),
        false,
    );
    assert_eq!(drainer.drain_cycle().unwrap(), 3);

    // Three raw alerts, two trades; AAA reflects the later close.
    assert_eq!(h.db.count_alerts().unwrap(), 3);
    assert_eq!(h.db.count_trades().unwrap(), 2);
    let aaa = h.db.get_trade_by_symbol("AAA").unwrap().unwrap();
    assert_eq!(aaa.status, "close");
}
