//! End-to-end tests for the health query and invocation counters.

use std::sync::Arc;
use std::time::Duration;

use bolt_runtime::invoke::error::HandlerError;
use bolt_runtime::{HandlerRegistry, InvocationRequest};
use serde_json::{json, Value};

mod common;

const ID_HEADER: &str = "x-binaris-request-id";

#[tokio::test]
async fn health_queries_do_not_count_themselves() {
    let addr = common::spawn_runtime("echo", HandlerRegistry::with_builtins()).await;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        let res = client
            .get(format!("http://{addr}/_healthy"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({"concurrency": 0, "request_count": 0})
        );
    }
}

#[tokio::test]
async fn rejected_calls_count_toward_request_count_with_no_concurrency_leak() {
    let addr = common::spawn_runtime("echo", HandlerRegistry::with_builtins()).await;
    let client = reqwest::Client::new();

    // Two accepted calls, one rejected (no tracking id).
    for id in [Some("r-1"), Some("r-2"), None] {
        let mut req = client.post(format!("http://{addr}/v1/run"));
        if let Some(id) = id {
            req = req.header(ID_HEADER, id);
        }
        req.send().await.unwrap();
    }

    let health = client
        .get(format!("http://{addr}/_healthy"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(health, json!({"concurrency": 0, "request_count": 3}));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_invocations_show_up_in_concurrency() {
    let mut registry = HandlerRegistry::new();
    registry.register(
        "slow",
        Arc::new(
            |_: Option<Value>, _: &InvocationRequest| -> Result<Value, HandlerError> {
                std::thread::sleep(Duration::from_millis(600));
                Ok(json!("done"))
            },
        ),
    );
    let addr = common::spawn_runtime("slow", registry).await;
    let client = reqwest::Client::new();

    let slow_client = client.clone();
    let slow = tokio::spawn(async move {
        slow_client
            .post(format!("http://{addr}/v1/run"))
            .header(ID_HEADER, "slow-1")
            .send()
            .await
            .unwrap()
    });

    // Let the slow invocation get in flight before sampling.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let health = client
        .get(format!("http://{addr}/_healthy"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(health["concurrency"], 1);
    assert_eq!(health["request_count"], 1);

    let res = slow.await.unwrap();
    assert_eq!(res.status(), 200);

    let health = client
        .get(format!("http://{addr}/_healthy"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(health["concurrency"], 0);
    assert_eq!(health["request_count"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrency_returns_to_zero_after_a_burst() {
    let mut registry = HandlerRegistry::new();
    registry.register(
        "mixed",
        Arc::new(
            |payload: Option<Value>, _: &InvocationRequest| -> Result<Value, HandlerError> {
                std::thread::sleep(Duration::from_millis(50));
                match payload {
                    Some(value) => Ok(value),
                    None => Err("no payload".into()),
                }
            },
        ),
    );
    let addr = common::spawn_runtime("mixed", registry).await;
    let client = reqwest::Client::new();

    let mut joins = Vec::new();
    for n in 0..10u32 {
        let client = client.clone();
        joins.push(tokio::spawn(async move {
            let mut req = client
                .post(format!("http://{addr}/v1/run"))
                .header(ID_HEADER, format!("burst-{n}"));
            // Half succeed, half fail in the handler.
            if n % 2 == 0 {
                req = req.body(format!("{n}"));
            }
            req.send().await.unwrap().status()
        }));
    }

    let mut ok = 0;
    let mut failed = 0;
    for join in joins {
        match join.await.unwrap().as_u16() {
            200 => ok += 1,
            500 => failed += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(ok, 5);
    assert_eq!(failed, 5);

    let health = client
        .get(format!("http://{addr}/_healthy"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(health, json!({"concurrency": 0, "request_count": 10}));
}
