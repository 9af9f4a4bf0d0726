mod support;

use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::{spawn_mock_server, test_config};
use xtb_connect::{TradeStatus, XtbClient, XtbError};

#[tokio::test]
async fn login_runs_first_and_version_call_decodes() {
    let commands = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&commands);
    let url = spawn_mock_server(move |request| {
        let command = request["command"].as_str().unwrap().to_string();
        seen.lock().unwrap().push(command.clone());
        match command.as_str() {
            "login" => Some(r#"{"status":true}"#.to_string()),
            "getVersion" => {
                Some(r#"{"status":true,"returnData":{"version":"5.2"}}"#.to_string())
            }
            _ => Some(r#"{"status":true}"#.to_string()),
        }
    })
    .await;

    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    let version = client.get_version().await.unwrap();
    assert_eq!(version, "5.2");

    client.close().await.unwrap();

    let commands = commands.lock().unwrap();
    assert_eq!(commands[0], "login", "login must precede every other command");
    assert!(commands.contains(&"getVersion".to_string()));
}

#[tokio::test]
async fn api_error_carries_code_and_description() {
    let url = spawn_mock_server(|request| {
        if request["command"] == "login" {
            Some(r#"{"status":true}"#.to_string())
        } else {
            Some(r#"{"status":false,"errorCode":"BE001","errorDescr":"bad params"}"#.to_string())
        }
    })
    .await;

    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    match client.get_server_time().await {
        Err(XtbError::Api { code, message }) => {
            assert_eq!(code, "BE001");
            assert_eq!(message, "bad params");
        }
        other => panic!("expected api error, got {:?}", other),
    }
    client.close().await.unwrap();
}

#[tokio::test]
async fn login_failure_prevents_construction() {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);
    let url = spawn_mock_server(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(
            r#"{"status":false,"errorCode":"BE005","errorDescr":"invalid credentials"}"#
                .to_string(),
        )
    })
    .await;

    let result = XtbClient::connect(test_config(&url)).await;
    match result.err() {
        Some(XtbError::Api { code, .. }) => assert_eq!(code, "BE005"),
        other => panic!("expected api error, got {:?}", other),
    }

    // The socket was closed during teardown: nothing beyond the login
    // exchange ever reaches the server.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn streaming_login_without_session_token_is_fatal() {
    let url = spawn_mock_server(|request| {
        if request["command"] == "login" {
            // Authenticated, but no streamSessionId.
            Some(r#"{"status":true}"#.to_string())
        } else {
            Some(r#"{"status":true}"#.to_string())
        }
    })
    .await;

    let config = test_config(&url).with_streaming(true);
    let result = XtbClient::connect(config).await;
    assert!(matches!(result, Err(XtbError::Session(_))));
}

#[tokio::test]
async fn concurrent_callers_each_get_their_own_response() {
    // FIFO correlation: with the single-flight lock, each caller's read is
    // the direct answer to its own write even under concurrency. The server
    // echoes the command name so a mixed-up pairing would be visible.
    let url = spawn_mock_server(|request| {
        let command = request["command"].as_str().unwrap();
        if command == "login" {
            Some(r#"{"status":true}"#.to_string())
        } else {
            Some(json!({"status": true, "returnData": {"echo": command}}).to_string())
        }
    })
    .await;

    let client = Arc::new(XtbClient::connect(test_config(&url)).await.unwrap());

    let mut handles = Vec::new();
    for name in ["cmdA", "cmdB", "cmdC", "cmdD"] {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let reply: Value = client.call::<Value, Value>(name, None).await.unwrap();
            (name, reply)
        }));
    }

    for handle in handles {
        let (name, reply) = handle.await.unwrap();
        assert_eq!(reply["echo"], name);
    }
}

#[tokio::test]
async fn keep_alive_fires_once_per_interval_and_stops_on_close() {
    let pings = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pings);
    let url = spawn_mock_server(move |request| {
        if request["command"] == "ping" {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Some(r#"{"status":true}"#.to_string())
    })
    .await;

    let config = test_config(&url).keep_alive_interval(Duration::from_millis(100));
    let client = XtbClient::connect(config).await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(pings.load(Ordering::SeqCst), 1, "one interval, one ping");

    client.close().await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(
        pings.load(Ordering::SeqCst),
        1,
        "no pings after the client is closed"
    );
}

#[tokio::test]
async fn null_symbol_expiration_decodes_to_the_zero_time() {
    let url = spawn_mock_server(|request| match request["command"].as_str().unwrap() {
        "login" => Some(r#"{"status":true}"#.to_string()),
        "getSymbol" => Some(
            json!({
                "status": true,
                "returnData": {
                    "symbol": "EURUSD",
                    "expiration": null,
                    "time": 1389362640000_i64
                }
            })
            .to_string(),
        ),
        _ => Some(r#"{"status":true}"#.to_string()),
    })
    .await;

    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    let symbol = client.get_symbol("EURUSD").await.unwrap();
    assert_eq!(symbol.expiration, chrono::DateTime::UNIX_EPOCH);
    assert_eq!(symbol.symbol, "EURUSD");
    client.close().await.unwrap();
}

#[tokio::test]
async fn trade_transaction_status_decodes_the_coded_status() {
    let url = spawn_mock_server(|request| match request["command"].as_str().unwrap() {
        "login" => Some(r#"{"status":true}"#.to_string()),
        "tradeTransactionStatus" => {
            assert_eq!(request["arguments"]["order"], 43);
            Some(
                json!({
                    "status": true,
                    "returnData": {
                        "ask": 1.392,
                        "bid": 1.392,
                        "customComment": "hedge",
                        "message": null,
                        "order": 43,
                        "requestStatus": 3
                    }
                })
                .to_string(),
            )
        }
        _ => Some(r#"{"status":true}"#.to_string()),
    })
    .await;

    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    let status = client.get_trade_transaction_status(43).await.unwrap();
    assert_eq!(status.order, 43);
    assert_eq!(status.status, TradeStatus::Accepted);
    assert_eq!(status.custom_comment, "hedge");
    assert!(status.message.is_none());
    client.close().await.unwrap();
}

#[tokio::test]
async fn trade_transaction_lookup_converts_the_expiration() {
    let url = spawn_mock_server(|request| match request["command"].as_str().unwrap() {
        "login" => Some(r#"{"status":true}"#.to_string()),
        "tradeTransaction" => Some(
            json!({
                "status": true,
                "returnData": {
                    "tradeTransInfo": {
                        "cmd": 2,
                        "customComment": "",
                        "expiration": 1389362640000_i64,
                        "order": 7497776,
                        "price": 1.12,
                        "sl": 1.10,
                        "symbol": "EURUSD",
                        "tp": 1.15,
                        "type": 0,
                        "volume": 0.5
                    }
                }
            })
            .to_string(),
        ),
        _ => Some(r#"{"status":true}"#.to_string()),
    })
    .await;

    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    let info = client.get_trade_transaction(7497776).await.unwrap();
    assert_eq!(info.symbol, "EURUSD");
    assert_eq!(info.expiration.timestamp_millis(), 1_389_362_640_000);
    client.close().await.unwrap();
}

#[tokio::test]
async fn no_output_command_succeeds_with_unit_result() {
    let url = spawn_mock_server(|_| Some(r#"{"status":true}"#.to_string())).await;
    let client = XtbClient::connect(test_config(&url)).await.unwrap();
    client.ping().await.unwrap();
    client.close().await.unwrap();
}
