mod support;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use support::{spawn_mock_server, test_config};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use xtb_connect::XtbClient;

/// Push-only endpoint: records subscription frames and answers `getTickPrices`
/// with a burst of push frames, including one for a topic nobody subscribed
/// to.
async fn spawn_mock_stream_server(subscriptions: Arc<Mutex<Vec<Value>>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((socket, _)) = listener.accept().await else {
            return;
        };
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                continue;
            };
            let request: Value = serde_json::from_str(&text).unwrap();
            let command = request["command"].as_str().unwrap().to_string();
            subscriptions.lock().unwrap().push(request);

            if command == "getTickPrices" {
                let frames = [
                    json!({
                        "command": "tickPrices",
                        "data": {"symbol": "EURUSD", "ask": 1.1, "bid": 1.0, "timestamp": 1389362640000_i64}
                    }),
                    // Nobody subscribed to balance; the reader must route
                    // around it without disturbing the tick consumer.
                    json!({
                        "command": "balance",
                        "data": {"balance": 995800269.43}
                    }),
                    json!({
                        "command": "tickPrices",
                        "data": {"symbol": "EURUSD", "ask": 1.2, "bid": 1.1, "timestamp": 1389362641000_i64}
                    }),
                ];
                for frame in frames {
                    if ws.send(Message::Text(frame.to_string())).await.is_err() {
                        return;
                    }
                }
            }
        }
    });

    format!("ws://{}", addr)
}

#[tokio::test]
async fn push_frames_reach_the_matching_topic_consumer() {
    let main_url = spawn_mock_server(|request| {
        if request["command"] == "login" {
            Some(r#"{"status":true,"streamSessionId":"s1"}"#.to_string())
        } else {
            Some(r#"{"status":true}"#.to_string())
        }
    })
    .await;

    let subscriptions = Arc::new(Mutex::new(Vec::new()));
    let stream_url = spawn_mock_stream_server(Arc::clone(&subscriptions)).await;

    let config = test_config(&main_url)
        .stream_url(stream_url)
        .with_streaming(true);
    let client = XtbClient::connect(config).await.unwrap();
    assert_eq!(client.stream_session_id(), Some("s1"));

    let stream = client.stream().expect("streaming was enabled");
    let mut ticks = stream.subscribe_tick_prices("EURUSD").await.unwrap();

    let first = ticks.recv().await.unwrap();
    assert_eq!(first.symbol, "EURUSD");
    assert!((first.ask - 1.1).abs() < f64::EPSILON);

    let second = ticks.recv().await.unwrap();
    assert!((second.ask - 1.2).abs() < f64::EPSILON);

    // The subscribe frame carried the session token and the topic fields.
    {
        let subscriptions = subscriptions.lock().unwrap();
        assert_eq!(subscriptions[0]["command"], "getTickPrices");
        assert_eq!(subscriptions[0]["streamSessionId"], "s1");
        assert_eq!(subscriptions[0]["symbol"], "EURUSD");
    }

    // Closing the client tears the channel down; the consumer observes the
    // end of its stream rather than hanging.
    client.close().await.unwrap();
    let closed = tokio::time::timeout(Duration::from_secs(1), ticks.recv()).await;
    assert!(closed.expect("receiver should close promptly").is_none());
}

#[tokio::test]
async fn dropping_the_client_without_close_stops_the_streaming_reader() {
    let main_url = spawn_mock_server(|request| {
        if request["command"] == "login" {
            Some(r#"{"status":true,"streamSessionId":"s3"}"#.to_string())
        } else {
            Some(r#"{"status":true}"#.to_string())
        }
    })
    .await;

    let subscriptions = Arc::new(Mutex::new(Vec::new()));
    let stream_url = spawn_mock_stream_server(Arc::clone(&subscriptions)).await;

    let config = test_config(&main_url)
        .stream_url(stream_url)
        .with_streaming(true);
    let client = XtbClient::connect(config).await.unwrap();
    let mut ticks = client
        .stream()
        .expect("streaming was enabled")
        .subscribe_tick_prices("EURUSD")
        .await
        .unwrap();

    // The subscription is live before the handle goes away.
    assert!(ticks.recv().await.is_some());

    drop(client);

    // Dropping the handle aborts the reader; once both owners of the topic
    // table are gone the sender side closes and the receiver drains to the
    // end instead of waiting forever.
    let drained = tokio::time::timeout(Duration::from_secs(1), async {
        while ticks.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok(), "receiver should close after the drop");
}

#[tokio::test]
async fn unsubscribe_sends_the_stop_command_and_drops_the_topic() {
    let main_url = spawn_mock_server(|request| {
        if request["command"] == "login" {
            Some(r#"{"status":true,"streamSessionId":"s2"}"#.to_string())
        } else {
            Some(r#"{"status":true}"#.to_string())
        }
    })
    .await;

    let subscriptions = Arc::new(Mutex::new(Vec::new()));
    let stream_url = spawn_mock_stream_server(Arc::clone(&subscriptions)).await;

    let config = test_config(&main_url)
        .stream_url(stream_url)
        .with_streaming(true);
    let client = XtbClient::connect(config).await.unwrap();
    let stream = client.stream().expect("streaming was enabled");

    let _balance = stream.subscribe_balance().await.unwrap();
    stream.unsubscribe_balance().await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    {
        let subscriptions = subscriptions.lock().unwrap();
        let commands: Vec<_> = subscriptions
            .iter()
            .map(|s| s["command"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(commands, vec!["getBalance", "stopBalance"]);
        assert_eq!(subscriptions[1]["streamSessionId"], "s2");
    }

    client.close().await.unwrap();
}
