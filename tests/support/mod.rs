use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;
use xtb_connect::XtbConfig;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

/// Scripted xAPI endpoint: accepts one websocket connection and answers every
/// text frame through `handler`. Returning `None` closes the connection.
pub async fn spawn_mock_server<F>(mut handler: F) -> String
where
    F: FnMut(Value) -> Option<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((socket, _)) = listener.accept().await else {
            return;
        };
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        while let Some(Ok(message)) = ws.next().await {
            if let Message::Text(text) = message {
                let request: Value = serde_json::from_str(&text).unwrap();
                match handler(request) {
                    Some(reply) => {
                        if ws.send(Message::Text(reply)).await.is_err() {
                            return;
                        }
                    }
                    None => {
                        let _ = ws.send(Message::Close(None)).await;
                        return;
                    }
                }
            }
        }
    });

    format!("ws://{}", addr)
}

/// Test credentials pointed at a mock endpoint. The keep-alive interval is
/// long enough not to interfere with unrelated scenarios.
pub fn test_config(main_url: &str) -> XtbConfig {
    XtbConfig::new(1000, "secret".to_string())
        .main_url(main_url)
        .keep_alive_interval(Duration::from_secs(60))
}
