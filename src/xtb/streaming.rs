//! Experimental push-subscription channel.
//!
//! This module is unstable: the vendor marks the streaming interface as
//! subject to change, and the client reproduces it as an opt-in capability
//! (`XtbConfig::with_streaming`).
//!
//! The channel runs on its own socket with its own lock domain. Subscription
//! requests are fire-and-forget writes; nothing on this socket is correlated
//! to a request. All inbound frames are consumed by one background read loop,
//! decoded into a generic `{command, data}` shape and routed to per-topic
//! consumers. Ordering across different topics is not guaranteed. The read
//! loop terminates for good on a close frame or a decode error; it never
//! resubscribes or reconnects.

use crate::core::errors::XtbError;
use crate::xtb::types::{
    StreamingBalance, StreamingCandle, StreamingKeepAlive, StreamingNews, StreamingProfit,
    StreamingTick, StreamingTrade, StreamingTradeStatus,
};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, error, instrument, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Dispatcher = Box<dyn FnMut(Value) -> bool + Send>;
type TopicTable = Arc<Mutex<HashMap<String, Dispatcher>>>;

/// Generic push frame: topic name plus an uninterpreted payload. Result-type
/// specialization happens in the per-topic dispatcher, not here.
#[derive(Debug, Deserialize)]
struct PushFrame {
    command: String,
    data: Value,
}

/// The streaming connection. Owned by the client when streaming is enabled;
/// all subscription methods take `&self` and are safe to call concurrently.
pub struct StreamConnection {
    write: Mutex<SplitSink<WsStream, Message>>,
    session_id: String,
    topics: TopicTable,
    reader: JoinHandle<()>,
}

impl StreamConnection {
    /// Dial the streaming endpoint and start the read loop immediately. The
    /// session token must come from a successful login on the main socket.
    #[instrument(skip(session_id))]
    pub(crate) async fn open(url: &str, session_id: &str) -> Result<Self, XtbError> {
        let (stream, _) = connect_async(url).await?;
        let (write, read) = stream.split();
        let topics: TopicTable = Arc::new(Mutex::new(HashMap::new()));
        let reader = tokio::spawn(read_loop(read, Arc::clone(&topics)));
        debug!("streaming connection established");
        Ok(Self {
            write: Mutex::new(write),
            session_id: session_id.to_string(),
            topics,
            reader,
        })
    }

    /// Subscribe to quote updates for one symbol. Topic frames arrive on the
    /// returned channel as soon as the server emits them.
    pub async fn subscribe_tick_prices(
        &self,
        symbol: &str,
    ) -> Result<mpsc::UnboundedReceiver<StreamingTick>, XtbError> {
        self.subscribe("getTickPrices", "tickPrices", json!({ "symbol": symbol }))
            .await
    }

    /// Like [`subscribe_tick_prices`](Self::subscribe_tick_prices), with the
    /// server-side filters the protocol offers: `min_arrival_time` throttles
    /// updates to at most one per that many milliseconds, `max_level` caps the
    /// quote depth.
    pub async fn subscribe_tick_prices_filtered(
        &self,
        symbol: &str,
        min_arrival_time: Option<i64>,
        max_level: Option<i64>,
    ) -> Result<mpsc::UnboundedReceiver<StreamingTick>, XtbError> {
        let mut extra = json!({ "symbol": symbol });
        if let Some(object) = extra.as_object_mut() {
            if let Some(interval) = min_arrival_time {
                object.insert("minArrivalTime".to_string(), interval.into());
            }
            if let Some(level) = max_level {
                object.insert("maxLevel".to_string(), level.into());
            }
        }
        self.subscribe("getTickPrices", "tickPrices", extra).await
    }

    pub async fn unsubscribe_tick_prices(&self, symbol: &str) -> Result<(), XtbError> {
        self.unsubscribe("stopTickPrices", "tickPrices", json!({ "symbol": symbol }))
            .await
    }

    /// Subscribe to account balance updates.
    pub async fn subscribe_balance(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingBalance>, XtbError> {
        self.subscribe("getBalance", "balance", json!({})).await
    }

    pub async fn unsubscribe_balance(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopBalance", "balance", json!({})).await
    }

    /// Subscribe to one-minute candles for one symbol.
    pub async fn subscribe_candles(
        &self,
        symbol: &str,
    ) -> Result<mpsc::UnboundedReceiver<StreamingCandle>, XtbError> {
        self.subscribe("getCandles", "candle", json!({ "symbol": symbol }))
            .await
    }

    pub async fn unsubscribe_candles(&self, symbol: &str) -> Result<(), XtbError> {
        self.unsubscribe("stopCandles", "candle", json!({ "symbol": symbol }))
            .await
    }

    /// Subscribe to news updates.
    pub async fn subscribe_news(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingNews>, XtbError> {
        self.subscribe("getNews", "news", json!({})).await
    }

    pub async fn unsubscribe_news(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopNews", "news", json!({})).await
    }

    /// Subscribe to the server's keep-alive beacon, useful for detecting a
    /// silently dead push channel.
    pub async fn subscribe_keep_alive(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingKeepAlive>, XtbError> {
        self.subscribe("getKeepAlive", "keepAlive", json!({})).await
    }

    pub async fn unsubscribe_keep_alive(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopKeepAlive", "keepAlive", json!({}))
            .await
    }

    /// Subscribe to trade lifecycle updates.
    pub async fn subscribe_trades(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingTrade>, XtbError> {
        self.subscribe("getTrades", "trade", json!({})).await
    }

    pub async fn unsubscribe_trades(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopTrades", "trade", json!({})).await
    }

    /// Subscribe to profit updates for open positions.
    pub async fn subscribe_profits(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingProfit>, XtbError> {
        self.subscribe("getProfits", "profit", json!({})).await
    }

    pub async fn unsubscribe_profits(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopProfits", "profit", json!({})).await
    }

    /// Subscribe to status updates for sent trade requests.
    pub async fn subscribe_trade_status(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<StreamingTradeStatus>, XtbError> {
        self.subscribe("getTradeStatus", "tradeStatus", json!({}))
            .await
    }

    pub async fn unsubscribe_trade_status(&self) -> Result<(), XtbError> {
        self.unsubscribe("stopTradeStatus", "tradeStatus", json!({}))
            .await
    }

    /// Register a dispatcher for `topic` and send the subscribe frame. The
    /// send is fire-and-forget: no confirmation is read here, the read loop is
    /// the only consumer of this socket.
    async fn subscribe<T>(
        &self,
        subscribe_command: &str,
        topic: &str,
        extra: Value,
    ) -> Result<mpsc::UnboundedReceiver<T>, XtbError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let topic = topic.to_string();
            let mut topics = self.topics.lock().await;
            topics.insert(
                topic.clone(),
                Box::new(move |data: Value| match serde_json::from_value::<T>(data) {
                    Ok(record) => tx.send(record).is_ok(),
                    Err(e) => {
                        warn!(topic = %topic, "dropping malformed push record: {e}");
                        true
                    }
                }),
            );
        }
        self.send(subscribe_command, extra).await?;
        Ok(rx)
    }

    async fn unsubscribe(
        &self,
        stop_command: &str,
        topic: &str,
        extra: Value,
    ) -> Result<(), XtbError> {
        self.topics.lock().await.remove(topic);
        self.send(stop_command, extra).await
    }

    async fn send(&self, command: &str, extra: Value) -> Result<(), XtbError> {
        let mut frame = json!({
            "command": command,
            "streamSessionId": self.session_id,
        });
        if let (Some(object), Value::Object(extra)) = (frame.as_object_mut(), extra) {
            object.extend(extra);
        }
        let text = serde_json::to_string(&frame)?;
        self.write.lock().await.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Fire a ping frame on the push channel to keep it alive. Nothing comes
    /// back; the server's own beacon arrives on the `keepAlive` topic.
    pub async fn ping(&self) -> Result<(), XtbError> {
        self.send("ping", json!({})).await
    }

    pub(crate) async fn close(self) {
        let _ = self.write.lock().await.send(Message::Close(None)).await;
    }
}

impl Drop for StreamConnection {
    /// The reader owns the read half of the socket, so it has to be aborted
    /// here or a dropped connection would keep reading until the peer hangs
    /// up.
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// The single consumer of the streaming socket. Stops permanently on a close
/// frame or an undecodable frame; resubscription is the caller's decision.
async fn read_loop(mut read: SplitStream<WsStream>, topics: TopicTable) {
    while let Some(message) = read.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_)) => {
                continue
            }
            Ok(Message::Close(frame)) => {
                debug!(?frame, "streaming connection closed by peer");
                return;
            }
            Err(e) => {
                error!("streaming read failed: {e}");
                return;
            }
        };

        let frame: PushFrame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(e) => {
                error!("undecodable streaming frame, stopping reader: {e}");
                return;
            }
        };

        let mut topics = topics.lock().await;
        match topics.get_mut(&frame.command) {
            Some(dispatch) => {
                // A dispatcher whose receiver is gone deregisters itself.
                if !dispatch(frame.data) {
                    topics.remove(&frame.command);
                }
            }
            None => debug!(topic = %frame.command, "push frame for inactive topic"),
        }
    }
    debug!("streaming socket reached end of stream");
}
