use crate::core::errors::XtbError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, instrument, warn};

/// One socket, one owner. The call layer guards access with its own lock, so
/// the transport itself is plain `&mut self`.
///
/// The trait is the seam for unit tests: the call serializer is generic over
/// it and can run against an in-memory implementation.
#[async_trait]
pub trait MessageTransport: Send {
    async fn send(&mut self, text: String) -> Result<(), XtbError>;

    /// Read the next data frame. Control frames are handled internally.
    async fn receive(&mut self) -> Result<String, XtbError>;

    async fn close(&mut self) -> Result<(), XtbError>;
}

/// Websocket transport over tokio-tungstenite. A transport failure leaves the
/// connection unusable; there is no reconnection at this layer.
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    url: String,
}

impl WsTransport {
    #[instrument]
    pub async fn connect(url: &str) -> Result<Self, XtbError> {
        let (stream, _) = connect_async(url).await?;
        debug!("websocket connected");
        Ok(Self {
            stream,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl MessageTransport for WsTransport {
    #[instrument(skip(self, text), fields(url = %self.url))]
    async fn send(&mut self, text: String) -> Result<(), XtbError> {
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn receive(&mut self) -> Result<String, XtbError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Binary(data))) => match String::from_utf8(data) {
                    Ok(text) => return Ok(text),
                    Err(_) => warn!("discarding non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Ping(data))) => {
                    // Answer protocol pings here so callers only ever see data
                    // frames.
                    self.stream.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Pong(_) | Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "close frame received");
                    return Err(XtbError::ConnectionClosed);
                }
                Some(Err(e)) => return Err(e.into()),
                None => return Err(XtbError::ConnectionClosed),
            }
        }
    }

    async fn close(&mut self) -> Result<(), XtbError> {
        // Best effort: the peer may already be gone.
        let _ = self.stream.send(Message::Close(None)).await;
        Ok(())
    }
}
