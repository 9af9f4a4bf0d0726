use crate::core::config::XtbConfig;
use crate::core::errors::XtbError;
use crate::core::kernel::{CallChannel, Response, WsTransport};
use crate::xtb::keep_alive;
use crate::xtb::streaming::StreamConnection;
use crate::xtb::types::LoginArguments;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Handle to one authenticated xAPI session.
///
/// Construction dials the main socket and performs the login handshake before
/// anything else is allowed on the wire; a handle therefore never exists in an
/// unauthenticated state. The handle owns the keep-alive scheduler and, when
/// enabled, the streaming connection. It is not a process-wide singleton:
/// callers own it and pass it around explicitly.
pub struct XtbClient {
    channel: Arc<CallChannel<WsTransport>>,
    stream: Option<StreamConnection>,
    stream_session_id: Option<String>,
    shutdown: watch::Sender<bool>,
    keep_alive_task: JoinHandle<()>,
}

impl XtbClient {
    /// Dial, authenticate and start the background tasks.
    ///
    /// Order matters: login happens first and any failure (transport or API)
    /// closes the socket and fails construction. With streaming enabled, a
    /// login that returns no stream session token is a fatal session error -
    /// the push channel could never be addressed.
    #[instrument(skip(config), fields(user_id = config.user_id, streaming = config.streaming))]
    pub async fn connect(config: XtbConfig) -> Result<Self, XtbError> {
        let transport = WsTransport::connect(&config.resolve_main_url()).await?;
        let channel = Arc::new(CallChannel::new(transport));

        let stream_session_id = match Self::login(&channel, &config).await {
            Ok(session) => session,
            Err(e) => {
                let _ = channel.close().await;
                return Err(e);
            }
        };
        info!("login succeeded");

        let stream = match (config.streaming, stream_session_id.as_deref()) {
            (false, _) => None,
            (true, None) => {
                let _ = channel.close().await;
                return Err(XtbError::Session(
                    "login returned no streamSessionId; the push channel cannot be addressed"
                        .to_string(),
                ));
            }
            (true, Some(session)) => {
                match StreamConnection::open(&config.resolve_stream_url(), session).await {
                    Ok(stream) => Some(stream),
                    Err(e) => {
                        let _ = channel.close().await;
                        return Err(e);
                    }
                }
            }
        };

        let (shutdown, shutdown_rx) = watch::channel(false);
        let keep_alive_task = keep_alive::spawn(
            Arc::clone(&channel),
            config.keep_alive_interval,
            shutdown_rx,
        );

        Ok(Self {
            channel,
            stream,
            stream_session_id,
            shutdown,
            keep_alive_task,
        })
    }

    /// The distinguished first exchange. Runs through the same call channel
    /// as everything else but reads the raw envelope, because the session
    /// token rides on the envelope rather than in `returnData`.
    async fn login(
        channel: &CallChannel<WsTransport>,
        config: &XtbConfig,
    ) -> Result<Option<String>, XtbError> {
        let arguments = LoginArguments {
            user_id: config.user_id,
            password: config.password.expose_secret().clone(),
        };
        let response: Response<Value> = channel.exchange("login", Some(arguments)).await?;
        let stream_session_id = response.stream_session_id.clone();
        response.into_result()?;
        Ok(stream_session_id)
    }

    /// The generic call operation: the single surface every typed wrapper
    /// consumes. One write-then-read exchange under the connection lock.
    pub async fn call<A, R>(&self, command: &str, arguments: Option<A>) -> Result<R, XtbError>
    where
        A: Serialize + Send,
        R: DeserializeOwned + Default,
    {
        self.channel.call(command, arguments).await
    }

    /// The streaming connection, present only when the client was built with
    /// `with_streaming(true)`.
    pub fn stream(&self) -> Option<&StreamConnection> {
        self.stream.as_ref()
    }

    /// The session token obtained at login. Immutable for the lifetime of the
    /// client.
    pub fn stream_session_id(&self) -> Option<&str> {
        self.stream_session_id.as_deref()
    }

    /// Shut the session down: stop the keep-alive scheduler at its next check
    /// point and close both sockets. An in-flight call observes a transport
    /// error from the closed socket rather than hanging.
    pub async fn close(mut self) -> Result<(), XtbError> {
        let _ = self.shutdown.send(true);
        let result = self.channel.close().await;
        if let Some(stream) = self.stream.take() {
            stream.close().await;
        }
        if let Err(e) = (&mut self.keep_alive_task).await {
            if !e.is_cancelled() {
                warn!("keep-alive task ended abnormally: {e}");
            }
        }
        result
    }
}

impl Drop for XtbClient {
    fn drop(&mut self) {
        // Best effort for handles dropped without an explicit close; the
        // sockets close when their halves are dropped.
        self.keep_alive_task.abort();
    }
}
