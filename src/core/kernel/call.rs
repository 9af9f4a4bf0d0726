use crate::core::errors::XtbError;
use crate::core::kernel::codec::{Command, Response};
use crate::core::kernel::transport::MessageTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::instrument;

/// Serializes every request/response exchange onto one connection.
///
/// The wire protocol offers no response-to-request matching, so correlation
/// relies on strict FIFO order: the lock is held across the whole
/// encode-write-read-decode cycle, which guarantees the Nth response is read
/// before the (N+1)th write begins. A slow counterparty therefore blocks all
/// callers, including the keep-alive scheduler; no timeout is applied to an
/// in-flight call. Shutdown is the one exception: [`close`](Self::close) does
/// not queue behind the lock.
pub struct CallChannel<T: MessageTransport> {
    transport: Mutex<T>,
    closed: watch::Sender<bool>,
}

impl<T: MessageTransport> CallChannel<T> {
    pub fn new(transport: T) -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            transport: Mutex::new(transport),
            closed,
        }
    }

    /// One full exchange returning the raw envelope. Used directly by the
    /// login handshake, which needs the `streamSessionId` field.
    pub(crate) async fn exchange<A, R>(
        &self,
        command: &str,
        arguments: Option<A>,
    ) -> Result<Response<R>, XtbError>
    where
        A: Serialize + Send,
        R: DeserializeOwned,
    {
        let mut closed = self.closed.subscribe();
        if *closed.borrow() {
            return Err(XtbError::ConnectionClosed);
        }
        let mut transport = self.transport.lock().await;
        let frame = Command::new(command, arguments).encode()?;
        tokio::select! {
            result = async {
                transport.send(frame).await?;
                let raw = transport.receive().await?;
                Response::decode(&raw)
            } => result,
            _ = closed.changed() => Err(XtbError::ConnectionClosed),
        }
    }

    /// The generic call surface every typed wrapper consumes.
    ///
    /// A `status=true` response without `returnData` yields the result's
    /// default value; no-output commands such as `ping` rely on this.
    #[instrument(skip(self, arguments))]
    pub async fn call<A, R>(&self, command: &str, arguments: Option<A>) -> Result<R, XtbError>
    where
        A: Serialize + Send,
        R: DeserializeOwned + Default,
    {
        let response = self.exchange(command, arguments).await?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    /// Close the socket. The shutdown signal preempts an exchange parked in a
    /// read, so that call returns `ConnectionClosed` and releases the lock
    /// instead of making shutdown wait on the counterparty.
    pub async fn close(&self) -> Result<(), XtbError> {
        self.closed.send_replace(true);
        self.transport.lock().await.close().await
    }
}
