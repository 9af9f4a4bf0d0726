//! Background keep-alive scheduler.
//!
//! The server drops idle sessions, so a no-output `ping` is issued on a fixed
//! interval. The ping goes through the same [`CallChannel`] as foreground
//! calls and therefore competes for the same single-flight lock; a tick can
//! never overlap another exchange.

use crate::core::kernel::{CallChannel, MessageTransport};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Spawn the scheduler. Cancellation is cooperative: the shutdown signal is
/// checked between ticks, so an in-flight ping finishes on its own.
pub(crate) fn spawn<T>(
    channel: Arc<CallChannel<T>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    T: MessageTransport + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of tokio's interval completes immediately; consume it
        // so the first ping fires one full interval after login.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A failed ping is absorbed here. If the transport is
                    // actually dead the next foreground call surfaces the
                    // same error to its caller.
                    match channel.call::<Value, Value>("ping", None).await {
                        Ok(_) => debug!("keep-alive ping acknowledged"),
                        Err(e) => warn!("keep-alive ping failed: {e}"),
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        debug!("keep-alive scheduler stopped");
                        return;
                    }
                }
            }
        }
    })
}
