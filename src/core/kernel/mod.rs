//! Transport kernel for the xAPI socket protocol.
//!
//! The kernel is the vendor-agnostic half of the client: it knows how to frame
//! a command, how to discriminate the uniform success/error response shape,
//! and how to serialize concurrent callers onto one connection. It contains no
//! endpoint-specific payload logic.
//!
//! # Architecture
//!
//! - [`codec`]: the outbound [`Command`] and inbound [`Response`] envelopes.
//! - [`transport`]: the [`MessageTransport`] seam and its websocket
//!   implementation. The trait exists so the call layer can be exercised
//!   against an in-memory transport in tests.
//! - [`call`]: the [`CallChannel`] request/response serializer. The wire
//!   protocol carries no response-to-request id matching, so correlation is
//!   strictly FIFO and enforced with a single-flight lock.

pub mod call;
pub mod codec;
pub mod transport;

pub use call::CallChannel;
pub use codec::{Command, Response};
pub use transport::{MessageTransport, WsTransport};
