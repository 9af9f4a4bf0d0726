//! XTB xStation5 connector: login handshake, typed command wrappers, the
//! keep-alive scheduler and the experimental streaming channel.

pub mod client;
pub mod conversions;
pub mod keep_alive;
pub mod methods;
pub mod streaming;
pub mod types;

pub use client::XtbClient;
