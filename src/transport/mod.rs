//! Network transport used to resolve documents and invoke operations.

pub mod client;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use client::AgentTransport;
pub use http::{HttpTransport, HttpTransportConfig};
