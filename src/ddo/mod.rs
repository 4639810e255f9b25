//! Identity documents (DDOs) describing remote agents.

pub mod document;
pub mod service;

pub use document::{DDOSource, ServiceEndpoint, DDO};
pub use service::{
    SERVICE_TYPE_AUTH, SERVICE_TYPE_INVOKE, SERVICE_TYPE_MARKET, SERVICE_TYPE_META,
    SERVICE_TYPE_STORAGE,
};
