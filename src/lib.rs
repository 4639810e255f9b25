//! # Tethys
//!
//! An SDK for working with remote agents on a decentralized identity
//! network:
//! - **Agent registry**: named references to remote agents with cached
//!   identity-document (DDO) resolution
//! - **Invocation**: synchronous and asynchronous operation calls
//! - **Job tracking**: poll asynchronous invocations to completion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tethys::agent::{AgentAddress, AgentManager};
//! use tethys::transport::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = Arc::new(HttpTransport::with_defaults().unwrap());
//!     let manager = AgentManager::new(transport);
//!     manager
//!         .register("market", AgentAddress::url("http://localhost:8080"))
//!         .unwrap();
//!     if let Some(agent) = manager.load_agent("market").await.unwrap() {
//!         println!("resolved agent: {}", agent.did());
//!     }
//! }
//! ```

pub mod account;
pub mod agent;
pub mod core;
pub mod ddo;
pub mod did;
pub mod job;
pub mod logging;
pub mod transport;

pub use crate::core::error::{Error, Result};
