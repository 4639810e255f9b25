//! Core types and error handling for tethys.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{now, sha3_256, Authentication, Hash256, Timestamp};
