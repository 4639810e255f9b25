//! Remote agent registry, resolution and invocation.

pub mod entry;
pub mod manager;
pub mod remote;

pub use entry::{AgentAddress, AgentEntry, ResolvedDDO};
pub use manager::AgentManager;
pub use remote::{InvokeMode, InvokeResult, RemoteAgent};
