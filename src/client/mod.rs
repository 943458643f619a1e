//! Client orchestration
//!
//! Turns command-line arguments into a transfer plan and runs it.

pub mod plan;
pub mod session;

pub use plan::{RemoteTarget, TransferDirection, TransferPlan};
pub use session::{Invocation, run};
