//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs + signals.rs):
//!     SIGTERM/SIGINT or Shutdown::trigger → stop accepting → drain in-flight calls → exit
//! ```
//!
//! # Design Decisions
//! - In-flight relay calls finish before the server future resolves
//! - Outbound work runs detached from the inbound connection and always
//!   reaches the journal, even if the caller went away

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
