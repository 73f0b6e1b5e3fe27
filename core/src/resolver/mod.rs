//! Target resolution for the tracked note
//!
//! The resolver keeps the shared [`TargetSlot`](crate::state::TargetSlot) in
//! step with the client's inventory and UI text. The client's UI tree fills in
//! asynchronously after login, so resolution runs as deferred tasks on the
//! host's UI queue with a bounded number of retries.
//!
//! # Architecture
//!
//! ```text
//!   ClientEvent ──► ClientEventHandler ──► TargetResolver
//!                                              │  defer(ResolveTask)
//!                                              ▼
//!                                       host UI task queue
//!                                              │  run_task(task)
//!                                              ▼
//!              inventory ─► note slot ─► tooltip ─► sanitize ─► catalog
//!                                              │
//!                                              ▼
//!                                         TargetSlot ──► OverlayRenderer
//! ```

mod target_resolver;
mod task;

#[cfg(test)]
mod resolver_tests;

pub use target_resolver::{TargetResolver, TaskOutcome};
pub use task::{LOGIN_RETRY_BUDGET, ResolveTask};
