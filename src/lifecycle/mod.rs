//! System lifecycle & orchestration.
//!
//! Starting the storefront means building its state, spawning the store
//! actor, and wiring the client; stopping it means closing the request
//! channel and awaiting the actor task. [`StoreSystem`] does both, and
//! [`setup_tracing`] initializes the observability stack for binaries.
//!
//! # Graceful shutdown
//!
//! 1. **Drop all clients** — closes the sender side of the channel.
//! 2. **Actor detects closure** — `recv()` returns `None` after the mailbox
//!    drains, so no accepted request is lost.
//! 3. **Await completion** — the task finishes and logs its final state.

pub mod system;
pub mod tracing;

pub use self::system::*;
pub use self::tracing::*;
