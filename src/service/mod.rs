//! The store service: actor, client and the messages between them.
//!
//! The storefront state is owned by a single [`StoreActor`] task; every
//! caller talks to it through a cloneable [`StoreClient`]. The actor's
//! mailbox is the serialization point the inventory needs: requests are
//! processed strictly one at a time, so concurrent checkouts against the
//! same product are linearized without any locking.

pub mod actor;
pub mod client;
pub mod message;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use message::{Response, StoreRequest};
