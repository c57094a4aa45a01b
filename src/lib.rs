//! # Storefront
//!
//! > **A storefront backend core built on resource-owning actors.**
//!
//! Catalog browsing, a per-user shopping cart, and order placement that
//! converts cart contents into an immutable order while decrementing stock —
//! with the cart-to-order checkout running as a single atomic unit that
//! concurrent shoppers can race safely.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for the contended state
//!
//! The inventory is the shared mutable resource every checkout races over.
//! Instead of a bare counter behind a lock, the whole storefront state lives
//! behind **one actor**: a Tokio task that owns the state outright and
//! processes requests sequentially from its mailbox. Two checkouts for the
//! last unit of stock are handled one after the other — they cannot both
//! succeed, and no `Mutex` is involved.
//!
//! ### Explicit transactions
//!
//! Checkout is a multi-step mutation (validate stock → price the order →
//! create it → decrement inventory → empty the cart). It runs inside a
//! scoped [`Transaction`](store::Transaction): writes go to a working copy,
//! `commit()` publishes them in one assignment, and any early `?` return
//! rolls back by simply not committing. No observer ever sees an order
//! without its stock decrement, or the reverse.
//!
//! ### Explicit identity
//!
//! Authentication is someone else's job. Every operation takes a
//! [`Caller`](model::Caller) — an authenticated user id plus a staff flag
//! supplied by the external identity layer — and access checks are typed
//! owner-or-staff capabilities, not reflection over request state.
//!
//! ### Exact money
//!
//! Prices and totals are fixed-point [`rust_decimal::Decimal`] values. Order
//! items capture the unit price at checkout time, so an order's total is the
//! exact sum of its lines forever, regardless of later catalog price edits.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Typed ids, entities, DTOs and the view structs an HTTP layer would
//! serialize. Pure data, no behavior beyond validation helpers.
//!
//! ### 2. The State ([`store`])
//! The component stores — [`Catalog`](store::Catalog),
//! [`InventoryLedger`](store::InventoryLedger),
//! [`CartStore`](store::CartStore), [`OrderStore`](store::OrderStore) —
//! aggregated in [`Storefront`](store::Storefront), plus the
//! [`Transaction`](store::Transaction) guard.
//!
//! ### 3. The Core ([`checkout`])
//! [`checkout::place_order`]: the coordinator that turns a cart into an
//! order atomically.
//!
//! ### 4. The Service ([`service`])
//! The actor that owns the state ([`StoreActor`](service::StoreActor)), the
//! cloneable [`StoreClient`](service::StoreClient), and the request messages
//! between them.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`StoreSystem`](lifecycle::StoreSystem) spawns and gracefully shuts down
//! the actor; [`setup_tracing`](lifecycle::setup_tracing) wires logging.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo shopping flow with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the test suite
//! cargo test
//! ```

pub mod checkout;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod service;
pub mod store;

pub use error::StoreError;
