use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::service::{StoreActor, StoreClient};
use crate::store::Storefront;

/// Mailbox capacity for the store actor.
const STORE_BUFFER: usize = 32;

/// The runtime orchestrator for the storefront.
///
/// `StoreSystem` owns the lifecycle: it builds the [`Storefront`] state,
/// spawns the store actor in its own Tokio task, and hands out the
/// [`StoreClient`] everything else uses to talk to it.
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new();
///
/// let cart = system.client.get_cart(caller).await?;
/// let order = system.client.checkout(caller).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    /// Client for the store actor; clone freely across tasks.
    pub client: StoreClient,

    /// Handle of the running actor task, used for graceful shutdown.
    handle: JoinHandle<()>,
}

impl StoreSystem {
    /// Starts a storefront with empty state.
    pub fn new() -> Self {
        Self::with_state(Storefront::new())
    }

    /// Starts a storefront over pre-built state (used by tests to start from
    /// a known catalog).
    pub fn with_state(state: Storefront) -> Self {
        let (actor, client) = StoreActor::new(STORE_BUFFER, state);
        let handle = tokio::spawn(actor.run());
        Self { client, handle }
    }

    /// Gracefully shuts the system down.
    ///
    /// Dropping the client closes the request channel; the actor drains its
    /// mailbox and exits its loop. Clones of the client held elsewhere keep
    /// the channel open until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        drop(self.client);
        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {e:?}");
            return Err(format!("Store actor task failed: {e:?}"));
        }
        info!("Storefront shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
