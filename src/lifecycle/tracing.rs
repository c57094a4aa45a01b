/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with:
/// - **Environment-based filtering**: controlled via the `RUST_LOG` variable
/// - **Span tracking**: hierarchical context for async operations
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - state changes (orders placed, products created)
/// - `RUST_LOG=debug` - every request with its payload
/// - `RUST_LOG=storefront=debug` - debug only for this crate
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
