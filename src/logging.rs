use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "photo_gallery=info";

/// Install the global tracing subscriber.
///
/// Verbosity is controlled with `RUST_LOG`, e.g. `RUST_LOG=photo_gallery=debug`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    if let Err(err) = result {
        eprintln!("logging already initialized: {}", err);
    }
}
