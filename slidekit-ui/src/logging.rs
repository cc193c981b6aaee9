//! Tracing bootstrap for hosts and demos.

/// Installs a `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; without it only errors and slidekit's own
/// `info` events are shown. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,slidekit_ui=info,slidekit_components=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
