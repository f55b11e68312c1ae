use tracing_subscriber::{EnvFilter, fmt};

/// Install the global stderr subscriber. `RUST_LOG` takes precedence over the
/// crate default; `verbose` lowers that default from `warn` to `debug`.
/// Calling this more than once is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("expense_tracker={default_level}")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
