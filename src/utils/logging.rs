use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

/// Set when `CAZCHECK_DEBUG` is present in the environment
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("CAZCHECK_DEBUG").is_ok());

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "cazcheck=debug"
    } else {
        "cazcheck=warn"
    }
}

/// Install the stderr subscriber. Stdout is reserved for the response.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(*DEBUG_MODE)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
