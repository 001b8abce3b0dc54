use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Initialize tracing
///
/// Called once by the embedding process, never from reconciliation paths.
pub fn init() {
    let logger = tracing_subscriber::fmt::layer().compact();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let collector = Registry::default().with(logger).with(env_filter);

    tracing::subscriber::set_global_default(collector).expect("tracing subscriber already installed");
}
