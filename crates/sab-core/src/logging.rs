use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize logging/tracing for a `sab` process.
///
/// Library code only emits `tracing` events; installing a subscriber is the
/// host's call. Fails if a global subscriber is already installed.
pub fn init(service_name: &str) -> Result<()> {
    // Default: info for our crates, warn for everything else.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::Config(format!("logging init failed: {e}")))
}

fn default_directives(service_name: &str) -> String {
    let service = service_name.replace('-', "_");
    format!("warn,sab=info,sab_core=info,sab_openai=info,{service}=info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_normalize_crate_names() {
        let d = default_directives("sab-worker");
        assert!(d.starts_with("warn,"));
        assert!(d.ends_with("sab_worker=info"));
        assert!(EnvFilter::try_new(d).is_ok());
    }
}
