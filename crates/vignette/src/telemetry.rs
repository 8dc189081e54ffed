//! Log output for the `vignette` binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a console subscriber.
///
/// `RUST_LOG` takes precedence; otherwise Vignette crates log at DEBUG when
/// `verbose` is set and at INFO when not.
pub fn init_console_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_filter = if verbose {
        "info,vignette=debug,vignette_engine=debug,vignette_studio=debug,vignette_models=debug"
    } else {
        "warn,vignette=info,vignette_engine=info,vignette_studio=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(verbose))
        .try_init()?;

    Ok(())
}
