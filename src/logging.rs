use crate::statics;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `configured`, which wins
/// over the built-in default.
pub fn init_logging(configured: Option<&str>) -> Result<(), anyhow::Error> {
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        // Keep the GUI stack quiet unless RUST_LOG asks for it.
        _ => EnvFilter::try_new(configured.unwrap_or(statics::DEFAULT_LOG_FILTER))?
            .add_directive("eframe=warn".parse()?)
            .add_directive("egui_glow=warn".parse()?)
            .add_directive("winit=warn".parse()?),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(env_filter)
        .try_init()?;

    Ok(())
}
