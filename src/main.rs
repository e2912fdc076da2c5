use jobtrack::{Config, logging};

fn main() -> eframe::Result {
    let (config, config_error) = Config::load();
    if let Err(e) = logging::init_logging(config.log_filter.as_deref()) {
        eprintln!("jobtrack: logging disabled: {e:#}");
    }
    if let Some(e) = config_error {
        tracing::warn!("ignoring config, using defaults: {e:#}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    jobtrack::run_gui(config)
}
