mod app_config;
mod common;
mod error;
mod utils;


use app_config::BuildMode;
use error::EnvironmentError;
use tracing::{debug, error, info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

/// `RUST_LOG` directives when they parse, otherwise the build mode's default level
fn log_filter(mode: BuildMode, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(mode.default_log_level()))
}

fn main() -> Result<(), EnvironmentError> {
    let rust_log = std::env::var("RUST_LOG").ok();

    // Loading logs at development verbosity until the real mode is known
    let (filter, handle) =
        reload::Layer::new(log_filter(BuildMode::Development, rust_log.as_deref()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = common::init().map_err(|err| {
        error!("Unable to load environment: {err}");
        err
    })?;

    if let Err(err) = handle.reload(log_filter(config.mode(), rust_log.as_deref())) {
        warn!("Unable to apply {} log filter: {err}", config.mode());
    }

    let span = span!(Level::INFO, "Environment", mode = %config.mode());
    let _enter = span.enter();

    info!("API server at {}", config.api_server_url);
    info!(
        "Auth0 tenant {} for audience {}",
        config.auth0.tenant_domain(),
        config.auth0.audience
    );
    if let Ok(callback) = config.auth0.callback() {
        debug!(
            "Auth0 redirects back to {}",
            callback.origin().ascii_serialization()
        );
    }
    if let Ok(drinks) = config.api_endpoint("drinks") {
        debug!("Drinks are served from {drinks}");
    }

    if !config.is_production() {
        debug!("Development build, unoptimized frontend settings");
    }

    println!("{}", config.to_json()?);

    Ok(())
}
