use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::{app_config::AppConfig, error::EnvironmentError};

/// The global, immutable application configuration.
static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Load the layered configuration and install it as the process-wide record.
///
/// Once a record is installed, later calls return it without loading again.
pub fn init() -> Result<&'static AppConfig, EnvironmentError> {
    if let Some(config) = APP_CONFIG.get() {
        warn!("Environment already initialized, keeping the {} record", config.mode());
        return Ok(config);
    }

    APP_CONFIG.get_or_try_init(|| {
        let config = AppConfig::build()?;
        info!("Installed {} environment", config.mode());
        Ok(config)
    })
}

/// The process-wide record. Falls back to the built-in values if [`init`] never ran.
pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::builtin)
}
