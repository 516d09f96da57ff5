/**
 * Server Configuration
 *
 * Loads the effective `AppConfig` by layering its sources.
 *
 * # Configuration Sources
 *
 * Lowest to highest precedence:
 * 1. Built-in defaults (`AppConfig::default`)
 * 2. TOML file named by `LANSHARE_CONFIG`, else `lanshare.toml` when present
 * 3. `LANSHARE_*` environment variables (a `.env` file is read into the
 *    environment first)
 *
 * # Error Handling
 *
 * Unlike optional services, a broken configuration stops startup: an
 * unreadable or malformed file, or a value that fails validation, is
 * returned as `ConfigError`.
 */

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::shared::{AppConfig, ConfigError};

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_VAR: &str = "LANSHARE_CONFIG";

/// Config file read when `LANSHARE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "lanshare.toml";

/// Load the effective configuration from the process environment
///
/// # Errors
///
/// Returns `ConfigError` when the file cannot be read or parsed, an
/// environment value is malformed, or the result fails validation.
///
/// # Example
///
/// ```rust,no_run
/// use lanshare::backend::server::config::load_config;
///
/// let config = load_config().expect("invalid configuration");
/// println!("listening on {}:{}", config.bind_address, config.port);
/// ```
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();
    load_config_with(|key| std::env::var(key).ok())
}

/// Load the configuration with environment lookups supplied by `lookup`
pub fn load_config_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_file(&lookup) {
        Some(path) => {
            tracing::info!("[Server] Reading configuration from {}", path.display());
            read_config_file(&path)?
        }
        None => AppConfig::default(),
    };

    config.apply_env(&lookup)?;
    config.validate()?;
    Ok(config)
}

/// Log filter from a `RUST_LOG`-style directive, `info` when absent or invalid
pub fn log_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// The file named by `LANSHARE_CONFIG`, or `lanshare.toml` if it exists
fn config_file<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(CONFIG_PATH_VAR) {
        Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            default.exists().then(|| default.to_path_buf())
        }
    }
}

fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml_str(&text)
}
