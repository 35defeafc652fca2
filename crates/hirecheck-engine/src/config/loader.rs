use super::schema::HirecheckConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Names a config file explicitly, taking precedence over the search
/// locations. Unlike those, the named file must exist.
pub const CONFIG_ENV: &str = "HIRECHECK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Config field {field} is not an http(s) URL: \"{value}\"")]
    InvalidUrl { field: &'static str, value: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the first configuration that applies:
    /// 1. the file named by `HIRECHECK_CONFIG`
    /// 2. ./hirecheck.yaml
    /// 3. ~/.hirecheck/config.yaml
    /// 4. built-in defaults
    pub async fn load_default() -> Result<HirecheckConfig, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            // A typo in the explicit path must not silently fall
            // through to the defaults.
            return Self::load_from(Path::new(&path)).await;
        }

        let local_config = PathBuf::from("./hirecheck.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".hirecheck").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        validate(HirecheckConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<HirecheckConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: HirecheckConfig = serde_yaml::from_str(&content)?;
        validate(config)
    }
}

/// The two endpoint fields must be absolute http(s) URLs; anything
/// else (a bare host, a unix path, a typo'd scheme) would only fail
/// later, mid-run, with a confusing navigation error.
fn validate(config: HirecheckConfig) -> Result<HirecheckConfig, ConfigError> {
    check_http_url("base_url", &config.base_url)?;
    check_http_url("webdriver_url", &config.webdriver_url)?;
    Ok(config)
}

fn check_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}
