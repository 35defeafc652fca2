use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recruiter credentials for authenticated flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HirecheckConfig {
    /// Target application root.
    pub base_url: String,
    /// WebDriver endpoint (chromedriver/geckodriver).
    pub webdriver_url: String,
    pub credentials: Option<Credentials>,
    pub artifacts_dir: PathBuf,
    /// Connectivity retry budget for the initial navigation.
    pub connect_attempts: u32,
    pub connect_delay_ms: u64,
    pub headless: bool,
}

impl Default for HirecheckConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".into(),
            webdriver_url: "http://localhost:9515".into(),
            credentials: None,
            artifacts_dir: PathBuf::from("artifacts"),
            connect_attempts: 5,
            connect_delay_ms: 2_000,
            headless: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: HirecheckConfig = serde_yaml::from_str(
            "base_url: http://localhost:3005\ncredentials:\n  email: teste@gmail.com\n  password: \"123456\"\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3005");
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.connect_attempts, 5);
        assert_eq!(config.credentials.unwrap().email, "teste@gmail.com");
    }
}
