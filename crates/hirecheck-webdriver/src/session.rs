use crate::selector;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use hirecheck_core::{DriverError, Locator};
use hirecheck_engine::driver::Driver;
use serde_json::json;
use tracing::{debug, info};

/// One WebDriver-backed browser session. Created per scenario run and
/// torn down by the runner whatever the outcome.
pub struct WebDriverSession {
    webdriver_url: String,
    headless: bool,
    client: Option<Client>,
}

/// Capabilities for chromedriver. The fixed window size keeps the
/// recruiter dashboard in its desktop layout.
fn chrome_capabilities(headless: bool) -> serde_json::Map<String, serde_json::Value> {
    let mut args = vec!["--window-size=1280,900".to_string()];
    if headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }

    let mut caps = serde_json::Map::new();
    caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
    caps
}

impl WebDriverSession {
    /// Headless session against a WebDriver endpoint (chromedriver).
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            headless: true,
            client: None,
        }
    }

    /// Visible-browser session, useful when debugging a flow locally.
    pub fn new_visible(webdriver_url: impl Into<String>) -> Self {
        Self {
            headless: false,
            ..Self::new(webdriver_url)
        }
    }

    /// Resolve a locator to exactly one element. Zero matches is
    /// `NotFound`; several matches is `Ambiguous` unless the locator
    /// opts into `first`.
    async fn resolve(
        &mut self,
        locator: &Locator,
    ) -> Result<fantoccini::elements::Element, DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotStarted)?;
        let compiled = selector::compile(&locator.strategy);
        let mut elements = client
            .find_all(compiled.as_fantoccini())
            .await
            .map_err(|e| DriverError::WebDriver(e.to_string()))?;

        match elements.len() {
            0 => Err(DriverError::NotFound {
                locator: locator.to_string(),
            }),
            1 => Ok(elements.remove(0)),
            _ if locator.first => Ok(elements.remove(0)),
            count => Err(DriverError::Ambiguous {
                locator: locator.to_string(),
                count,
            }),
        }
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn launch(&mut self) -> Result<(), DriverError> {
        info!("Connecting to WebDriver at {}...", self.webdriver_url);
        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(self.headless))
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| {
                DriverError::Launch(format!("WebDriver at {}: {}", self.webdriver_url, e))
            })?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Some(client) = self.client.take() {
            client
                .close()
                .await
                .map_err(|e| DriverError::WebDriver(e.to_string()))?;
        }
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotStarted)?;
        debug!("Navigating to: {}", url);
        client
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotStarted)?;
        client
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(|e| DriverError::WebDriver(e.to_string()))
    }

    async fn clear(&mut self, locator: &Locator) -> Result<(), DriverError> {
        let mut elem = self.resolve(locator).await?;
        elem.clear()
            .await
            .map_err(|e| DriverError::WebDriver(e.to_string()))
    }

    async fn type_text(&mut self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        let mut elem = self.resolve(locator).await?;
        elem.send_keys(value)
            .await
            .map_err(|e| DriverError::WebDriver(e.to_string()))
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), DriverError> {
        let elem = self.resolve(locator).await?;
        elem.click()
            .await
            .map(|_| ())
            .map_err(|e| DriverError::NotInteractable {
                locator: locator.to_string(),
                reason: e.to_string(),
            })
    }

    async fn is_checked(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        let mut elem = self.resolve(locator).await?;
        elem.is_selected()
            .await
            .map_err(|e| DriverError::WebDriver(e.to_string()))
    }

    async fn select_option(
        &mut self,
        locator: &Locator,
        label: &str,
    ) -> Result<(), DriverError> {
        let elem = self.resolve(locator).await?;
        elem.select_by_label(label).await.map(|_| ()).map_err(|e| {
            let msg = e.to_string();
            // fantoccini reports a missing option as a stale/no-such
            // element fault on the option lookup.
            if msg.contains("no such element") || msg.contains("NoSuchElement") {
                DriverError::OptionNotFound {
                    locator: locator.to_string(),
                    label: label.to_string(),
                }
            } else {
                DriverError::WebDriver(msg)
            }
        })
    }

    async fn is_visible(&mut self, locator: &Locator) -> Result<bool, DriverError> {
        match self.resolve(locator).await {
            Ok(mut elem) => elem
                .is_displayed()
                .await
                .map_err(|e| DriverError::WebDriver(e.to_string())),
            Err(DriverError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn text_of(&mut self, locator: &Locator) -> Result<String, DriverError> {
        let mut elem = self.resolve(locator).await?;
        elem.text()
            .await
            .map_err(|e| DriverError::WebDriver(e.to_string()))
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotStarted)?;
        client
            .screenshot()
            .await
            .map_err(|e| DriverError::Screenshot(e.to_string()))
    }
}
