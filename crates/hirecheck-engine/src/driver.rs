use async_trait::async_trait;
use hirecheck_core::{DriverError, Locator};

/// The browser-driving interface the runner executes steps against.
///
/// Implementations own one browser session (one page, one cookie jar)
/// whose lifetime matches a single scenario run. Element-addressed
/// methods resolve the locator to exactly one element; zero matches is
/// `DriverError::NotFound`, more than one is `DriverError::Ambiguous`
/// unless the locator opts into `first`. The one exception is
/// [`Driver::is_visible`], which reports zero matches as `Ok(false)` so
/// the runner can poll for elements that have not been rendered yet.
#[async_trait]
pub trait Driver: Send {
    /// Start the browser session.
    async fn launch(&mut self) -> Result<(), DriverError>;

    /// Tear the session down. Must be safe to call after a failed
    /// launch or mid-scenario fault.
    async fn close(&mut self) -> Result<(), DriverError>;

    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    async fn current_url(&mut self) -> Result<String, DriverError>;

    /// Clear the target field's current value.
    async fn clear(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Type into the target field. Appends to whatever is present, so
    /// callers wanting overwrite semantics clear first.
    async fn type_text(&mut self, locator: &Locator, value: &str) -> Result<(), DriverError>;

    async fn click(&mut self, locator: &Locator) -> Result<(), DriverError>;

    /// Whether the target checkbox or radio is currently checked.
    async fn is_checked(&mut self, locator: &Locator) -> Result<bool, DriverError>;

    /// Choose a `<select>` option by its visible label.
    async fn select_option(&mut self, locator: &Locator, label: &str)
    -> Result<(), DriverError>;

    /// Whether the target is rendered and visible. Zero matches is
    /// `Ok(false)`, not an error.
    async fn is_visible(&mut self, locator: &Locator) -> Result<bool, DriverError>;

    /// Rendered text content of the target.
    async fn text_of(&mut self, locator: &Locator) -> Result<String, DriverError>;

    /// Capture a PNG screenshot of the current viewport.
    async fn screenshot(&mut self) -> Result<Vec<u8>, DriverError>;
}
