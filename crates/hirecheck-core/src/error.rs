use thiserror::Error;

/// Faults raised by a driver implementation while resolving or acting
/// on elements.
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("session not started")]
    NotStarted,

    #[error("session launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("no element matches {locator}")]
    NotFound { locator: String },

    #[error("{count} elements match {locator}, expected exactly one")]
    Ambiguous { locator: String, count: usize },

    #[error("element {locator} is not interactable: {reason}")]
    NotInteractable { locator: String, reason: String },

    #[error("option \"{label}\" not found in {locator}")]
    OptionNotFound { locator: String, label: String },

    #[error("invalid element type for {locator}: expected {expected}, got {got}")]
    InvalidElementType {
        locator: String,
        expected: String,
        got: String,
    },

    #[error("screenshot failed: {0}")]
    Screenshot(String),

    #[error("webdriver error: {0}")]
    WebDriver(String),
}

impl DriverError {
    /// Whether this fault is a locator-resolution problem (zero or
    /// ambiguous matches) rather than a driver-level fault.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            DriverError::NotFound { .. } | DriverError::Ambiguous { .. }
        )
    }
}

/// Why a scenario failed. The runner keeps connectivity problems,
/// locator problems, and unmet waits distinct so flaky infrastructure
/// is distinguishable from a real regression.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("target unreachable after {attempts} attempts: {last_error}")]
    Connectivity { attempts: u32, last_error: String },

    #[error("locator resolution failed: {0}")]
    Locator(DriverError),

    #[error("{expected} not reached within {timeout_ms}ms")]
    Timeout { expected: String, timeout_ms: u64 },

    #[error("driver fault: {0}")]
    Driver(DriverError),
}

impl FailureCause {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FailureCause::Connectivity { .. })
    }
}

impl From<DriverError> for FailureCause {
    fn from(err: DriverError) -> Self {
        if err.is_resolution() {
            FailureCause::Locator(err)
        } else {
            FailureCause::Driver(err)
        }
    }
}
