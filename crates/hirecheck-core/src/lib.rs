pub mod error;
pub mod locator;
pub mod report;
pub mod scenario;

pub use error::{DriverError, FailureCause};
pub use locator::{Locator, Strategy};
pub use report::{Artifact, Outcome, ScenarioReport, StepTrace, mask_sensitive};
pub use scenario::{Scenario, ScenarioError, Step, StepAction};
