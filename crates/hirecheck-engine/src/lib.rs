pub mod config;
pub mod driver;
pub mod formatter;
pub mod probe;
pub mod runner;

pub use driver::Driver;
pub use hirecheck_core::{
    Artifact, DriverError, FailureCause, Locator, Outcome, Scenario, ScenarioReport, Step,
    StepAction, Strategy,
};
pub use runner::{RetryPolicy, RunOptions, Runner};
