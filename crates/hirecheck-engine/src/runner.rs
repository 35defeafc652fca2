//! Scenario execution.
//!
//! The runner walks a scenario's steps in order against one driver
//! session: Idle -> SessionStarting -> Step N -> {Passed | Failed} ->
//! TornDown. Teardown runs on every path. The only retry anywhere is
//! the bounded connectivity budget around the initial navigation; a
//! failed step is terminal for the run.

use crate::driver::Driver;
use hirecheck_core::{
    Artifact, DriverError, FailureCause, Locator, Outcome, Scenario, ScenarioReport, Step,
    StepAction, StepTrace, mask_sensitive,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Bounded retry for the initial navigation, before any step runs.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory screenshots are written under, one subdirectory per
    /// scenario.
    pub artifacts_dir: PathBuf,
    pub retry: RetryPolicy,
    /// Interval between condition checks in bounded waits.
    pub poll_interval: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("artifacts"),
            retry: RetryPolicy::default(),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Failing step index, its locator description, and the cause.
type StepFailure = (usize, Option<String>, FailureCause);

#[derive(Debug, Default)]
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Execute every step of `scenario` against `driver` and report the
    /// verdict. The session is closed before this returns, whatever the
    /// outcome.
    ///
    /// Cancellation: dropping this future mid-run skips the close call,
    /// since an async teardown cannot run from a destructor. The driver
    /// stays with the caller, so a caller that cancels must call
    /// `driver.close()` itself once the future is dropped.
    pub async fn run<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
    ) -> ScenarioReport {
        info!(scenario = %scenario.name, "session starting");
        let mut trace = Vec::new();
        let mut artifacts = Vec::new();

        let outcome = match self
            .run_steps(driver, scenario, &mut trace, &mut artifacts)
            .await
        {
            Ok(()) => {
                info!(scenario = %scenario.name, "passed");
                Outcome::Passed { artifacts }
            }
            Err((step_index, locator, cause)) => {
                warn!(scenario = %scenario.name, step = step_index, %cause, "failed");
                Outcome::Failed {
                    step_index,
                    locator,
                    cause,
                    artifacts,
                }
            }
        };

        if let Err(e) = driver.close().await {
            warn!(scenario = %scenario.name, error = %e, "session teardown reported an error");
        }
        debug!(scenario = %scenario.name, "torn down");

        ScenarioReport {
            scenario: scenario.name.clone(),
            outcome,
            trace,
        }
    }

    async fn run_steps<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
        trace: &mut Vec<StepTrace>,
        artifacts: &mut Vec<Artifact>,
    ) -> Result<(), StepFailure> {
        driver
            .launch()
            .await
            .map_err(|e| (0, None, FailureCause::Driver(e)))?;
        self.connect(driver, scenario)
            .await
            .map_err(|cause| (0, None, cause))?;

        for (index, step) in scenario.all_steps().enumerate() {
            // Descriptions embed typed values, so mask before logging.
            debug!(step = index, action = %mask_sensitive(&step.action.to_string()), "executing");
            let started = Instant::now();
            let result = self
                .execute_step(driver, scenario, index, step, artifacts)
                .await;
            trace.push(StepTrace {
                index,
                description: step.action.to_string(),
                elapsed: started.elapsed(),
            });
            result.map_err(|cause| {
                let locator = step.action.target().map(|l| l.to_string());
                (index, locator, cause)
            })?;
        }
        Ok(())
    }

    /// Initial navigation with the connectivity retry budget. Only
    /// navigation-level faults are retried; anything else aborts.
    async fn connect<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
    ) -> Result<(), FailureCause> {
        let url = scenario
            .resolve_url("")
            .map_err(|e| FailureCause::Driver(DriverError::Navigation(e.to_string())))?;

        let attempts = self.options.retry.attempts.max(1);
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            if attempt > 1 {
                warn!(attempt, url = %url, "retrying initial navigation");
                tokio::time::sleep(self.options.retry.delay).await;
            }
            match driver.navigate(&url).await {
                Ok(()) => return Ok(()),
                Err(DriverError::Navigation(msg)) => last_error = msg,
                Err(other) => return Err(FailureCause::Driver(other)),
            }
        }
        Err(FailureCause::Connectivity {
            attempts,
            last_error,
        })
    }

    async fn execute_step<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
        index: usize,
        step: &Step,
        artifacts: &mut Vec<Artifact>,
    ) -> Result<(), FailureCause> {
        let timeout = Duration::from_millis(step.timeout_ms);
        match &step.action {
            StepAction::Navigate { path } => {
                let url = scenario
                    .resolve_url(path)
                    .map_err(|e| FailureCause::Driver(DriverError::Navigation(e.to_string())))?;
                driver.navigate(&url).await?;
                Ok(())
            }
            StepAction::Fill { target, value } => {
                self.wait_visible(driver, target, timeout).await?;
                driver.clear(target).await?;
                driver.type_text(target, value).await?;
                Ok(())
            }
            StepAction::Check { target } => {
                self.wait_visible(driver, target, timeout).await?;
                if !driver.is_checked(target).await? {
                    driver.click(target).await?;
                }
                Ok(())
            }
            StepAction::Click { target } => {
                self.wait_visible(driver, target, timeout).await?;
                driver.click(target).await?;
                Ok(())
            }
            StepAction::Select { target, option } => {
                self.wait_visible(driver, target, timeout).await?;
                driver.select_option(target, option).await?;
                Ok(())
            }
            StepAction::WaitVisible { target } | StepAction::AssertVisible { target } => {
                self.wait_visible(driver, target, timeout).await
            }
            StepAction::AssertText { target, contains } => {
                self.wait_text(driver, target, contains, step.timeout_ms).await
            }
            StepAction::Screenshot { name } => {
                match self.capture(driver, scenario, index, name).await {
                    Ok(artifact) => artifacts.push(artifact),
                    Err(e) => warn!(step = index, error = %e, "screenshot skipped"),
                }
                Ok(())
            }
        }
    }

    /// Poll until the target is visible or the deadline passes.
    async fn wait_visible<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        target: &Locator,
        timeout: Duration,
    ) -> Result<(), FailureCause> {
        let deadline = Instant::now() + timeout;
        loop {
            if driver.is_visible(target).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(FailureCause::Timeout {
                    expected: format!("{} visible", target),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    /// Poll until the target's text contains the expected fragment. The
    /// timeout report carries the last observed text.
    async fn wait_text<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        target: &Locator,
        contains: &str,
        timeout_ms: u64,
    ) -> Result<(), FailureCause> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        let mut observed = String::new();
        loop {
            match driver.text_of(target).await {
                Ok(text) => {
                    if text.contains(contains) {
                        return Ok(());
                    }
                    observed = text;
                }
                // Not rendered yet: keep polling.
                Err(DriverError::NotFound { .. }) => {}
                Err(other) => return Err(other.into()),
            }
            if Instant::now() >= deadline {
                return Err(FailureCause::Timeout {
                    expected: format!(
                        "{} to contain \"{}\" (last saw \"{}\")",
                        target, contains, observed
                    ),
                    timeout_ms,
                });
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    async fn capture<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        scenario: &Scenario,
        index: usize,
        name: &str,
    ) -> Result<Artifact, String> {
        let bytes = driver.screenshot().await.map_err(|e| e.to_string())?;
        let dir = self.options.artifacts_dir.join(&scenario.name);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| e.to_string())?;
        let path = dir.join(format!("{:02}-{}.png", index, name));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| e.to_string())?;
        debug!(path = %path.display(), bytes = bytes.len(), "screenshot saved");
        Ok(Artifact {
            step_index: index,
            path,
        })
    }
}
