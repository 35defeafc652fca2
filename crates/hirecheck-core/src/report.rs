use crate::error::FailureCause;
use std::path::PathBuf;
use std::time::Duration;

/// Mask the trailing quoted value of a line mentioning a credential-like
/// key. Step descriptions embed typed values, so everything that prints
/// or logs one goes through here first to keep passwords off the
/// terminal and out of log files.
pub fn mask_sensitive(line: &str) -> String {
    let sensitive_keys = ["password", "senha", "secret", "token", "cvv"];

    let lower = line.to_lowercase();
    if !sensitive_keys.iter().any(|k| lower.contains(k)) {
        return line.to_string();
    }

    let mut masked = line.to_string();
    if let Some(end) = masked.rfind('"')
        && let Some(start) = masked[..end].rfind('"')
        && start + 1 < end
    {
        masked.replace_range(start + 1..end, "********");
    }
    masked
}

/// A diagnostic file captured during a run, one per screenshot step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub step_index: usize,
    pub path: PathBuf,
}

/// Binary scenario verdict. There is no partial success.
#[derive(Debug)]
pub enum Outcome {
    Passed {
        artifacts: Vec<Artifact>,
    },
    Failed {
        step_index: usize,
        /// Description of the failing step's locator, when it had one.
        locator: Option<String>,
        cause: FailureCause,
        /// Artifacts captured before the failure.
        artifacts: Vec<Artifact>,
    },
}

/// What one executed step did and how long it took.
#[derive(Debug, Clone)]
pub struct StepTrace {
    pub index: usize,
    pub description: String,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: String,
    pub outcome: Outcome,
    pub trace: Vec<StepTrace>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed { .. })
    }

    pub fn artifacts(&self) -> &[Artifact] {
        match &self.outcome {
            Outcome::Passed { artifacts } | Outcome::Failed { artifacts, .. } => artifacts,
        }
    }

    pub fn failure(&self) -> Option<&FailureCause> {
        match &self.outcome {
            Outcome::Passed { .. } => None,
            Outcome::Failed { cause, .. } => Some(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;
    use crate::scenario::Step;

    #[test]
    fn password_fill_description_is_masked() {
        // The exact string the runner logs for a login step.
        let line = Step::fill(Locator::label("Senha"), "hunter2")
            .action
            .to_string();
        let masked = mask_sensitive(&line);
        assert!(!masked.contains("hunter2"), "leaked: {}", masked);
        assert_eq!(masked, "fill label \"Senha\" = \"********\"");
    }

    #[test]
    fn masks_password_values() {
        let line = "fill label \"Senha\" = \"123456\"";
        assert_eq!(mask_sensitive(line), "fill label \"Senha\" = \"********\"");
    }

    #[test]
    fn leaves_ordinary_lines_alone() {
        let line = "fill placeholder \"Email\" = \"teste@teste.com\"";
        assert_eq!(mask_sensitive(line), line);
    }
}
