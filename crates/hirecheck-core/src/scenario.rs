use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid base url \"{url}\": {reason}")]
    BaseUrl { url: String, reason: String },
}

/// One atomic browser action or assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// Go to a path relative to the scenario's base URL, or to an
    /// absolute URL.
    Navigate {
        #[serde(default)]
        path: String,
    },
    /// Overwrite the target field's value. Never appends.
    Fill { target: Locator, value: String },
    /// Set a checkbox or radio to checked. A no-op when already checked.
    Check { target: Locator },
    Click { target: Locator },
    /// Choose a `<select>` option by its visible label.
    Select { target: Locator, option: String },
    /// Wait for the target to become visible, without asserting.
    WaitVisible { target: Locator },
    /// Fail the scenario if the target is not visible within the timeout.
    AssertVisible { target: Locator },
    /// Fail the scenario if the target's text does not contain `contains`.
    AssertText { target: Locator, contains: String },
    /// Capture a page screenshot. Best-effort: write failures are
    /// logged, never fatal.
    Screenshot { name: String },
}

impl StepAction {
    /// The locator this action addresses, if any.
    pub fn target(&self) -> Option<&Locator> {
        match self {
            StepAction::Fill { target, .. }
            | StepAction::Check { target }
            | StepAction::Click { target }
            | StepAction::Select { target, .. }
            | StepAction::WaitVisible { target }
            | StepAction::AssertVisible { target }
            | StepAction::AssertText { target, .. } => Some(target),
            StepAction::Navigate { .. } | StepAction::Screenshot { .. } => None,
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Navigate { path } if path.is_empty() => write!(f, "navigate to base url"),
            StepAction::Navigate { path } => write!(f, "navigate to {}", path),
            StepAction::Fill { target, value } => write!(f, "fill {} = \"{}\"", target, value),
            StepAction::Check { target } => write!(f, "check {}", target),
            StepAction::Click { target } => write!(f, "click {}", target),
            StepAction::Select { target, option } => {
                write!(f, "select \"{}\" in {}", option, target)
            }
            StepAction::WaitVisible { target } => write!(f, "wait for {}", target),
            StepAction::AssertVisible { target } => write!(f, "assert {} visible", target),
            StepAction::AssertText { target, contains } => {
                write!(f, "assert {} contains \"{}\"", target, contains)
            }
            StepAction::Screenshot { name } => write!(f, "screenshot \"{}\"", name),
        }
    }
}

pub const DEFAULT_STEP_TIMEOUT_MS: u64 = 5_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_STEP_TIMEOUT_MS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: StepAction,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Step {
    pub fn new(action: StepAction) -> Self {
        Self {
            action,
            timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
        }
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self::new(StepAction::Navigate { path: path.into() })
    }

    pub fn fill(target: Locator, value: impl Into<String>) -> Self {
        Self::new(StepAction::Fill {
            target,
            value: value.into(),
        })
    }

    pub fn check(target: Locator) -> Self {
        Self::new(StepAction::Check { target })
    }

    pub fn click(target: Locator) -> Self {
        Self::new(StepAction::Click { target })
    }

    pub fn select(target: Locator, option: impl Into<String>) -> Self {
        Self::new(StepAction::Select {
            target,
            option: option.into(),
        })
    }

    pub fn wait_visible(target: Locator) -> Self {
        Self::new(StepAction::WaitVisible { target })
    }

    pub fn assert_visible(target: Locator) -> Self {
        Self::new(StepAction::AssertVisible { target })
    }

    pub fn assert_text(target: Locator, contains: impl Into<String>) -> Self {
        Self::new(StepAction::AssertText {
            target,
            contains: contains.into(),
        })
    }

    pub fn screenshot(name: impl Into<String>) -> Self {
        Self::new(StepAction::Screenshot { name: name.into() })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// One verification flow: an ordered list of steps executed against a
/// single browser session. Fails at the first failing step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub base_url: String,
    /// Steps run before the main sequence, e.g. a recruiter login.
    #[serde(default)]
    pub setup: Vec<Step>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            setup: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn setup_step(mut self, step: Step) -> Self {
        self.setup.push(step);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn from_yaml(content: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Resolve a step path against the scenario's base URL. Absolute
    /// URLs pass through unchanged.
    pub fn resolve_url(&self, path: &str) -> Result<String, ScenarioError> {
        let base = Url::parse(&self.base_url).map_err(|e| ScenarioError::BaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if path.is_empty() {
            return Ok(base.to_string());
        }
        let resolved = base.join(path).map_err(|e| ScenarioError::BaseUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(resolved.to_string())
    }

    /// Setup steps followed by main steps, with a flat index space.
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.setup.iter().chain(self.steps.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    const SAMPLE: &str = r#"
name: application-submission
base_url: http://localhost:5173
steps:
  - action: navigate
  - action: fill
    target: { by: css, selector: "input[name='name']" }
    value: Candidato Teste
  - action: select
    target: { by: css, selector: "select[name='jobId']" }
    option: Desenvolvedor Frontend
  - action: click
    target: { by: css, selector: "button[type='submit']" }
  - action: assert_visible
    target: { by: text, text: "Inscrição enviada com sucesso!" }
    timeout_ms: 10000
  - action: screenshot
    name: application-success
"#;

    #[test]
    fn parses_yaml_scenario() {
        let scenario = Scenario::from_yaml(SAMPLE).unwrap();
        assert_eq!(scenario.name, "application-submission");
        assert_eq!(scenario.steps.len(), 6);
        assert!(scenario.setup.is_empty());

        // Default timeout applies unless overridden.
        assert_eq!(scenario.steps[1].timeout_ms, DEFAULT_STEP_TIMEOUT_MS);
        assert_eq!(scenario.steps[4].timeout_ms, 10_000);

        match &scenario.steps[2].action {
            StepAction::Select { option, .. } => assert_eq!(option, "Desenvolvedor Frontend"),
            other => panic!("expected select, got {:?}", other),
        }
    }

    #[test]
    fn resolve_url_joins_paths() {
        let scenario = Scenario::new("t", "http://localhost:5173");
        assert_eq!(scenario.resolve_url("").unwrap(), "http://localhost:5173/");
        assert_eq!(
            scenario.resolve_url("/jobs").unwrap(),
            "http://localhost:5173/jobs"
        );
        assert_eq!(
            scenario.resolve_url("http://localhost:3005/").unwrap(),
            "http://localhost:3005/"
        );
    }

    #[test]
    fn resolve_url_rejects_bad_base() {
        let scenario = Scenario::new("t", "not a url");
        assert!(matches!(
            scenario.resolve_url(""),
            Err(ScenarioError::BaseUrl { .. })
        ));
    }

    #[test]
    fn builder_appends_in_order() {
        let scenario = Scenario::new("login", "http://localhost:5173")
            .setup_step(Step::navigate(""))
            .step(Step::fill(Locator::label("Email"), "teste@gmail.com"))
            .step(Step::click(Locator::role("button", "Entrar")));
        assert_eq!(scenario.setup.len(), 1);
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.all_steps().count(), 3);
    }

    #[test]
    fn step_display_names_the_action() {
        let step = Step::fill(Locator::placeholder("Email"), "x");
        assert_eq!(step.action.to_string(), "fill placeholder \"Email\" = \"x\"");
        assert_eq!(Step::navigate("").action.to_string(), "navigate to base url");
    }
}
