use hirecheck_core::{Outcome, ScenarioReport, mask_sensitive};

/// Render a run report for the terminal. Step descriptions pass
/// through [`mask_sensitive`] so credential values stay hidden.
pub fn format_report(report: &ScenarioReport) -> String {
    let mut output = String::new();

    for step in &report.trace {
        output.push_str(&format!(
            "  [{:02}] {} ({}ms)\n",
            step.index,
            mask_sensitive(&step.description),
            step.elapsed.as_millis()
        ));
    }

    match &report.outcome {
        Outcome::Passed { artifacts } => {
            output.push_str(&format!("PASS {}", report.scenario));
            if !artifacts.is_empty() {
                output.push_str(&format!(" ({} artifacts)", artifacts.len()));
                for artifact in artifacts {
                    output.push_str(&format!("\n  - {}", artifact.path.display()));
                }
            }
        }
        Outcome::Failed {
            step_index,
            locator,
            cause,
            ..
        } => {
            output.push_str(&format!(
                "FAIL {} at step {}: {}",
                report.scenario, step_index, cause
            ));
            if let Some(locator) = locator {
                output.push_str(&format!("\n  locator: {}", locator));
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirecheck_core::{Outcome, ScenarioReport, StepTrace};
    use std::time::Duration;

    #[test]
    fn report_trace_hides_password_values() {
        let report = ScenarioReport {
            scenario: "recruiter-login".into(),
            outcome: Outcome::Passed {
                artifacts: Vec::new(),
            },
            trace: vec![StepTrace {
                index: 1,
                description: "fill label \"Senha\" = \"123456\"".into(),
                elapsed: Duration::from_millis(40),
            }],
        };
        let rendered = format_report(&report);
        assert!(!rendered.contains("123456"), "leaked: {}", rendered);
        assert!(rendered.contains("********"));
        assert!(rendered.contains("PASS recruiter-login"));
    }
}
