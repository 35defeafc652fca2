//! Built-in verification flows for the recruitment app.
//!
//! Each flow is plain scenario data: the same steps the hand-written
//! verification scripts used to perform, against the Portuguese UI of
//! the application. Flows that operate on pre-existing candidates list
//! those fixtures; nothing here seeds data into the target.

use hirecheck_core::{Locator, Scenario, Step};
use hirecheck_engine::config::Credentials;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("unknown flow \"{0}\", see `hirecheck list`")]
    Unknown(String),
    #[error("flow \"{0}\" needs recruiter credentials (--email/--password or config)")]
    NeedsCredentials(String),
}

pub struct Flow {
    pub name: &'static str,
    pub summary: &'static str,
    pub requires_login: bool,
    /// Candidate records that must already exist in the target.
    pub fixtures: &'static [&'static str],
}

pub const FLOWS: &[Flow] = &[
    Flow {
        name: "application-submission",
        summary: "Public form: fill candidate data, pick a job, submit, expect confirmation",
        requires_login: false,
        fixtures: &[],
    },
    Flow {
        name: "recruiter-login",
        summary: "Log in and expect the dashboard heading",
        requires_login: true,
        fixtures: &[],
    },
    Flow {
        name: "messaging-panel",
        summary: "Open the messages panel from the dashboard",
        requires_login: true,
        fixtures: &[],
    },
    Flow {
        name: "candidate-profile",
        summary: "Open the first job's first candidate profile",
        requires_login: true,
        fixtures: &["at least one job with one candidate"],
    },
    Flow {
        name: "rejection-to-talent-pool",
        summary: "Reject a candidate and find them in the talent pool",
        requires_login: true,
        fixtures: &["candidate \"Ana Beatriz\" on the first job"],
    },
    Flow {
        name: "resume-analysis-ui",
        summary: "Profile modal shows the info and resume-analysis buttons",
        requires_login: true,
        fixtures: &["candidate \"Carlos Eduardo\" with an uploaded resume"],
    },
    Flow {
        name: "schedule-view",
        summary: "Open the interview schedule view",
        requires_login: true,
        fixtures: &[],
    },
    Flow {
        name: "archive-link",
        summary: "The archive control is reachable from the dashboard",
        requires_login: true,
        fixtures: &[],
    },
    Flow {
        name: "dashboard-tour",
        summary: "Screenshot the vagas/talentos/entrevistas dashboard tabs",
        requires_login: true,
        fixtures: &[],
    },
];

/// Recruiter login plus the dashboard-visible gate, used as setup by
/// every authenticated flow.
fn login_steps(credentials: &Credentials) -> Vec<Step> {
    vec![
        Step::fill(Locator::label("Email"), &credentials.email),
        Step::fill(Locator::label("Senha"), &credentials.password),
        Step::click(Locator::role("button", "Entrar")),
        Step::assert_visible(Locator::role("heading", "Vagas Abertas")).with_timeout_ms(10_000),
    ]
}

fn with_login(
    mut scenario: Scenario,
    credentials: Option<&Credentials>,
) -> Result<Scenario, FlowError> {
    let credentials =
        credentials.ok_or_else(|| FlowError::NeedsCredentials(scenario.name.clone()))?;
    scenario.setup = login_steps(credentials);
    Ok(scenario)
}

/// Build a built-in flow against `base_url`.
pub fn build(
    name: &str,
    base_url: &str,
    credentials: Option<&Credentials>,
) -> Result<Scenario, FlowError> {
    match name {
        "application-submission" => Ok(application_submission(base_url)),
        "recruiter-login" => with_login(recruiter_login(base_url), credentials),
        "messaging-panel" => with_login(messaging_panel(base_url), credentials),
        "candidate-profile" => with_login(candidate_profile(base_url), credentials),
        "rejection-to-talent-pool" => with_login(rejection_to_talent_pool(base_url), credentials),
        "resume-analysis-ui" => with_login(resume_analysis_ui(base_url), credentials),
        "schedule-view" => with_login(schedule_view(base_url), credentials),
        "archive-link" => with_login(archive_link(base_url), credentials),
        "dashboard-tour" => with_login(dashboard_tour(base_url), credentials),
        other => Err(FlowError::Unknown(other.to_string())),
    }
}

fn application_submission(base_url: &str) -> Scenario {
    Scenario::new("application-submission", base_url)
        .step(Step::fill(
            Locator::css("input[name='name']"),
            "Candidato Teste",
        ))
        .step(Step::fill(
            Locator::css("input[name='email']"),
            "teste@teste.com",
        ))
        .step(Step::fill(Locator::css("input[name='phone']"), "123456789"))
        .step(Step::select(
            Locator::css("select[name='jobId']"),
            "Desenvolvedor Frontend",
        ))
        .step(Step::click(Locator::css("button[type='submit']")))
        .step(Step::assert_visible(Locator::text("sucesso")).with_timeout_ms(10_000))
        .step(Step::screenshot("application-success"))
}

fn recruiter_login(base_url: &str) -> Scenario {
    // Login itself is the subject here, so it sits in the main steps
    // and the setup stays empty until with_login fills it; the extra
    // dashboard screenshot is the observable outcome.
    Scenario::new("recruiter-login", base_url).step(Step::screenshot("dashboard"))
}

fn messaging_panel(base_url: &str) -> Scenario {
    Scenario::new("messaging-panel", base_url)
        .step(Step::click(Locator::role("button", "Abrir mensagens")))
        .step(Step::assert_visible(Locator::text("Mensagens")))
        .step(Step::screenshot("messaging-panel"))
}

fn candidate_profile(base_url: &str) -> Scenario {
    Scenario::new("candidate-profile", base_url)
        .step(Step::click(Locator::text("Vagas").first()))
        .step(Step::click(Locator::css(".job-card").first()))
        .step(Step::click(Locator::css(".candidate-card").first()))
        .step(Step::assert_visible(Locator::text("Perfil do Candidato")).with_timeout_ms(10_000))
        .step(Step::screenshot("candidate-profile"))
}

fn rejection_to_talent_pool(base_url: &str) -> Scenario {
    Scenario::new("rejection-to-talent-pool", base_url)
        .step(Step::click(Locator::css(".job-card").first()))
        .step(Step::assert_visible(Locator::text("Ana Beatriz")).with_timeout_ms(10_000))
        .step(Step::click(Locator::text("Ana Beatriz")))
        .step(Step::click(
            Locator::role("button", "Ver Perfil & Análise IA").first(),
        ))
        .step(
            Step::assert_visible(Locator::role("heading", "Perfil do Candidato"))
                .with_timeout_ms(10_000),
        )
        .step(Step::select(
            Locator::label("Status da Candidatura"),
            "Rejeitado",
        ))
        .step(Step::click(Locator::role("button", "×")))
        .step(Step::click(Locator::role("button", "Banco de Talentos")))
        .step(Step::assert_visible(Locator::role("heading", "Banco de Talentos")))
        .step(Step::assert_visible(Locator::text("Ana Beatriz")))
        .step(Step::screenshot("talent-pool"))
}

fn resume_analysis_ui(base_url: &str) -> Scenario {
    Scenario::new("resume-analysis-ui", base_url)
        .step(Step::click(Locator::role("button", "Vagas")))
        .step(
            Step::assert_visible(Locator::role("heading", "Vagas Abertas"))
                .with_timeout_ms(10_000),
        )
        .step(Step::click(Locator::css(".job-card").first()))
        .step(Step::assert_visible(Locator::text("Carlos Eduardo")).with_timeout_ms(10_000))
        .step(Step::click(Locator::text("Carlos Eduardo")))
        .step(Step::click(
            Locator::role("button", "Ver Perfil & Análise IA").first(),
        ))
        .step(
            Step::assert_visible(Locator::role("heading", "Perfil do Candidato"))
                .with_timeout_ms(10_000),
        )
        .step(Step::assert_visible(Locator::role(
            "button",
            "Visualizar Informações",
        )))
        .step(Step::assert_visible(Locator::role(
            "button",
            "Análise de Currículo",
        )))
        .step(Step::screenshot("resume-analysis"))
}

fn schedule_view(base_url: &str) -> Scenario {
    Scenario::new("schedule-view", base_url)
        .step(Step::click(Locator::role("link", "Agenda")))
        .step(Step::assert_visible(Locator::role(
            "heading",
            "Central de Entrevistas",
        )))
        .step(Step::assert_visible(Locator::text("Calendário")))
        .step(Step::screenshot("schedule-view"))
}

fn archive_link(base_url: &str) -> Scenario {
    Scenario::new("archive-link", base_url)
        .step(Step::assert_visible(Locator::role("button", "Arquivo")).with_timeout_ms(10_000))
        .step(Step::screenshot("archive-link"))
}

fn dashboard_tour(base_url: &str) -> Scenario {
    Scenario::new("dashboard-tour", base_url)
        .step(Step::screenshot("dashboard"))
        .step(Step::click(Locator::role("button", "vagas")))
        .step(Step::screenshot("vagas"))
        .step(Step::click(Locator::role("button", "talentos")))
        .step(Step::screenshot("talentos"))
        .step(Step::click(Locator::role("button", "entrevistas")))
        .step(Step::screenshot("entrevistas"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirecheck_core::StepAction;

    fn creds() -> Credentials {
        Credentials {
            email: "admin@example.com".into(),
            password: "password".into(),
        }
    }

    #[test]
    fn every_listed_flow_builds() {
        for flow in FLOWS {
            let scenario = build(flow.name, "http://localhost:5173", Some(&creds())).unwrap();
            assert_eq!(scenario.name, flow.name);
            assert!(!scenario.steps.is_empty() || !scenario.setup.is_empty());
            assert_eq!(!scenario.setup.is_empty(), flow.requires_login);
        }
    }

    #[test]
    fn unknown_flow_is_rejected() {
        assert!(matches!(
            build("coffee-break", "http://localhost:5173", Some(&creds())),
            Err(FlowError::Unknown(_))
        ));
    }

    #[test]
    fn authenticated_flows_demand_credentials() {
        assert!(matches!(
            build("schedule-view", "http://localhost:5173", None),
            Err(FlowError::NeedsCredentials(_))
        ));
        // The public form does not.
        assert!(build("application-submission", "http://localhost:5173", None).is_ok());
    }

    #[test]
    fn submission_confirmation_waits_ten_seconds() {
        let scenario = build("application-submission", "http://localhost:5173", None).unwrap();
        let confirm = scenario
            .steps
            .iter()
            .find(|s| matches!(s.action, StepAction::AssertVisible { .. }))
            .expect("submission flow asserts a confirmation");
        assert_eq!(confirm.timeout_ms, 10_000);
    }

    #[test]
    fn archive_control_is_asserted_after_login() {
        let scenario = build("archive-link", "http://localhost:5173", Some(&creds())).unwrap();
        assert!(!scenario.setup.is_empty());
        assert!(scenario.steps.iter().any(|s| matches!(
            &s.action,
            StepAction::AssertVisible { target } if target.to_string() == "button \"Arquivo\""
        )));
    }

    #[test]
    fn login_setup_uses_credentials() {
        let scenario = build("messaging-panel", "http://localhost:5173", Some(&creds())).unwrap();
        assert_eq!(scenario.setup.len(), 4);
        match &scenario.setup[1].action {
            StepAction::Fill { target, value } => {
                assert_eq!(target.to_string(), "label \"Senha\"");
                assert_eq!(value, "password");
            }
            other => panic!("expected password fill, got {:?}", other),
        }
    }
}
