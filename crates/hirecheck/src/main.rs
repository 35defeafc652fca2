mod flows;

use clap::{Parser, Subcommand};
use hirecheck_core::Scenario;
use hirecheck_engine::config::{ConfigLoader, Credentials, HirecheckConfig};
use hirecheck_engine::formatter::format_report;
use hirecheck_engine::probe;
use hirecheck_engine::runner::{RetryPolicy, RunOptions, Runner};
use hirecheck_webdriver::WebDriverSession;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hirecheck", version, about = "Browser-driven verification flows for the recruitment app")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Target application root (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// WebDriver endpoint, e.g. a local chromedriver (overrides config)
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Recruiter email for authenticated flows
    #[arg(long, requires = "password")]
    email: Option<String>,

    /// Recruiter password for authenticated flows
    #[arg(long, requires = "email")]
    password: Option<String>,

    /// Directory screenshots are written under
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// Launch the browser visibly instead of headless
    #[arg(long)]
    visible: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario from a YAML file
    Run {
        /// Scenario file, see flows/ for examples
        file: PathBuf,
    },
    /// Run a built-in verification flow
    Builtin {
        /// Flow name, see `hirecheck list`
        name: String,
    },
    /// List built-in flows and their fixture preconditions
    List,
}

fn apply_overrides(config: &mut HirecheckConfig, args: &Args) {
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }
    if let Some(artifacts_dir) = &args.artifacts_dir {
        config.artifacts_dir = artifacts_dir.clone();
    }
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        config.credentials = Some(Credentials {
            email: email.clone(),
            password: password.clone(),
        });
    }
    if args.visible {
        config.headless = false;
    }
}

fn list_flows() {
    for flow in flows::FLOWS {
        println!("{:<26} {}", flow.name, flow.summary);
        if flow.requires_login {
            println!("{:<26}   requires recruiter credentials", "");
        }
        for fixture in flow.fixtures {
            println!("{:<26}   fixture: {}", "", fixture);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report.
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load_default().await?;
    apply_overrides(&mut config, &args);

    let scenario = match &args.command {
        Command::List => {
            list_flows();
            return Ok(());
        }
        Command::Run { file } => {
            let mut scenario = Scenario::from_file(file)?;
            if let Some(base_url) = &args.base_url {
                scenario.base_url = base_url.clone();
            }
            scenario
        }
        Command::Builtin { name } => {
            flows::build(name, &config.base_url, config.credentials.as_ref())?
        }
    };

    let retry = RetryPolicy {
        attempts: config.connect_attempts,
        delay: Duration::from_millis(config.connect_delay_ms),
    };

    // Fail fast with a connectivity verdict when the dev server never
    // comes up, before spending a browser session on it.
    if let Err(cause) = probe::wait_until_reachable(&scenario.base_url, retry).await {
        error!("{}", cause);
        std::process::exit(1);
    }

    let runner = Runner::new(RunOptions {
        artifacts_dir: config.artifacts_dir.clone(),
        retry,
        ..RunOptions::default()
    });

    let mut session = if config.headless {
        WebDriverSession::new(&config.webdriver_url)
    } else {
        WebDriverSession::new_visible(&config.webdriver_url)
    };

    info!(scenario = %scenario.name, base_url = %scenario.base_url, "running");
    let report = runner.run(&mut session, &scenario).await;
    println!("{}", format_report(&report));

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
