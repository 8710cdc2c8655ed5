use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use careflow_core::Clock;
use careflow_core::model::{ParseIdError, Role, UnknownRole, UserId, UserSession};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AccessChecker, ExecutionSource, FixtureExecutionSource, HttpExecutionSource,
    HttpSourceConfig, PatientFlowService, RoleAccess,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Invalid(careflow_core::Error),
    NoSource,
    MissingUserId,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Invalid(err) => write!(f, "{err}"),
            ArgsError::NoSource => write!(f, "either --fixture or --api must be set"),
            ArgsError::MissingUserId => write!(f, "--api requires --user-id"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ParseIdError> for ArgsError {
    fn from(err: ParseIdError) -> Self {
        ArgsError::Invalid(err.into())
    }
}

impl From<UnknownRole> for ArgsError {
    fn from(err: UnknownRole) -> Self {
        ArgsError::Invalid(err.into())
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --fixture <path> [--name <display name>] [--role <role>]");
    eprintln!("  cargo run -p app -- --api <url> --user-id <uuid> [--token <token>] [--name <display name>]");
    eprintln!();
    eprintln!("Sample fixture: crates/app/fixtures/flows.json");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --name Patient");
    eprintln!("  --role patient");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAREFLOW_FIXTURE, CAREFLOW_API_URL, CAREFLOW_API_TOKEN,");
    eprintln!("  CAREFLOW_USER_ID, CAREFLOW_USER_NAME, RUST_LOG");
}

#[derive(Debug)]
enum SourceArg {
    Fixture(PathBuf),
    Api(HttpSourceConfig),
}

#[derive(Debug)]
struct Args {
    source: SourceArg,
    user_id: UserId,
    display_name: String,
    role: Role,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut fixture = env_value("CAREFLOW_FIXTURE").map(PathBuf::from);
        let mut api = HttpSourceConfig::from_env();
        let mut token = env_value("CAREFLOW_API_TOKEN");
        let mut user_id = env_value("CAREFLOW_USER_ID")
            .map(|raw| raw.parse::<UserId>())
            .transpose()?;
        let mut display_name = env_value("CAREFLOW_USER_NAME").unwrap_or_else(|| "Patient".into());
        let mut role = Role::Patient;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixture" => fixture = Some(PathBuf::from(require_value(args, "--fixture")?)),
                "--api" => {
                    let url = require_value(args, "--api")?;
                    api = Some(HttpSourceConfig::new(url, None));
                }
                "--token" => token = Some(require_value(args, "--token")?),
                "--user-id" => user_id = Some(require_value(args, "--user-id")?.parse()?),
                "--name" => display_name = require_value(args, "--name")?,
                "--role" => role = require_value(args, "--role")?.parse()?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        // A fixture wins over the API so local demos never hit the network.
        let (source, user_id) = match (fixture, api) {
            (Some(path), _) => (SourceArg::Fixture(path), user_id.unwrap_or_else(UserId::random)),
            (None, Some(config)) => {
                let config = HttpSourceConfig::new(config.base_url, token.or(config.api_token));
                (SourceArg::Api(config), user_id.ok_or(ArgsError::MissingUserId)?)
            }
            (None, None) => return Err(ArgsError::NoSource),
        };

        Ok(Self {
            source,
            user_id,
            display_name,
            role,
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

struct DesktopApp {
    session: UserSession,
    access: Arc<dyn AccessChecker>,
    flows: Arc<PatientFlowService>,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Option<UserSession> {
        Some(self.session.clone())
    }

    fn access(&self) -> Arc<dyn AccessChecker> {
        Arc::clone(&self.access)
    }

    fn flows(&self) -> Arc<PatientFlowService> {
        Arc::clone(&self.flows)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source: Arc<dyn ExecutionSource> = match parsed.source {
        SourceArg::Fixture(path) => {
            tracing::info!(path = %path.display(), "reading executions from fixture");
            Arc::new(FixtureExecutionSource::new(path))
        }
        SourceArg::Api(config) => {
            tracing::info!(base_url = %config.base_url, "reading executions from API");
            Arc::new(HttpExecutionSource::new(Some(config)))
        }
    };

    let session = UserSession::new(parsed.user_id, parsed.display_name, vec![parsed.role]);
    tracing::info!(user_id = %session.user_id(), role = %parsed.role, "starting portal");

    let app = DesktopApp {
        session,
        access: Arc::new(RoleAccess),
        flows: Arc::new(PatientFlowService::new(Clock::system(), source)),
    };
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Careflow")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
