//! Neurolab CLI - command-line console for the Neurolab back office.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (prompts for the password)
//! nl-cli login -e admin@neurolab.app
//!
//! # Dashboard summary cards
//! nl-cli dashboard
//!
//! # Triage partner requests
//! nl-cli requests list --status pending
//! nl-cli requests show 64fa0c2e9d1b4a0012ab34cd
//! nl-cli requests approve 64fa0c2e9d1b4a0012ab34cd
//!
//! # Manage the registration whitelist
//! nl-cli whitelist add new-admin@neurolab.app
//! nl-cli whitelist remove old-admin@neurolab.app
//!
//! # Export a collection as CSV
//! nl-cli export requests -o requests.csv
//! ```
//!
//! # Environment Variables
//!
//! - `NEUROLAB_API_URL` - Backend API base URL (default: hosted backend)
//! - `NEUROLAB_TOKEN_FILE` - Bearer-token file path
//! - `SENTRY_DSN` - Optional Sentry error tracking DSN
//! - `RUST_LOG` - Tracing filter (default: info for console crates)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use neurolab_admin::Config;
use neurolab_core::RequestStatus;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "nl-cli")]
#[command(author, version, about = "Neurolab admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the admin backend and store the session token
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop the local session token
    Logout,
    /// Show the dashboard summary cards
    Dashboard,
    /// Browse and triage partner requests
    Requests {
        #[command(subcommand)]
        action: RequestsAction,
    },
    /// Browse contact messages
    Contacts {
        /// Case-insensitive search over name, email and subject
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Manage the registration whitelist
    Whitelist {
        #[command(subcommand)]
        action: WhitelistAction,
    },
    /// Export a collection as CSV
    Export {
        /// Collection to export
        collection: Collection,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RequestsAction {
    /// List partner requests
    List {
        /// Restrict to one review status
        #[arg(short = 'f', long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,

        /// Case-insensitive search over company, contact person and email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show every field of one partner request
    Show {
        /// Request id
        id: String,
    },
    /// Approve a pending partner request
    Approve {
        /// Request id
        id: String,
    },
    /// Reject a pending partner request
    Reject {
        /// Request id
        id: String,
    },
}

#[derive(Subcommand)]
enum WhitelistAction {
    /// List whitelist entries
    List {
        /// Case-insensitive search over the email address
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Whitelist an email address for admin registration
    Add {
        /// Email address to whitelist
        email: String,
    },
    /// Remove an email address from the whitelist
    Remove {
        /// Email address to remove
        email: String,
    },
}

/// Status filter argument for `requests list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusArg {
    const fn to_filter(self) -> neurolab_admin::StatusFilter {
        use neurolab_admin::StatusFilter;
        match self {
            Self::All => StatusFilter::All,
            Self::Pending => StatusFilter::Only(RequestStatus::Pending),
            Self::Approved => StatusFilter::Only(RequestStatus::Approved),
            Self::Rejected => StatusFilter::Only(RequestStatus::Rejected),
        }
    }
}

/// Exportable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Collection {
    Requests,
    Contacts,
    Whitelist,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &Config) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
#[allow(clippy::print_stderr)] // config failure happens before the subscriber exists
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        // Subscriber is not up yet; this is the one pre-init failure path.
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(2);
    });

    // Initialize Sentry (must be done before the tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nl_cli=info,neurolab_admin=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(config, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(config)?,
        Commands::Dashboard => commands::dashboard::show(config).await?,
        Commands::Requests { action } => match action {
            RequestsAction::List { status, search } => {
                commands::requests::list(config, status.to_filter(), search).await?;
            }
            RequestsAction::Show { id } => commands::requests::show(config, &id).await?,
            RequestsAction::Approve { id } => {
                commands::requests::approve(config, &id).await?;
            }
            RequestsAction::Reject { id } => {
                commands::requests::reject(config, &id).await?;
            }
        },
        Commands::Contacts { search } => commands::contacts::list(config, search).await?,
        Commands::Whitelist { action } => match action {
            WhitelistAction::List { search } => {
                commands::whitelist::list(config, search).await?;
            }
            WhitelistAction::Add { email } => {
                commands::whitelist::add(config, &email).await?;
            }
            WhitelistAction::Remove { email } => {
                commands::whitelist::remove(config, &email).await?;
            }
        },
        Commands::Export { collection, output } => {
            let target = match collection {
                Collection::Requests => commands::export::Target::Requests,
                Collection::Contacts => commands::export::Target::Contacts,
                Collection::Whitelist => commands::export::Target::Whitelist,
            };
            commands::export::run(config, target, output).await?;
        }
    }
    Ok(())
}
