//! `signbridge` command-line client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the session core against a `FileStore`, so a session started by
//! one invocation is visible to the next. Every command prints the resulting
//! session as JSON on stdout; logs go to stderr.

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use signbridge::storage::FileStore;
use signbridge::{AuthForm, AuthMode, AuthState, FormError, SessionConfig, SessionController, SessionStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signbridge", about = "SignBridge local session client")]
struct Cli {
    /// Storage file; overrides `SIGNBRIDGE_STORAGE_PATH`.
    #[arg(long)]
    storage_path: Option<PathBuf>,

    /// Simulated auth delay; overrides `SIGNBRIDGE_LATENCY_MS`.
    #[arg(long)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current session.
    Status,
    /// Sign in with any email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SIGNBRIDGE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SIGNBRIDGE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SessionConfig::from_env().context("invalid session configuration")?;
    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }
    if let Some(ms) = cli.latency_ms {
        config.latency = Duration::from_millis(ms);
    }

    let controller = open_controller(&config);
    tracing::debug!(path = %config.storage_path.display(), "session storage opened");

    let outcome = dispatch(cli.command, &controller).await;

    println!("{}", serde_json::to_string_pretty(&render_state(&controller.store().snapshot()))?);
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Restore the session persisted at `config.storage_path`.
fn open_controller(config: &SessionConfig) -> SessionController {
    let storage = Arc::new(FileStore::new(&config.storage_path));
    let store = Arc::new(SessionStore::open(storage, config.storage_key.clone()));
    SessionController::new(store, config)
}

async fn dispatch(command: Command, controller: &SessionController) -> Result<(), FormError> {
    match command {
        Command::Status => Ok(()),
        Command::Login { email, password } => {
            let mut form = AuthForm { email, password, ..AuthForm::new(AuthMode::SignIn) };
            form.submit(controller).await.map(|_| ())
        }
        Command::Signup { name, email, password } => {
            let mut form = AuthForm { name, email, password, ..AuthForm::new(AuthMode::SignUp) };
            form.submit(controller).await.map(|_| ())
        }
        Command::Logout => {
            controller.logout();
            Ok(())
        }
    }
}

fn render_state(state: &AuthState) -> serde_json::Value {
    serde_json::json!({
        "isAuthenticated": state.is_authenticated(),
        "isLoading": state.is_loading(),
        "user": state.user(),
    })
}
