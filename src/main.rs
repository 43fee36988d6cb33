use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use git_resource::config::Config;
use git_resource::resource::ResourceRunner;
use git_resource::types::Request;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "git-resource")]
#[command(about = "Git version resource for pull-based CI", long_about = None)]
struct Cli {
    /// Working directory the repository is cloned into
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "GIT_RESOURCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Report new versions since the request's ref
    Check,
    /// Fetch the requested version into the working directory
    Get,
    /// Accept a push (no-op)
    Put,
    /// Print the capability document
    Info,
}

fn main() -> Result<()> {
    // Stdout is reserved for the info document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "git_resource=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let request = Request::from_reader(std::io::stdin().lock())?;
    let runner = ResourceRunner::new(config, cli.dir);

    match cli.action {
        Action::Check => {
            runner.check(&request)?;
        }
        Action::Get => {
            runner.get(&request)?;
        }
        Action::Put => runner.put(&request)?,
        Action::Info => {
            let info = runner.info(&request);
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer(&mut stdout, &info)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
