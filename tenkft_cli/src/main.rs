mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tenkft_api::{Client, Environment};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tenkft")]
#[command(about = "Query projects, people and schedules from 10,000ft")]
struct Cli {
    /// Output format: table, json, or csv
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API environment: staging or production (falls back to TENKFT_ENV)
    #[arg(long, global = true)]
    env: Option<String>,

    /// Retries per request on non-2xx responses (falls back to TENKFT_MAX_RETRIES)
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects or show one
    Projects(commands::projects::ProjectsArgs),
    /// List users, optionally those on one project
    Users(commands::users::UsersArgs),
    /// List assignments for a user or a project
    Assignments(commands::assignments::AssignmentsArgs),
    /// List phases of a project
    Phases(commands::reference::ProjectScopedArgs),
    /// List bill rates of a project
    BillRates(commands::reference::ProjectScopedArgs),
    /// List leave types
    LeaveTypes(commands::reference::ReferenceArgs),
    /// List roles
    Roles(commands::reference::ReferenceArgs),
    /// List placeholder resources
    Placeholders(commands::reference::ReferenceArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tenkft=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let env_name = cli
        .env
        .clone()
        .or_else(|| std::env::var("TENKFT_ENV").ok())
        .unwrap_or_else(|| "staging".to_string());
    let env: Environment = env_name.parse()?;

    let token = std::env::var("TENKFT_TOKEN")
        .context("TENKFT_TOKEN must be set (in the environment or a .env file)")?;

    let mut client = Client::new(&token, env)?;
    if let Some(max_retries) = cli.max_retries {
        client = client.with_max_retries(max_retries);
    }

    match &cli.command {
        Commands::Projects(args) => commands::projects::run(args, &client, &format).await?,
        Commands::Users(args) => commands::users::run(args, &client, &format).await?,
        Commands::Assignments(args) => commands::assignments::run(args, &client, &format).await?,
        Commands::Phases(args) => commands::reference::run_phases(args, &client, &format).await?,
        Commands::BillRates(args) => {
            commands::reference::run_bill_rates(args, &client, &format).await?
        }
        Commands::LeaveTypes(args) => {
            commands::reference::run_leave_types(args, &client, &format).await?
        }
        Commands::Roles(args) => commands::reference::run_roles(args, &client, &format).await?,
        Commands::Placeholders(args) => {
            commands::reference::run_placeholders(args, &client, &format).await?
        }
    }

    Ok(())
}
