use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogo_app::config::{AppConfig, LogFormat};
use catalogo_app::{AppError, Session};
use catalogo_core::CaseNumber;
use catalogo_gateway::HttpGateway;

mod commands;

#[derive(Parser)]
#[command(name = "catalogo")]
#[command(about = "Multi-tenant museum cataloguing client")]
struct Cli {
    /// Backend base URL (overrides BACKEND_URL).
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Tenant to work in (overrides CATALOGO_TENANT).
    #[arg(long, global = true)]
    tenant: Option<String>,
    /// Print errors and records as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Tenants {
        #[command(subcommand)]
        command: TenantCommand,
    },
    Files {
        #[command(subcommand)]
        command: FileCommand,
    },
    Identifications {
        #[command(subcommand)]
        command: IdentificationCommand,
    },
}

#[derive(Subcommand)]
enum TenantCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        isil: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand)]
enum FileCommand {
    List {
        /// Case-number substring.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        case_number: CaseNumber,
    },
    Delete {
        case_number: CaseNumber,
    },
    Create {
        /// `Field=value`, repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    Edit {
        case_number: CaseNumber,
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum IdentificationCommand {
    List {
        /// Dotted search path, e.g. `author.Name`.
        #[arg(long, default_value = "material.MaterialName")]
        field: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        case_number: CaseNumber,
    },
    Delete {
        case_number: CaseNumber,
    },
    Create {
        #[arg(long = "case")]
        case_number: CaseNumber,
        /// `path=value`, repeatable (`inventory=3`, `author.Name=Goya`).
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    Edit {
        case_number: CaseNumber,
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.backend_url.clone() {
        config.backend_url = url;
    }
    if let Some(tenant) = cli.tenant.clone() {
        config.tenant = Some(tenant);
    }

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalogo=info,catalogo_gateway=info,catalogo_app=info".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    tracing::info!(backend = %config.backend_url, "Loaded client configuration");

    // --- Gateway & session ---
    let gateway = HttpGateway::new(&config.backend_url, config.request_timeout())
        .map_err(AppError::from)
        .context("Failed to build HTTP client")?;
    let session = match &config.tenant {
        Some(tenant) => Session::with_tenant(Arc::new(gateway), tenant.clone()),
        None => Session::new(Arc::new(gateway)),
    };

    commands::run(cli.command, session, cli.json).await
}
