//! msfdb-conf
//!
//! Resolves the Metasploit module data backend configuration and checks
//! that an HTTP backend is reachable.
//!
//! ```text
//!   config.toml (optional) ──▶ loader ──▶ MetasploitConf
//!                                              │
//!   METASPLOITDB_* env vars ──────────────────▶│ resolve (env > file > defaults)
//!                                              ▼
//!                                  ┌───────────┴───────────┐
//!                                  │                       │
//!                              `resolve`               `health`
//!                        print redacted JSON     GET {url}/health, exit 1
//!                                                 unless it answers 200
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use msfdb_conf::config::load_or_default;
use msfdb_conf::observability::init_tracing;

#[derive(Parser)]
#[command(name = "msfdb-conf")]
#[command(about = "Resolve and health-check the Metasploit module data backend", long_about = None)]
struct Cli {
    /// TOML config file. Without it only env vars and defaults apply.
    #[arg(short, long, env = "MSFDB_CONF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration (connection strings redacted)
    Resolve,
    /// Check that an HTTP backend answers on its health endpoint
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    init_tracing(&config.observability);

    let resolution = config.metasploit.resolve()?;
    let conf = &config.metasploit;
    let backend_type = conf.backend_type.map_or("unset", |kind| kind.as_str());

    tracing::info!(
        backend_type,
        fetch_via_http = conf.is_fetch_via_http(),
        warnings = resolution.warnings.len(),
        "Configuration resolved"
    );

    match cli.command {
        Commands::Resolve => {
            let report = json!({
                "metasploit": conf,
                "fetch_via_http": conf.is_fetch_via_http(),
                "url_configured": conf.url().is_some(),
                "sqlite3_path_configured": conf.sqlite3_path().is_some(),
                "warnings": resolution
                    .warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Health => {
            if let Err(e) = conf.check_health().await {
                tracing::error!(url = %e.url, reason = %e.reason, "Metasploit backend unavailable");
                eprintln!("Error: {}", e);
                return Ok(ExitCode::FAILURE);
            }
            if conf.is_fetch_via_http() {
                println!("ok");
            } else {
                println!("ok (backend is {}, nothing to check)", backend_type);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
