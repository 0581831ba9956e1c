//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use titul_core::config::{self, Config};
use titul_core::session;

#[derive(Parser)]
#[command(name = "titul")]
#[command(version = "0.1")]
#[command(about = "ЧикенТитул terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL for this run
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Clear the stored session (sign out)
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(server) = cli.server {
        config.base_url = server;
    }

    // default to the interactive TUI
    let Some(command) = cli.command else {
        // Logs go to a rotating file; the TUI owns the terminal.
        let _guard = titul_core::logging::init().context("init logging")?;
        tracing::info!(base_url = %config.base_url, "starting TUI");
        return titul_tui::run_app(config).await;
    };

    match command {
        Commands::Logout => {
            session::clear().context("clear session")?;
            println!("Session cleared.");
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                println!("{}", config::paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Init => {
                let path = config::paths::config_path();
                if Config::init_default().context("init config")? {
                    println!("Created config at {}", path.display());
                    Ok(())
                } else {
                    anyhow::bail!("Config already exists at {}", path.display())
                }
            }
        },
    }
}
