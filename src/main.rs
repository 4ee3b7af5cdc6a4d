mod app;
mod clipboard;
mod color;
mod config;
mod error;
mod gateway;
mod identity;
mod input;
mod palette;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "paleta", version, about = "Color palette generator for the terminal")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print a random palette to stdout (headless).
    Generate {
        /// Number of colors: 3, 4, 5, 6 or 8.
        #[arg(long, short)]
        size: Option<usize>,
    },
    /// List the signed-in user's saved palettes (headless).
    Saved,
    /// End the stored session.
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    let command = cli.command.unwrap_or(Command::Tui);
    init_logging(&cfg, matches!(command, Command::Tui))?;

    match command {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter().context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Generate { size } => {
            let size = size.unwrap_or_else(|| cfg.startup_size());
            if !palette::ALLOWED_SIZES.contains(&size) {
                anyhow::bail!("size must be one of {:?}", palette::ALLOWED_SIZES);
            }
            for swatch in palette::generate_palette(size) {
                println!("{}  text {}", swatch.display_value(), swatch.text_color());
            }
        }
        Command::Saved => {
            let (auth, gateway) = headless_services(&cfg)?;
            let user = auth
                .restore()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?
                .context("not signed in; sign in from the TUI first")?;
            let palettes = gateway
                .list(Some(&user))
                .await
                .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))?;
            if palettes.is_empty() {
                println!("No saved palettes yet.");
            }
            for (i, p) in palettes.iter().enumerate() {
                println!("{:02}. {}  {}", i + 1, p.name, p.colors.join(", "));
            }
        }
        Command::Logout => {
            let (auth, _) = headless_services(&cfg)?;
            auth.sign_out()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Signed out.");
        }
    }

    Ok(())
}

/// TUI logs go to a file so they don't draw over the screen.
fn init_logging(cfg: &config::Config, to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if to_file {
        let path = cfg.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn headless_services(
    cfg: &config::Config,
) -> anyhow::Result<(identity::AuthContext, gateway::PaletteGateway)> {
    let db_path = cfg.database_path();
    let _ = storage::Storage::open(&db_path)?;
    let handle = storage::StorageHandle::new(db_path);
    let auth = identity::AuthContext::new(Arc::new(identity::LocalAccounts::new(handle.clone())));
    let gateway = gateway::PaletteGateway::new(Arc::new(storage::SqliteStore::new(handle)));
    Ok((auth, gateway))
}
