use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use byt_admin::{BootstrapOptions, TuiExit, build_app, ui::run_tui};
use byt_config::{ConfigLoader, ConfigOverrides, LoggingConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "byt-admin",
    version,
    about = "Build-Your-Tech user administration console"
)]
struct Cli {
    /// Configuration file (defaults to ./byt-admin.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// dotenv file read as a low-priority environment layer
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
    /// Backend base URL
    #[arg(long)]
    base_url: Option<String>,
    /// Operator name used when logging in
    #[arg(long)]
    operator: Option<String>,
    /// Operator role code (1 is administrator)
    #[arg(long)]
    role: Option<u32>,
    /// tracing filter directive, e.g. "debug" or "byt_admin=trace"
    #[arg(long)]
    log_filter: Option<String>,
    /// Start without a signed-in operator
    #[arg(long)]
    logged_out: bool,
    /// Serve users from memory instead of the backend
    #[arg(long)]
    offline_demo: bool,
    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            operator_name: self.operator.clone(),
            operator_role: self.role,
            log_filter: self.log_filter.clone(),
        }
    }
}

// The TUI owns the terminal, so logs go to a file.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.file)
        .with_context(|| format!("failed to open log file {}", logging.file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| logging.filter.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new()
        .with_env_file(&cli.env_file)
        .with_overrides(cli.overrides());
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let load = loader.load().context("failed to load configuration")?;

    if cli.print_config {
        let rendered = load
            .config
            .to_toml()
            .context("failed to render configuration")?;
        print!("{rendered}");
        return Ok(());
    }

    init_tracing(&load.config.logging)?;
    info!(sources = ?load.sources, file = ?load.file, "Configuration loaded");

    let options = BootstrapOptions::default()
        .with_offline_demo(cli.offline_demo)
        .with_logged_out(cli.logged_out);
    let mut app =
        build_app(&load.config, options).context("failed to set up the API client")?;

    match run_tui(&mut app).await? {
        TuiExit::Quit => info!("Operator quit"),
        TuiExit::Navigated(route) => {
            info!("Left the users page for {}", route);
            println!("{route}");
        }
    }
    Ok(())
}
