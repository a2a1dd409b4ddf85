use crate::models::args::GlobalArgs;
use crate::services::host::{DirectoryDownloads, PathFileSource};
use anyhow::{Context, Result};
use ts64::domain::config::{AppConfig, LoggingConfig};
use ts64::kernel::config::load_config;
use ts64::{Terminal, VaultStore};
use ts64_logger::{Logger, parse_level};

pub type ShellTerminal = Terminal<VaultStore, PathFileSource, DirectoryDownloads>;

/// Loads the layered config and applies command-line overrides on top.
pub fn load(args: &GlobalArgs) -> Result<AppConfig> {
    let mut config: AppConfig =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(dir) = &args.data_dir {
        config.storage.data_dir.clone_from(dir);
    }
    if let Some(dir) = &args.downloads {
        config.downloads.dir.clone_from(dir);
    }
    Ok(config)
}

/// Installs the global subscriber. Keep the returned handle alive.
pub fn init_logger(config: &LoggingConfig) -> Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .console(true)
        .level(parse_level(&config.level)?);
    let builder = match &config.filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    let logger = match &config.dir {
        Some(dir) => builder.path(dir).max_files(config.max_files).json(config.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

pub async fn open_terminal(config: &AppConfig, ephemeral: bool) -> Result<ShellTerminal> {
    let store = if ephemeral {
        tracing::info!("Using in-memory vault");
        VaultStore::ephemeral()
    } else {
        ts64::open_store(config).await.with_context(|| {
            format!("Failed to open vault at {}", config.storage.data_dir.display())
        })?
    };

    let downloads = DirectoryDownloads::new(&config.downloads.dir);
    Ok(ts64::terminal(config, store, PathFileSource, downloads))
}
