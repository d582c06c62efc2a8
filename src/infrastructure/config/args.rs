use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "thumbgate",
    version,
    about = "A thumbnail retrieval gateway over pluggable backing stores",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Serve lookups from the thumbnail store instead of the history service.
    #[arg(long)]
    pub thumbnail_store: Option<bool>,

    /// File overriding the built-in default thumbnail.
    #[arg(long, value_name = "PATH")]
    pub default_thumbnail: Option<PathBuf>,

    /// Maximum number of thumbnails kept in the store's hot map.
    #[arg(long)]
    pub store_capacity: Option<usize>,

    /// Enable the history service (false simulates a deployment without one).
    #[arg(long)]
    pub history: Option<bool>,

    /// Page URLs to look up.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}
