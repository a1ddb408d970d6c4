use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Each one can also come from a `PAGESMITH_*` variable
/// and overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "pagesmith-server", version, about = "Block page editor server")]
pub struct Cli {
    /// Configuration file location
    #[arg(short, long, env = "PAGESMITH_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "PAGESMITH_BIND")]
    pub bind: Option<String>,

    #[arg(long = "database", env = "PAGESMITH_DATABASE")]
    pub database_path: Option<PathBuf>,

    #[arg(long, env = "PAGESMITH_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[arg(long, env = "PAGESMITH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(path) = &self.database_path {
            config.database_path = path.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.static_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}
