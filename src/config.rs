// Configuration management for route-file
// Supports CLI arguments, config file (TOML), and environment variables

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

use crate::error::{RouteFileError, RouteFileResult};

/// route-file - Read and write static-route files
#[derive(Parser, Debug, Clone)]
#[command(name = "route-file")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, env = "ROUTE_FILE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ROUTE_FILE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the routes of a routes file as JSON
    Parse {
        /// Routes file (defaults to the configured path)
        file: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long, env = "ROUTE_FILE_PRETTY")]
        pretty: Option<bool>,
    },

    /// Write a routes file from a JSON list of routes
    Format {
        /// JSON file holding an array of routes
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a routes file survives a parse/format round trip
    Check {
        /// Routes file (defaults to the configured path)
        file: Option<PathBuf>,
    },
}

/// Configuration file structure (TOML format)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Routes file settings
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Routes file used when none is given on the command line
    #[serde(default = "default_routes_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_routes_path() -> PathBuf {
    PathBuf::from("/etc/network/routes")
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        RoutesConfig {
            path: default_routes_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            pretty: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl ConfigFile {
    pub fn from_toml(content: &str) -> RouteFileResult<Self> {
        toml::from_str(content).map_err(|e| RouteFileError::Config(e.to_string()))
    }

    pub fn read(path: &Path) -> RouteFileResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Merged configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub routes_path: PathBuf,
    pub pretty: bool,
    pub log_level: Level,
}

impl Config {
    /// Load configuration from all sources (CLI args, config file, defaults)
    /// Priority: CLI args > Environment variables > Config file > Defaults
    pub fn load() -> RouteFileResult<Self> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(cli_args: CliArgs) -> RouteFileResult<Self> {
        let config_file = if let Some(config_path) = &cli_args.config {
            ConfigFile::read(config_path)?
        } else {
            let default_path = PathBuf::from("route-file.toml");
            if default_path.exists() {
                ConfigFile::read(&default_path)?
            } else {
                ConfigFile::default()
            }
        };

        Self::merge(cli_args, config_file)
    }

    /// Merge configuration (CLI args override config file)
    pub fn merge(cli_args: CliArgs, config_file: ConfigFile) -> RouteFileResult<Self> {
        let level = cli_args
            .log_level
            .unwrap_or(config_file.logging.level);
        let log_level = parse_log_level(&level)?;

        let pretty = match &cli_args.command {
            Command::Parse { pretty: Some(pretty), .. } => *pretty,
            _ => config_file.output.pretty,
        };

        Ok(Config {
            command: cli_args.command,
            routes_path: config_file.routes.path,
            pretty,
            log_level,
        })
    }
}

fn parse_log_level(level_str: &str) -> RouteFileResult<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(RouteFileError::Config(format!("Invalid log level: {}", level_str))),
    }
}
