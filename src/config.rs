//! Configuration management for surfsup.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use chrono::{Days, NaiveDate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SurfsUpError};

/// Date format used by the measurement table and by request paths
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Command-line arguments for surfsup
#[derive(Parser, Debug)]
#[command(name = "surfsup")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite file to serve
    pub database: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "SURFSUP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURFSUP_PORT")]
    pub port: Option<u16>,

    /// Maximum number of pooled database connections
    #[arg(short = 'm', long, env = "SURFSUP_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SURFSUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SURFSUP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the SQLite file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Reference date the "prior year" window is measured back from (YYYY-MM-DD)
    #[serde(default = "default_anchor_date")]
    pub anchor_date: String,

    /// Length of the "prior year" window in days
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Station whose observations `/api/v1.0/tobs` reports
    #[serde(default = "default_tobs_station")]
    pub tobs_station: String,

    /// Size of the read-only connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override values with those given on the command line or in the environment
    fn apply_args(&mut self, args: Args) {
        if let Some(database) = args.database {
            self.data.database_path = database;
        }
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(max_connections) = args.max_connections {
            self.data.max_connections = max_connections;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(SurfsUpError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(SurfsUpError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SurfsUpError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.data.lookback_days == 0 {
            return Err(SurfsUpError::Config {
                message: "Lookback window must be at least one day".to_string(),
            });
        }

        if self.data.tobs_station.trim().is_empty() {
            return Err(SurfsUpError::Config {
                message: "Temperature observation station cannot be empty".to_string(),
            });
        }

        if self.data.max_connections == 0 {
            return Err(SurfsUpError::Config {
                message: "Connection pool needs at least one connection".to_string(),
            });
        }

        self.data.window_start().map(|_| ())
    }
}

impl DataConfig {
    /// Parsed anchor date
    pub fn anchor(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.anchor_date, DATE_FORMAT).map_err(|e| {
            SurfsUpError::Config {
                message: format!("Invalid anchor date {}: {}", self.anchor_date, e),
            }
        })
    }

    /// First date of the "prior year" window: anchor minus the lookback
    pub fn window_start(&self) -> Result<NaiveDate> {
        let anchor = self.anchor()?;
        anchor
            .checked_sub_days(Days::new(u64::from(self.lookback_days)))
            .ok_or_else(|| SurfsUpError::Config {
                message: format!(
                    "Lookback of {} days from {} is out of range",
                    self.lookback_days, self.anchor_date
                ),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            anchor_date: default_anchor_date(),
            lookback_days: default_lookback_days(),
            tobs_station: default_tobs_station(),
            max_connections: default_max_connections(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("hawaii.sqlite")
}

fn default_anchor_date() -> String {
    "2017-08-23".to_string()
}

fn default_lookback_days() -> u32 {
    365
}

fn default_tobs_station() -> String {
    "USC00519281".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}
