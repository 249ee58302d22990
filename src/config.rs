// src/config.rs
use crate::constants::{
    DEFAULT_DETAIL_BATCH_SIZE, ENV_API_KEY, ENV_ENDPOINT, ENV_MONGO_CONN_STR, ENV_MONGO_DATABASE,
};
use crate::error::AppError;
use crate::types::{ApiEndpoint, ApiKey, BatchSize};
use clap::Parser;

/// Parsed command-line input. Every flag is optional; a bare invocation runs one sync.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of template details fetched concurrently per batch
    #[arg(long, default_value_t = DEFAULT_DETAIL_BATCH_SIZE)]
    pub batch_size: usize,
}

/// Connection settings for the destination database.
#[derive(Debug, Clone)]
pub struct MongoSettings {
    pub connection_string: String,
    pub database: String,
}

/// Resolved sync configuration, validated before any network call.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_key: ApiKey,
    pub endpoint: ApiEndpoint,
    pub mongo: MongoSettings,
    pub batch_size: BatchSize,
}

impl SyncConfig {
    /// Resolves a complete configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::from_lookup(cli, |key| std::env::var(key).ok())
    }

    /// Resolves configuration using `lookup` in place of the environment.
    ///
    /// Variables are checked in a fixed order and the first missing one is
    /// reported. An empty or whitespace-only value counts as missing.
    pub fn from_lookup<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(AppError::MissingConfiguration(key))
        };

        let api_key = required(ENV_API_KEY)?;
        let endpoint = required(ENV_ENDPOINT)?;
        let connection_string = required(ENV_MONGO_CONN_STR)?;
        let database = required(ENV_MONGO_DATABASE)?;

        Ok(SyncConfig {
            api_key: ApiKey::new(api_key)?,
            endpoint: ApiEndpoint::parse(&endpoint)?,
            mongo: MongoSettings {
                connection_string,
                database,
            },
            batch_size: BatchSize::new(cli.batch_size)?,
        })
    }
}
