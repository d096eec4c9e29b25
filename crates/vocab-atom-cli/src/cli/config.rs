use anyhow::bail;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use vocab_atom::{
    DEFAULT_COMMAND_BUFFER_SIZE, DEFAULT_EVENT_BUFFER_SIZE, DEFAULT_FETCH_LIMIT,
    DEFAULT_SHUTDOWN_TIMEOUT_SECS, FetchConfig,
};

/// Runtime configuration for the `vocab-atom` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vocab-atom",
    version,
    about = "Sample vocabulary from a local set, one fetch episode at a time"
)]
pub struct CliArgs {
    /// Number of vocabulary items each fetch episode accumulates.
    ///
    /// Environment variable: `FETCH_LIMIT`
    #[arg(long, env = "FETCH_LIMIT", default_value_t = DEFAULT_FETCH_LIMIT)]
    pub fetch_limit: usize,

    /// JSON file holding an array of stored vocabulary records.
    ///
    /// When absent, a generated demo set is used instead.
    ///
    /// Environment variable: `SEED_FILE`
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Number of records in the generated demo set (set id `demo`).
    ///
    /// Ignored when `SEED_FILE` is given.
    ///
    /// Environment variable: `DEMO_SIZE`
    #[arg(long, env = "DEMO_SIZE", default_value_t = 200)]
    pub demo_size: u64,

    /// Capacity of the command channels feeding the orchestrator.
    ///
    /// Environment variable: `COMMAND_BUFFER_SIZE`
    #[arg(long, env = "COMMAND_BUFFER_SIZE", default_value_t = DEFAULT_COMMAND_BUFFER_SIZE)]
    pub command_buffer_size: usize,

    /// Capacity of the event channel read by the printer.
    ///
    /// Environment variable: `EVENT_BUFFER_SIZE`
    #[arg(long, env = "EVENT_BUFFER_SIZE", default_value_t = DEFAULT_EVENT_BUFFER_SIZE)]
    pub event_buffer_size: usize,

    /// Seconds to wait for the orchestrator to acknowledge shutdown.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT_SECS`
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    pub shutdown_timeout_secs: u64,

    /// Log output format, written to stderr.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Where the in-memory store gets its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    Seed(PathBuf),
    Demo(u64),
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub fetch: FetchConfig,
    pub source: StoreSource,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.fetch_limit == 0 {
            bail!("FETCH_LIMIT must be greater than 0");
        }

        if args.command_buffer_size == 0 {
            bail!("COMMAND_BUFFER_SIZE must be greater than 0");
        }

        if args.event_buffer_size == 0 {
            bail!("EVENT_BUFFER_SIZE must be greater than 0");
        }

        let source = match args.seed_file {
            Some(path) => StoreSource::Seed(path),
            None if args.demo_size == 0 => {
                bail!("DEMO_SIZE must be greater than 0 when no SEED_FILE is given")
            }
            None => StoreSource::Demo(args.demo_size),
        };

        let fetch = FetchConfig {
            fetch_limit: args.fetch_limit,
            command_buffer_size: args.command_buffer_size,
            event_buffer_size: args.event_buffer_size,
            shutdown_timeout_secs: args.shutdown_timeout_secs,
        };
        fetch.validate()?;

        Ok(Self {
            fetch,
            source,
            log_format: args.log_format,
        })
    }
}
