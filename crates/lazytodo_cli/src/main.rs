//! LazyTodo command-line entry point.
//!
//! # Responsibility
//! - Run the todo HTTP API (`serve`).
//! - Run the SQL toolkit walkthroughs (`sql-basics`, `sql-core`).
//! - Print linkage probes (`version`).

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use lazytodo_core::demo::{basics, builder};
use lazytodo_core::sqlkit::Engine;
use lazytodo_core::{core_version, default_log_level, init_logging, ping};
use lazytodo_http::{serve, ServerConfig};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;

const BASICS_DB_FILE: &str = "basics.db";
const BUILDER_DB_FILE: &str = "mydb.db";

#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, about = "In-memory todo API and SQL walkthroughs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the todo HTTP API.
    Serve(ServeArgs),
    /// Raw SQL walkthrough: create, insert, select.
    SqlBasics(SqlArgs),
    /// Metadata and query-builder walkthrough over users/things.
    SqlCore {
        #[command(flatten)]
        sql: SqlArgs,
        /// Seed for choosing the owner of unowned things.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print core linkage probes.
    Version,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, env = "LAZYTODO_HOST", default_value = lazytodo_http::server::DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "LAZYTODO_PORT", default_value_t = lazytodo_http::server::DEFAULT_PORT)]
    port: u16,
    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, env = "LAZYTODO_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long, env = "LAZYTODO_LOG_DIR")]
    log_dir: Option<String>,
    /// Start with an empty collection instead of the sample todos.
    #[arg(long)]
    empty: bool,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            log_level: args
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: args.log_dir,
            seed: !args.empty,
        }
    }
}

#[derive(Debug, Args)]
struct SqlArgs {
    /// SQLite database file; created when missing.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Log every SQL statement at info level.
    #[arg(long)]
    echo: bool,
    #[arg(long, env = "LAZYTODO_LOG_LEVEL")]
    log_level: Option<String>,
}

impl SqlArgs {
    /// The two walkthroughs define incompatible `users` tables, so each one
    /// defaults to its own file.
    fn open(&self, default_db: &str) -> Result<Engine> {
        let level = match (&self.log_level, self.echo) {
            (Some(level), _) => level.clone(),
            (None, true) => "info".to_string(),
            (None, false) => "warn".to_string(),
        };
        init_logging(&level, None).map_err(|err| anyhow!(err))?;
        let path = self
            .db
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_db));
        Engine::open(&path, self.echo)
            .with_context(|| format!("failed to open `{}`", path.display()))
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Serve(args) => run_server(args.into()),
        Command::SqlBasics(sql) => {
            let engine = sql.open(BASICS_DB_FILE)?;
            log_walkthrough("sql_basics", || {
                basics::run(&engine, &mut std::io::stdout().lock()).map(|rows| rows.len())
            })
        }
        Command::SqlCore { sql, seed } => {
            let engine = sql.open(BUILDER_DB_FILE)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            log_walkthrough("sql_core", || {
                builder::run(&engine, &mut std::io::stdout().lock(), &mut rng)
                    .map(|report| report.ownership.len())
            })
        }
        Command::Version => {
            println!("lazytodo_core ping={}", ping());
            println!("lazytodo_core version={}", core_version());
            Ok(())
        }
    }
}

/// Runs one walkthrough and logs its outcome; `run` returns a row count.
fn log_walkthrough<E>(command: &str, run: impl FnOnce() -> Result<usize, E>) -> Result<()>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let started_at = Instant::now();
    match run() {
        Ok(rows) => {
            info!(
                "event=cli_command module=cli status=ok command={command} rows={rows} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error command={command} error={err}");
            Err(err.into())
        }
    }
}

fn run_server(config: ServerConfig) -> Result<()> {
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(|err| anyhow!(err))?;
    info!(
        "event=cli_command module=cli status=start command=serve addr={} seed={}",
        config.bind_addr(),
        config.seed
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let result = runtime.block_on(serve(&config));
    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command=serve"),
        Err(err) => error!("event=cli_command module=cli status=error command=serve error={err}"),
    }
    result.with_context(|| format!("server on {} stopped", config.bind_addr()))
}
