//! drsession - Session 读取命令行入口

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use session_reader::{split_payload, SessionData, SessionError, SessionReader, StoreConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Read and decode framework sessions stored in Redis
#[derive(Parser, Debug)]
#[command(name = "drsession")]
#[command(version, about = "Read and decode framework sessions stored in Redis")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    // ==================== Redis ====================

    /// Redis host (defaults to $REDIS_HOST or localhost)
    #[arg(long, global = true)]
    redis_host: Option<String>,

    /// Redis port (defaults to $REDIS_PORT or 6379)
    #[arg(long, global = true)]
    redis_port: Option<u16>,

    /// Redis password (defaults to $REDIS_PASSWORD)
    #[arg(long, global = true)]
    redis_password: Option<String>,

    /// Redis logical database (defaults to $REDIS_DB or 0)
    #[arg(long, global = true)]
    redis_db: Option<i64>,

    /// Prefix prepended to every session key
    #[arg(long, global = true)]
    key_prefix: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a session from Redis and print its data
    Get {
        /// Session key
        key: String,
    },
    /// Decode a raw stored value without connecting to Redis
    Decode {
        /// Raw base64 value (read from stdin when omitted)
        raw: Option<String>,
    },
}

#[derive(Serialize)]
struct DecodedOutput {
    identifier: String,
    data: SessionData,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::default();
        if let Some(host) = &self.redis_host {
            config.host = host.clone();
        }
        if let Some(port) = self.redis_port {
            config.port = port;
        }
        if let Some(password) = &self.redis_password {
            config.password = Some(password.clone());
        }
        if let Some(db) = self.redis_db {
            config.db = db;
        }
        if let Some(prefix) = &self.key_prefix {
            config.key_prefix = prefix.clone();
        }
        config
    }
}

fn parse_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn init_logging(level: &str) -> Result<()> {
    // RUST_LOG 优先，否则使用 --log-level；日志写 stderr，stdout 只输出 JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(level).into()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

async fn run_get(args: &Args, key: &str) -> Result<ExitCode> {
    let config = args.store_config();
    info!(
        "Connecting to Redis at {}:{} (db {})",
        config.host, config.port, config.db
    );

    let reader = SessionReader::connect(config)
        .await
        .context("Failed to connect to Redis")?;

    match reader.get_session(key).await {
        Ok(data) => {
            println!("{}", to_json(&data, args.compact)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(SessionError::NotFound) => {
            warn!("Session {} not found", key);
            eprintln!("Session not found: {}", key);
            Ok(ExitCode::FAILURE)
        }
        Err(SessionError::Empty) => {
            eprintln!("Session is empty: {}", key);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read session {}", key)),
    }
}

fn run_decode(args: &Args, raw: Option<&str>) -> Result<ExitCode> {
    let raw = match raw {
        Some(raw) => raw.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read raw value from stdin")?;
            buf.trim().to_string()
        }
    };

    let payload = split_payload(&raw).context("Failed to decode session payload")?;
    let output = DecodedOutput {
        identifier: String::from_utf8_lossy(&payload.identifier).into_owned(),
        data: payload.data,
    };
    println!("{}", to_json(&output, args.compact)?);
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    match &args.command {
        Command::Get { key } => run_get(&args, key).await,
        Command::Decode { raw } => run_decode(&args, raw.as_deref()),
    }
}
