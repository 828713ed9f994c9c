//! Movie bot entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config
//!   4. Init logger once (CLI `-v` flags > env > config)
//!   5. Load catalog, build provider, read prompts (catalog failure is fatal)
//!   6. Probe the provider
//!   7. `--ask`: answer once and exit; otherwise serve HTTP until Ctrl-C

use movie_rag_bot::{config, error::AppError, logger, server, service::MovieQa};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        catalog = %config.catalog.path.display(),
        bind = %config.server.bind,
        llm = %config.llm.provider,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let qa = MovieQa::from_config(&config)?;

    if let Some(provider) = qa.provider() {
        match provider.ping().await {
            Ok(()) => info!(provider = provider.name(), "LLM provider reachable"),
            Err(e) => warn!(
                provider = provider.name(),
                model = provider.model(),
                error = %e,
                "LLM provider probe failed; is it running and is the model pulled? \
                 answers will fall back to templates"
            ),
        }
    }

    if let Some(query) = args.ask {
        let outcome = qa.answer(&query).await?;
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| AppError::Server(format!("cannot serialise answer: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    // Ctrl-C cancels the token so the server drains and exits.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    server::serve(&config.server, qa, shutdown).await
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    ask: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut ask = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: movie-rag-bot [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                println!("      --ask <QUERY>          Answer one question, print JSON and exit");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--ask" => {
                if let Some(query) = iter.next() {
                    ask = Some(query);
                } else {
                    eprintln!("error: --ask requires a query argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (extracted titles, escalation decisions)
    //   -vvvv+  → trace  (full provider payloads)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, ask }
}
