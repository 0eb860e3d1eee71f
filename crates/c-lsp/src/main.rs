//! c-lsp - Main entry point

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use c_lsp_core::WritePolicy;
use c_lsp_server::{ServerConfig, Transport};

const DEFAULT_LOG_FILTER: &str = "c_lsp=info,c_lsp_core=info,c_lsp_server=info";

#[derive(Parser, Debug)]
#[command(name = "c-lsp")]
#[command(version)]
#[command(about = "Language server reporting C syntax errors", long_about = None)]
struct Cli {
    /// Communicate over TCP on HOST:PORT instead of stdio
    #[arg(long, value_name = "HOST:PORT")]
    tcp: Option<String>,

    /// Write logs to FILE (truncated on start) instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Ignore diagnostics for document versions older than the latest seen
    #[arg(long)]
    reject_stale: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            transport: match &self.tcp {
                Some(addr) => Transport::Tcp(addr.clone()),
                None => Transport::Stdio,
            },
            write_policy: if self.reject_stale {
                WritePolicy::RejectStale
            } else {
                WritePolicy::LastWriteWins
            },
        }
    }
}

/// Install the global subscriber. stdout carries the protocol, so logs go
/// to stderr or to `log_file`.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting c-lsp");

    let config = cli.server_config();

    // Create a new tokio runtime for the LSP server
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(c_lsp_server::run_server(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_stdio_and_last_write_wins() {
        let cli = Cli::try_parse_from(["c-lsp"]).unwrap();
        assert_eq!(cli.server_config(), ServerConfig::default());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn tcp_and_hardening_flags() {
        let cli = Cli::try_parse_from([
            "c-lsp",
            "--tcp",
            "127.0.0.1:5007",
            "--reject-stale",
            "--log-file",
            "lsp.log",
        ])
        .unwrap();

        let config = cli.server_config();
        assert_eq!(config.transport, Transport::Tcp("127.0.0.1:5007".to_string()));
        assert_eq!(config.write_policy, WritePolicy::RejectStale);
        assert_eq!(cli.log_file.as_deref(), Some(Path::new("lsp.log")));
    }

    #[test]
    fn tcp_requires_an_address() {
        assert!(Cli::try_parse_from(["c-lsp", "--tcp"]).is_err());
    }
}
