//! bough-proxy: serves the model-configuration document with the iflow
//! model guaranteed.

use anyhow::{Context, Result};
use bough_core::get_config_dirs;
use bough_proxy::{MODELS_CONFIG_ROUTE, ProxyConfig, router};
use clap::{ArgAction, Parser};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Proxy for the model-configuration service")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,

  /// Address to listen on (defaults to the configured proxy.bind_addr)
  #[arg(long = "bind", value_name = "ADDR")]
  bind: Option<String>,

  /// Base URL of the model-configuration service
  #[arg(long = "upstream", value_name = "URL")]
  upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  let settings = get_config_dirs()?.load_config()?;
  let config = ProxyConfig::resolve(&settings, cli.upstream, cli.bind)?;

  let listener = TcpListener::bind(config.bind_addr)
    .await
    .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
  info!(
    "Serving {MODELS_CONFIG_ROUTE} on {} (upstream {})",
    config.bind_addr, config.upstream_base_url
  );

  axum::serve(listener, router(config)).await.context("Proxy server failed")?;
  Ok(())
}
