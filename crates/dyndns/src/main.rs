// # dyndns - one-shot DNS record updater
//
// Thin integration layer only: argument parsing, logging setup, component
// wiring, and exit-code mapping. All reconciliation logic lives in
// dyndns-core.
//
// The binary runs one reconciliation pass and exits; an external scheduler
// (cron, a systemd timer, or an inbound push request) reruns it.
//
// ## Exit Codes
//
// - 0: record is in sync (mutated, confirmed correct, or cache hit)
// - 1: configuration, authentication, network, or provider error

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::{resolve_address, Config, FileAddressCache, Outcome, PushParams, Reconciler};
use dyndns_ip_http::HttpIpSource;
use dyndns_provider_cloudflare::CloudflareProvider;

#[derive(Debug, Parser)]
#[command(name = "dyndns", version, about = "Keep a DNS record pointed at this host")]
struct Cli {
    /// Only report errors
    #[arg(short = 's', long)]
    silent: bool,

    /// Path to the configuration file
    #[arg(short, long, default_value = "dyndns.toml", value_name = "PATH")]
    config: PathBuf,

    /// Push mode: shared secret matching the configured auth_token
    #[arg(long, value_name = "SECRET")]
    auth_token: Option<String>,

    /// Push mode: address to publish
    #[arg(long, value_name = "ADDRESS")]
    ip: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.silent { Level::ERROR } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    if !cli.config.exists() {
        error!(
            "missing config file {}. Copy dyndns.toml.example next to the binary and fill out the values therein.",
            cli.config.display()
        );
        return ExitCode::FAILURE;
    }

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // The whole invocation is one linear sequence of awaits
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(config, &cli)) {
        Ok(_outcome) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the address and reconcile the record with it
async fn run(config: Config, cli: &Cli) -> Result<Outcome> {
    let source = HttpIpSource::new(config.protocol)?;
    let push = PushParams {
        auth_token: cli.auth_token.clone(),
        ip: cli.ip.clone(),
    };

    let resolved = resolve_address(&config, &push, &source).await?;

    let provider = CloudflareProvider::new(&config.email, &config.api_key)?;
    let cache = FileAddressCache::new(&config.cache_file, config.protocol);

    let reconciler = Reconciler::new(Box::new(provider), Box::new(cache), config);
    let outcome = reconciler.run(&resolved).await?;

    Ok(outcome)
}
