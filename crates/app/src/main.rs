//! # Relay CLI
//!
//! Sends authenticated requests through the gateway and prints the
//! unwrapped payload as JSON.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_domain::constants::ENV_TOKEN;
use relay_domain::HttpMethod;
use relay_infra::config::ConfigSource;
use relay_lib::utils::logging::init_tracing;
use relay_lib::{parse_key_val, send_request, test_get, test_post, AppContext, RequestArgs};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Send authenticated requests through the Relay gateway")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Mode whose `.env.<mode>` files are loaded
    #[arg(long, default_value = "development")]
    mode: String,

    /// Configuration file path (skips environment lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session token sent as the `xtoken` header
    #[arg(long, env = ENV_TOKEN, hide_env_values = true)]
    token: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// GET a path with optional query parameters
    Get {
        path: String,
        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// POST a JSON body to a path
    Post {
        path: String,
        /// Request body as JSON
        #[arg(short, long)]
        data: Option<String>,
    },
    /// PUT a JSON body to a path
    Put {
        path: String,
        /// Request body as JSON
        #[arg(short, long)]
        data: Option<String>,
    },
    /// DELETE a path
    Delete { path: String },
    /// GET /v1/test
    TestGet {
        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// POST /v1/test
    TestPost {
        /// Request body as JSON
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Env files first so RELAY_* values are visible to the loader
    let env_files = relay_infra::config::load_env_files(Some(cli.mode.as_str()))?;

    let (config, source) = match &cli.config {
        Some(path) => (
            relay_infra::config::load_from_file(Some(path.clone()))?,
            ConfigSource::File(path.clone()),
        ),
        None => relay_infra::config::load_with_source()?,
    };

    // Loading happens before the subscriber exists, so report it now
    init_tracing(&config.logging, cli.verbose, cli.json_logs)?;
    for file in &env_files {
        debug!(path = %file.display(), "Loaded env file");
    }
    info!(%source, "Configuration loaded");

    let ctx = AppContext::new(config).context("failed to initialize application context")?;
    if let Some(token) = cli.token.as_deref() {
        ctx.session.set_token(token);
    }

    info!(mode = %cli.mode, authenticated = ctx.session.is_authenticated(), "Relay CLI starting");

    let result = match cli.command {
        Commands::Get { path, params } => {
            send_request(&ctx, RequestArgs { method: HttpMethod::Get, path, params, data: None })
                .await
        }
        Commands::Post { path, data } => {
            send_request(&ctx, RequestArgs { method: HttpMethod::Post, path, params: Vec::new(), data })
                .await
        }
        Commands::Put { path, data } => {
            send_request(&ctx, RequestArgs { method: HttpMethod::Put, path, params: Vec::new(), data })
                .await
        }
        Commands::Delete { path } => {
            send_request(
                &ctx,
                RequestArgs { method: HttpMethod::Delete, path, params: Vec::new(), data: None },
            )
            .await
        }
        Commands::TestGet { params } => test_get(&ctx, params).await,
        Commands::TestPost { data } => test_post(&ctx, data.as_deref()).await,
    };

    match result {
        Ok(payload) => print_payload(&payload),
        Err(err) => {
            if err.is_auth_failure() {
                warn!("Session token rejected; log in again and retry with a fresh token");
            }
            Err(err.into())
        }
    }
}

fn print_payload(payload: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
