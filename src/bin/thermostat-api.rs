// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serves simulated thermostats over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use thermostat_api::http::HttpServer;
use thermostat_api::{Registry, ServerConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "thermostat-api")]
#[command(about = "Serve simulated thermostats over a JSON HTTP API")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value_t = ServerConfig::DEFAULT_ADDRESS)]
    address: SocketAddr,

    /// Number of thermostats to create at startup
    #[arg(short = 'n', long, default_value_t = ServerConfig::DEFAULT_THERMOSTATS)]
    thermostats: usize,

    /// Largest request body accepted, in bytes
    #[arg(long, default_value_t = ServerConfig::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Seconds a client may take to send its request
    #[arg(long, default_value_t = ServerConfig::DEFAULT_READ_TIMEOUT.as_secs())]
    read_timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        ServerConfig::default()
            .with_address(args.address)
            .with_thermostats(args.thermostats)
            .with_max_body_bytes(args.max_body_bytes)
            .with_read_timeout(Duration::from_secs(args.read_timeout))
    }
}

fn init_logger(verbose: bool) {
    let fallback = if verbose {
        "thermostat_api=debug,info"
    } else {
        "thermostat_api=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = ServerConfig::from(&args);
    tracing::debug!(?config, "Starting thermostat API");

    let registry = Arc::new(Registry::with_thermostats(config.thermostats)?);
    let server = HttpServer::bind(&config, registry).await?;
    server.serve_with_shutdown(shutdown_signal()).await?;

    Ok(())
}
