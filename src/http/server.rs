// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP listener serving the thermostat API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::Registry;
use crate::config::ServerConfig;
use crate::error::{Error, ProtocolError};

use super::api::ThermostatApi;
use super::request::Request;
use super::response::{Response, Status};

/// Pause after a failed `accept` so a persistent fault does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP/1.1 server answering one request per connection.
///
/// Each connection is handled on its own task. A client that has not sent
/// its whole request within [`ServerConfig::read_timeout`] gets a 408 and
/// the connection is closed.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use thermostat_api::{Registry, ServerConfig};
/// use thermostat_api::http::HttpServer;
///
/// #[tokio::main]
/// async fn main() -> thermostat_api::Result<()> {
///     let config = ServerConfig::default().with_address("127.0.0.1:8080".parse().unwrap());
///     let registry = Arc::new(Registry::with_thermostats(config.thermostats)?);
///
///     let server = HttpServer::bind(&config, registry).await?;
///     server.serve().await
/// }
/// ```
#[derive(Debug)]
pub struct HttpServer {
    listener: TcpListener,
    api: ThermostatApi,
    limits: Limits,
}

/// Per-connection bounds copied from [`ServerConfig`].
#[derive(Debug, Clone, Copy)]
struct Limits {
    max_body_bytes: usize,
    read_timeout: Duration,
}

impl HttpServer {
    /// Binds to `config.address`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] if the address cannot be bound.
    pub async fn bind(config: &ServerConfig, registry: Arc<Registry>) -> Result<Self, Error> {
        let listener = TcpListener::bind(config.address)
            .await
            .map_err(ProtocolError::Io)?;
        let server = Self {
            listener,
            api: ThermostatApi::new(registry),
            limits: Limits {
                max_body_bytes: config.max_body_bytes,
                read_timeout: config.read_timeout,
            },
        };

        tracing::info!(address = %server.local_addr()?, "Listening");
        Ok(server)
    }

    /// Returns the bound address, useful when binding port 0.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] if the socket address is unavailable.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr().map_err(ProtocolError::Io)?)
    }

    /// Serves until the process exits.
    ///
    /// # Errors
    ///
    /// Never returns an error in practice; per-connection failures are
    /// logged and do not stop the server.
    pub async fn serve(self) -> Result<(), Error> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serves until `shutdown` completes.
    ///
    /// Connections already accepted finish on their own tasks.
    ///
    /// # Errors
    ///
    /// Never returns an error in practice; per-connection failures are
    /// logged and do not stop the server.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::debug!(peer = %peer, "Accepted connection");
                        let api = self.api.clone();
                        let limits = self.limits;
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, &api, limits).await {
                                tracing::warn!(peer = %peer, error = %e, "Connection failed");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    api: &ThermostatApi,
    limits: Limits,
) -> Result<(), ProtocolError> {
    let (read_half, mut write_half) = stream.split();
    let mut reader = BufReader::new(read_half);

    let read = Request::read_from(&mut reader, limits.max_body_bytes);
    let received = tokio::time::timeout(limits.read_timeout, read)
        .await
        .unwrap_or(Err(ProtocolError::Timeout {
            after: limits.read_timeout,
        }));

    let response = match received {
        Ok(Some(request)) => {
            let response = api.handle(&request);
            tracing::debug!(
                method = %request.method,
                path = request.path(),
                status = response.status().code(),
                "Handled request"
            );
            response
        }
        Ok(None) => return Ok(()),
        Err(ProtocolError::Io(e)) => return Err(ProtocolError::Io(e)),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected request");
            let status = match e {
                ProtocolError::BodyTooLarge { .. } => Status::PayloadTooLarge,
                ProtocolError::HeadersTooLarge { .. } => Status::HeadersTooLarge,
                ProtocolError::Timeout { .. } => Status::RequestTimeout,
                _ => Status::BadRequest,
            };
            Response::error(status, e.to_string())
        }
    };

    response.write_to(&mut write_half).await?;
    write_half.shutdown().await?;
    Ok(())
}
