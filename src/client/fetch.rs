//! The Hashgrid HTTP client.
//!
//! [`Hashgrid`] owns a single HTTP session and turns each logical call into
//! one request. The session moves through three states:
//!
//! ```text
//! Unopened ──open()──▶ Open ──close()──▶ Closed
//! ```
//!
//! Requests are only valid while `Open`. Closing is idempotent and a closed
//! client cannot be reopened.
//!
//! # Examples
//!
//! ```ignore
//! use hashgrid::{ClientConfig, Hashgrid};
//!
//! #[tokio::main]
//! async fn main() -> hashgrid::Result<()> {
//!     let grid = Hashgrid::connect(ClientConfig::from_env()?).await?;
//!     println!("connected to {} at tick {}", grid.name(), grid.tick());
//!     grid.client().close();
//!     Ok(())
//! }
//! ```
//!
//! ## Scoped sessions
//!
//! ```ignore
//! let client = Hashgrid::new(config);
//! {
//!     let session = client.session()?;
//!     let info = session.grids().get().await?;
//! } // session closed here, even if the future above was cancelled
//! ```

use crate::client::config::ClientConfig;
use crate::client::response::handle_response;
use crate::client::utils::{build_url, default_headers};
use crate::error::{HashgridError, Result};
use crate::grid::Grid;
use crate::resources::{EdgesResource, GridsResource, NodesResource};
use crate::types::GridInfo;
use parking_lot::RwLock;
use reqwest::Method;
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

/// Lifecycle state of a client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not yet opened
    Unopened,
    /// Ready to issue requests
    Open,
    /// Closed; requests fail with [`HashgridError::Closed`]
    Closed,
}

enum Session {
    Unopened,
    Open(reqwest::Client),
    Closed,
}

struct Inner {
    config: ClientConfig,
    session: RwLock<Session>,
}

/// Client for a Hashgrid service.
///
/// Cloning is cheap and every clone shares the same session: closing one
/// closes them all.
#[derive(Clone)]
pub struct Hashgrid {
    inner: Arc<Inner>,
}

impl Hashgrid {
    /// Create an unopened client.
    pub fn new(config: ClientConfig) -> Self {
        Hashgrid {
            inner: Arc::new(Inner {
                config,
                session: RwLock::new(Session::Unopened),
            }),
        }
    }

    /// Open a client, fetch the grid metadata and return the bound [`Grid`].
    ///
    /// Fails with [`HashgridError::Authentication`] when the key is rejected.
    pub async fn connect(config: ClientConfig) -> Result<Grid> {
        tracing::info!(base_url = %config.base_url, "Connecting to grid");
        let client = Hashgrid::new(config);
        client.open()?;
        let info: GridInfo = client.grids().get().await?;
        tracing::info!(grid = %info.name, tick = info.tick, "Connected to grid");
        Ok(Grid::new(info, client))
    }

    /// Open the HTTP session. Opening an already open client is a no-op.
    pub fn open(&self) -> Result<()> {
        let mut session = self.inner.session.write();
        match *session {
            Session::Open(_) => Ok(()),
            Session::Closed => Err(HashgridError::Closed),
            Session::Unopened => {
                let config = &self.inner.config;
                config.validate()?;
                let http = reqwest::Client::builder()
                    .default_headers(default_headers(config.api_key.as_deref())?)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .build()
                    .map_err(|e| HashgridError::Config(e.to_string()))?;
                *session = Session::Open(http);
                Ok(())
            }
        }
    }

    /// Close the HTTP session. Idempotent.
    pub fn close(&self) {
        let mut session = self.inner.session.write();
        if matches!(*session, Session::Open(_)) {
            tracing::debug!("Closing client session");
        }
        *session = Session::Closed;
    }

    /// Open the session and return a guard that closes it when dropped.
    pub fn session(&self) -> Result<SessionGuard> {
        self.open()?;
        Ok(SessionGuard {
            client: self.clone(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match *self.inner.session.read() {
            Session::Unopened => SessionState::Unopened,
            Session::Open(_) => SessionState::Open,
            Session::Closed => SessionState::Closed,
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Grid metadata operations.
    pub fn grids(&self) -> GridsResource {
        GridsResource::new(self.clone())
    }

    /// Node management operations, addressed by node id.
    pub fn nodes(&self) -> NodesResource {
        NodesResource::new(self.clone())
    }

    /// Edge and message operations, addressed by node id.
    pub fn edges(&self) -> EdgesResource {
        EdgesResource::new(self.clone())
    }

    /// Dispatch one request and return the decoded JSON body.
    ///
    /// `query` pairs are appended to the URL; `body` is sent as JSON when
    /// present. An empty success body yields `{}`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let http = self.http()?;
        let url = build_url(&self.inner.config.base_url, endpoint, query)?;

        tracing::debug!(%method, %url, "Dispatching request");

        let mut req_builder = http.request(method.clone(), url.clone());
        if let Some(body) = &body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await?;
        tracing::debug!(%method, %url, status = response.status().as_u16(), "Received response");

        handle_response(response).await
    }

    fn http(&self) -> Result<reqwest::Client> {
        match &*self.inner.session.read() {
            Session::Open(http) => Ok(http.clone()),
            Session::Unopened => Err(HashgridError::NotInitialized),
            Session::Closed => Err(HashgridError::Closed),
        }
    }
}

impl std::fmt::Debug for Hashgrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hashgrid")
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .finish()
    }
}

/// An open session that closes its client on drop.
///
/// Dereferences to [`Hashgrid`].
#[must_use = "the session closes as soon as the guard is dropped"]
pub struct SessionGuard {
    client: Hashgrid,
}

impl SessionGuard {
    /// A clone of the underlying client. Closing still happens when the
    /// guard drops.
    pub fn client(&self) -> Hashgrid {
        self.client.clone()
    }
}

impl Deref for SessionGuard {
    type Target = Hashgrid;

    fn deref(&self) -> &Hashgrid {
        &self.client
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.client.close();
    }
}
