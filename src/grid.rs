//! Grid handle bound to a client.

use crate::client::Hashgrid;
use crate::error::{HashgridError, Result};
use crate::listen::{TickPoller, TickStream};
use crate::node::Node;
use crate::types::{GridInfo, NewNode, Tick};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A grid the client is connected to.
///
/// Obtained from [`Hashgrid::connect`]. The `name` and `tick` fields are a
/// snapshot refreshed in place by [`listen`](Grid::listen) and
/// [`refresh`](Grid::refresh).
#[derive(Debug, Clone)]
pub struct Grid {
    info: GridInfo,
    client: Hashgrid,
}

impl Grid {
    /// Bind grid metadata to a client.
    pub fn new(info: GridInfo, client: Hashgrid) -> Self {
        Grid { info, client }
    }

    /// Grid name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Last tick observed.
    pub fn tick(&self) -> Tick {
        self.info.tick
    }

    /// Metadata snapshot.
    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    /// The client this grid talks through.
    pub fn client(&self) -> &Hashgrid {
        &self.client
    }

    /// Fetch the metadata once and update `name`/`tick`.
    pub async fn refresh(&mut self) -> Result<Tick> {
        self.info = self.client.grids().get().await?;
        Ok(self.info.tick)
    }

    /// Yield every new tick, polling every `poll_interval`.
    ///
    /// The stream never ends on transient failures; those are logged and
    /// retried after `poll_interval * 2`. Drop the stream to stop.
    pub fn listen(&mut self, poll_interval: Duration) -> TickStream<'_> {
        self.listen_until(poll_interval, CancellationToken::new())
    }

    /// [`listen`](Grid::listen) at the configured default interval.
    pub fn ticks(&mut self) -> TickStream<'_> {
        let poll_interval = self.client.config().poll_interval;
        self.listen(poll_interval)
    }

    /// Like [`listen`](Grid::listen), ending as soon as `cancel` fires.
    pub fn listen_until(
        &mut self,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> TickStream<'_> {
        tracing::info!(grid = %self.info.name, "Starting to listen for ticks");
        TickPoller::new(&self.client, &mut self.info, poll_interval, cancel).into_stream()
    }

    /// Nodes owned by the caller.
    ///
    /// The list is fetched in one request each time this is called. A failed
    /// fetch yields a single `Err`.
    pub fn nodes(&self) -> BoxStream<'static, Result<Node>> {
        let client = self.client.clone();
        stream::once(async move {
            let infos = client.nodes().list().await?;
            let nodes = infos
                .into_iter()
                .map(move |info| Ok::<_, HashgridError>(Node::new(info, client.clone())));
            Ok::<_, HashgridError>(tokio_stream::iter(nodes))
        })
        .try_flatten()
        .boxed()
    }

    /// Collect [`nodes`](Grid::nodes) into a vector.
    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        self.nodes().try_collect().await
    }

    /// Create a node owned by the caller.
    pub async fn create_node(&self, node: &NewNode) -> Result<Node> {
        let info = self.client.nodes().create(node).await?;
        tracing::info!(node = %info.name, node_id = %info.node_id, "Created node");
        Ok(Node::new(info, self.client.clone()))
    }
}
