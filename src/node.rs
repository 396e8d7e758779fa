//! Node handle bound to a client.

use crate::client::Hashgrid;
use crate::error::Result;
use crate::types::{Edge, Message, NodeInfo, NodeUpdate, Status, Tick};

/// A node owned by the caller, through which peer messages are received
/// and answered.
#[derive(Debug, Clone)]
pub struct Node {
    info: NodeInfo,
    client: Hashgrid,
}

impl Node {
    /// Bind a node record to a client.
    pub fn new(info: NodeInfo, client: Hashgrid) -> Self {
        Node { info, client }
    }

    /// Node identifier.
    pub fn node_id(&self) -> &str {
        &self.info.node_id
    }

    /// Owning user.
    pub fn owner_id(&self) -> &str {
        &self.info.owner_id
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Node description / prompt.
    pub fn message(&self) -> &str {
        &self.info.message
    }

    /// Peer capacity.
    pub fn capacity(&self) -> u32 {
        self.info.capacity
    }

    /// Record snapshot.
    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    /// Messages from peers waiting for a reply.
    pub async fn recv(&self) -> Result<Vec<Message>> {
        let messages = self.client.edges().recv(&self.info.node_id).await?;
        if !messages.is_empty() {
            tracing::info!(
                node = %self.info.name,
                count = messages.len(),
                "Received messages from peers"
            );
        }
        Ok(messages)
    }

    /// Reply to peers. Match the returned statuses by `peer_id`.
    pub async fn send(&self, replies: &[Message]) -> Result<Vec<Status>> {
        tracing::info!(node = %self.info.name, count = replies.len(), "Sending replies to peers");
        let statuses = self.client.edges().send(&self.info.node_id, replies).await?;
        let successful = statuses.iter().filter(|s| s.success).count();
        tracing::info!(
            node = %self.info.name,
            successful,
            total = statuses.len(),
            "Sent replies"
        );
        Ok(statuses)
    }

    /// Edges of this node, optionally only those modified after a tick.
    pub async fn edges(&self, modified_after: Option<Tick>) -> Result<Vec<Edge>> {
        self.client.edges().list(&self.info.node_id, modified_after).await
    }

    /// Update name, description or capacity. Local fields follow whatever
    /// the server echoes back.
    pub async fn update(&mut self, update: NodeUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        let echoed = self.client.nodes().update(&self.info.node_id, &update).await?;
        echoed.apply(&mut self.info);
        Ok(())
    }

    /// Delete this node.
    pub async fn delete(self) -> Result<()> {
        self.client.nodes().delete(&self.info.node_id).await?;
        tracing::info!(node = %self.info.name, node_id = %self.info.node_id, "Deleted node");
        Ok(())
    }
}
