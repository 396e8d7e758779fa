use super::{node_endpoint, BaseResource, NODE_ENDPOINT};
use crate::client::{decode, decode_list, Hashgrid};
use crate::error::Result;
use crate::types::{NewNode, NodeInfo, NodeUpdate};

/// Node management for the authenticated user.
#[derive(Debug, Clone)]
pub struct NodesResource {
    base: BaseResource,
}

impl NodesResource {
    /// Wrap a client.
    pub fn new(client: Hashgrid) -> Self {
        NodesResource {
            base: BaseResource::new(client),
        }
    }

    /// List every node owned by the caller.
    pub async fn list(&self) -> Result<Vec<NodeInfo>> {
        decode_list(self.base.get(NODE_ENDPOINT, &[]).await?)
    }

    /// Create a node.
    pub async fn create(&self, node: &NewNode) -> Result<NodeInfo> {
        decode(self.base.post(NODE_ENDPOINT, node).await?)
    }

    /// Apply a partial update and return the fields the server echoed.
    ///
    /// An empty update issues no request.
    pub async fn update(&self, node_id: &str, update: &NodeUpdate) -> Result<NodeUpdate> {
        if update.is_empty() {
            return Ok(NodeUpdate::default());
        }
        let echoed = self.base.put(&node_endpoint(node_id, ""), update).await?;
        if !echoed.is_object() {
            return Ok(NodeUpdate::default());
        }
        decode(echoed)
    }

    /// Delete a node.
    pub async fn delete(&self, node_id: &str) -> Result<()> {
        self.base.delete(&node_endpoint(node_id, "")).await?;
        Ok(())
    }
}
