use super::{node_endpoint, BaseResource};
use crate::client::{decode_list, Hashgrid};
use crate::error::{HashgridError, Result};
use crate::types::{Edge, Message, Status, Tick};

/// Edges and message exchange for a node. Every call requires node
/// ownership and grid membership.
#[derive(Debug, Clone)]
pub struct EdgesResource {
    base: BaseResource,
}

impl EdgesResource {
    /// Wrap a client.
    pub fn new(client: Hashgrid) -> Self {
        EdgesResource {
            base: BaseResource::new(client),
        }
    }

    /// List a node's edges.
    ///
    /// With `modified_after`, the server only returns edges whose
    /// `modified_tick` is greater than it. The parameter is only sent when
    /// set.
    pub async fn list(&self, node_id: &str, modified_after: Option<Tick>) -> Result<Vec<Edge>> {
        let query: Vec<(&str, String)> = modified_after
            .map(|tick| vec![("modified_after", tick.to_string())])
            .unwrap_or_default();
        decode_list(self.base.get(&node_endpoint(node_id, "edge"), &query).await?)
    }

    /// Messages from peers waiting for a reply. Empty when there are none.
    pub async fn recv(&self, node_id: &str) -> Result<Vec<Message>> {
        decode_list(self.base.get(&node_endpoint(node_id, "recv"), &[]).await?)
    }

    /// Reply to peers.
    ///
    /// Returns one [`Status`] per reply; match them by `peer_id`, the order
    /// is not guaranteed. Sending nothing makes no request, and a reply
    /// with an empty `peer_id` fails with
    /// [`HashgridError::InvalidArgument`] before anything is sent.
    pub async fn send(&self, node_id: &str, replies: &[Message]) -> Result<Vec<Status>> {
        if replies.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(index) = replies.iter().position(|r| r.peer_id.is_empty()) {
            return Err(HashgridError::InvalidArgument(format!(
                "reply {} has an empty peer_id",
                index
            )));
        }
        decode_list(self.base.post(&node_endpoint(node_id, "send"), replies).await?)
    }
}
