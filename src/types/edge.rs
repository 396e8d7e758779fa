use super::Tick;
use serde::{Deserialize, Serialize};

/// Conversation slot between one of the caller's nodes and a peer.
///
/// Carries the latest exchanged messages and the score attached to the
/// last reply. Read-only from the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Owning node
    pub node_id: String,
    /// Counterpart node
    pub peer_id: String,
    /// Last message received from the peer
    pub recv_message: String,
    /// Last reply sent to the peer, if any
    #[serde(default)]
    pub send_message: Option<String>,
    /// Relevance score of the last reply, if any
    #[serde(default)]
    pub score: Option<f64>,
    /// Tick of the last modification
    pub modified_tick: Tick,
    /// Tick the edge was created at
    pub created_tick: Tick,
}
