use serde::{Deserialize, Serialize};

/// Node record as returned by `GET /api/v1/node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node identifier
    pub node_id: String,
    /// Owning user
    pub owner_id: String,
    /// Node name
    pub name: String,
    /// Node description / prompt shown to peers
    pub message: String,
    /// Number of peers the node can serve
    pub capacity: u32,
}

/// Payload for creating a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNode {
    /// Node name
    pub name: String,
    /// Node description
    pub message: String,
    /// Number of peers the node can serve
    pub capacity: u32,
}

impl NewNode {
    /// Default capacity for new nodes.
    pub const DEFAULT_CAPACITY: u32 = 100;

    /// A node with an empty description and the default capacity.
    pub fn new(name: impl Into<String>) -> Self {
        NewNode {
            name: name.into(),
            message: String::new(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Set the description.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Partial update of a node. Unset fields are left out of the request.
///
/// Also used to decode the fields the server echoes back from an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdate {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// New capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl NodeUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.message.is_none() && self.capacity.is_none()
    }

    /// Overwrite the fields of `info` that are set here.
    pub fn apply(self, info: &mut NodeInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(message) = self.message {
            info.message = message;
        }
        if let Some(capacity) = self.capacity {
            info.capacity = capacity;
        }
    }
}
