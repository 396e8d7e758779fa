use serde::{Deserialize, Serialize};

/// Account owning nodes on a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Whether the user has administrative rights
    pub is_superuser: bool,
    /// Quota assigned to the user
    pub quota_id: String,
}

/// Capacity allowance shared by a user's nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Quota identifier
    pub quota_id: String,
    /// Quota name
    pub name: String,
    /// Total capacity granted
    pub capacity: u32,
}
