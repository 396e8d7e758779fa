use super::Tick;
use serde::{Deserialize, Serialize};

/// Grid metadata returned by `GET /api/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInfo {
    /// Grid name
    pub name: String,
    /// Current tick, advanced monotonically by the server
    pub tick: Tick,
}
