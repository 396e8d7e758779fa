//! Record types mirroring the Hashgrid server's JSON shapes.
//!
//! All records are immutable snapshots decoded from a single response.
//! Required fields are enforced by `serde`; a mismatch surfaces as
//! [`HashgridError::Decode`](crate::HashgridError::Decode).
//!
//! | Type | Wire shape |
//! |------|------------|
//! | [`GridInfo`] | `{name, tick}` |
//! | [`NodeInfo`] | `{node_id, owner_id, name, message, capacity}` |
//! | [`Edge`] | `{node_id, peer_id, recv_message, send_message?, score?, modified_tick, created_tick}` |
//! | [`Message`] | `{peer_id, message, score?}` |
//! | [`Status`] | `{peer_id, success}` |
//! | [`User`] | `{user_id, name, is_superuser, quota_id}` |
//! | [`Quota`] | `{quota_id, name, capacity}` |

mod account;
mod edge;
mod grid;
mod message;
mod node;
mod response;

pub use account::{Quota, User};
pub use edge::Edge;
pub use grid::GridInfo;
pub use message::{clamp_score, statuses_by_peer, Message, Status};
pub use node::{NewNode, NodeInfo, NodeUpdate};
pub use response::ApiResponse;

/// Tick counter value as advanced by the server.
pub type Tick = u64;
