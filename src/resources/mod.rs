//! Typed endpoint wrappers addressed by id.
//!
//! These mirror the [`Grid`](crate::Grid) / [`Node`](crate::Node) handles
//! but take the node id on every call, for callers that juggle many nodes
//! without materializing handles.
//!
//! | Resource | Endpoints |
//! |----------|-----------|
//! | [`GridsResource`] | `GET /api/v1` |
//! | [`NodesResource`] | `GET/POST /api/v1/node`, `PUT/DELETE /api/v1/node/{id}` |
//! | [`EdgesResource`] | `GET /api/v1/node/{id}/edge`, `GET .../recv`, `POST .../send` |

mod base;
mod edges;
mod grids;
mod nodes;

pub use base::BaseResource;
pub use edges::EdgesResource;
pub use grids::GridsResource;
pub use nodes::NodesResource;

pub(crate) const GRID_ENDPOINT: &str = "/api/v1";
pub(crate) const NODE_ENDPOINT: &str = "/api/v1/node";

/// Path of a node endpoint. The id is percent-encoded as a single segment.
pub(crate) fn node_endpoint(node_id: &str, suffix: &str) -> String {
    let node_id = urlencoding::encode(node_id);
    if suffix.is_empty() {
        format!("{}/{}", NODE_ENDPOINT, node_id)
    } else {
        format!("{}/{}/{}", NODE_ENDPOINT, node_id, suffix)
    }
}
