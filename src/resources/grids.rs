use super::{BaseResource, GRID_ENDPOINT};
use crate::client::{decode, Hashgrid};
use crate::error::Result;
use crate::types::GridInfo;

/// Grid metadata.
#[derive(Debug, Clone)]
pub struct GridsResource {
    base: BaseResource,
}

impl GridsResource {
    /// Wrap a client.
    pub fn new(client: Hashgrid) -> Self {
        GridsResource {
            base: BaseResource::new(client),
        }
    }

    /// Fetch the grid's name and current tick. Requires membership.
    pub async fn get(&self) -> Result<GridInfo> {
        decode(self.base.get(GRID_ENDPOINT, &[]).await?)
    }
}
