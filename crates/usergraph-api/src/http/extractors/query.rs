//! Query parameter extractors for list endpoints.

use serde::Deserialize;
use usergraph_types::id::UserId;

/// `?page=&pageSize=` on paged endpoints. Both optional.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `?ownerId=` on the event list endpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub owner_id: Option<UserId>,
}
