//! Regional statistics endpoints.

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::http_utils::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsResponse {
    pub data: Vec<String>,
}

/// Lists the regions stats can be queried for.
pub async fn regions(client: &ApiClient) -> Result<RegionsResponse, Error> {
    client.get("stats/regions").await
}
