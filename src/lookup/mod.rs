pub mod geonames_client;

pub use geonames_client::GeonamesClient;

use crate::error::Result;
use serde_json::Value;

/// Parsed reply of one geonameId lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    /// False for 4xx and 5xx statuses.
    pub success: bool,
    pub status_code: u16,
    pub payload: Value,
}

impl LookupResponse {
    pub fn new(status_code: u16, payload: Value) -> Self {
        Self {
            success: status_code < 400,
            status_code,
            payload,
        }
    }
}

/// Source of geoname records by id.
#[allow(async_fn_in_trait)]
pub trait GeonameLookup {
    async fn lookup(&self, geoname_id: u32) -> Result<LookupResponse>;
}
