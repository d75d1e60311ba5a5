use axum::response::IntoResponse;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use shelter_common::Metadata;

use crate::service::Listing;

pub mod cmd;

const RESPONSE_SUCCESS: &str = "success";

/// `{"result": "success"}` for writes that return no record.
#[derive(Clone, Serialize)]
pub struct ResponseSuccess {
    result: &'static str,
}

impl Default for ResponseSuccess {
    fn default() -> Self {
        Self {
            result: RESPONSE_SUCCESS,
        }
    }
}

impl IntoResponse for ResponseSuccess {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

/// Listing body: the records under the resource's plural name, next to
/// `metadata`.
pub struct Envelope<T> {
    key: &'static str,
    records: Vec<T>,
    metadata: Metadata,
}

impl<T> Envelope<T> {
    pub fn new(key: &'static str, listing: Listing<T>) -> Self {
        Self {
            key,
            records: listing.records,
            metadata: listing.metadata,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key, &self.records)?;
        map.serialize_entry("metadata", &self.metadata)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
