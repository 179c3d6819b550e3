pub mod box_request;
pub mod query_request;
pub mod status_request;
pub mod subscription_request;
pub mod user_request;

use mongodb::bson::oid::ObjectId;

use crate::errors::{ServiceError, ServiceResult};

pub fn parse_object_id(raw: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ServiceError::MalformedId(raw.to_string()))
}

/// Admin forms submit untouched inputs as empty strings; those read as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
