use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::Serialize;

use crate::{
    models::user_model::{UserDirectory, UserSummary},
    utils::bson_utils::{datetime_field, id_string, string_field},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub user: UserSummary,
}

impl ActivityView {
    pub fn from_document(doc: &Document, users: &UserDirectory) -> Self {
        Self {
            id: id_string(doc),
            kind: string_field(doc, "type"),
            description: string_field(doc, "description"),
            timestamp: datetime_field(doc, "timestamp"),
            user: users.resolve(doc.get("user")),
        }
    }
}
