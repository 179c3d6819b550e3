use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::Serialize;

use crate::{
    models::user_model::{UserDirectory, UserSummary},
    utils::bson_utils::{datetime_field, id_string, optional_string_field, string_field},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub user: UserSummary,
    pub last_activity: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl BoxView {
    pub fn from_document(doc: &Document, users: &UserDirectory) -> Self {
        Self {
            id: id_string(doc),
            name: optional_string_field(doc, "name"),
            serial_number: optional_string_field(doc, "serialNumber"),
            box_type: optional_string_field(doc, "boxType"),
            description: optional_string_field(doc, "description"),
            location: optional_string_field(doc, "location"),
            status: string_field(doc, "status"),
            user: users.resolve(doc.get("user")),
            last_activity: datetime_field(doc, "lastActivity"),
            created_at: datetime_field(doc, "createdAt"),
        }
    }
}
