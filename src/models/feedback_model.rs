use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::Serialize;

use crate::{
    models::user_model::{UserDirectory, UserSummary},
    utils::bson_utils::{datetime_field, id_string, number_field, string_field},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub id: String,
    pub user: UserSummary,
    pub rating: f64,
    pub message: String,
    pub category: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedbackView {
    pub fn from_document(doc: &Document, users: &UserDirectory) -> Self {
        Self {
            id: id_string(doc),
            user: users.resolve(doc.get("user")),
            rating: number_field(doc, "rating"),
            message: string_field(doc, "message"),
            category: string_field(doc, "category"),
            created_at: datetime_field(doc, "createdAt"),
            updated_at: datetime_field(doc, "updatedAt"),
        }
    }
}
