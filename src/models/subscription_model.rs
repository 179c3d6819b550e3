use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::Serialize;

use crate::{
    models::user_model::{UserDirectory, UserSummary},
    utils::bson_utils::{datetime_field, id_string, number_field, string_field},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub id: String,
    pub user: UserSummary,
    pub plan: String,
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub price: f64,
    pub payment_method: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SubscriptionView {
    pub fn from_document(doc: &Document, users: &UserDirectory) -> Self {
        Self {
            id: id_string(doc),
            user: users.resolve(doc.get("user")),
            plan: string_field(doc, "plan"),
            status: string_field(doc, "status"),
            start_date: datetime_field(doc, "startDate"),
            end_date: datetime_field(doc, "endDate"),
            price: number_field(doc, "price"),
            payment_method: string_field(doc, "paymentMethod"),
            created_at: datetime_field(doc, "createdAt"),
            updated_at: datetime_field(doc, "updatedAt"),
        }
    }
}
