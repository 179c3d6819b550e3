use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::Deserialize;

use crate::{
    errors::ServiceResult,
    types::{
        models::status::{EntityStatus, UserStatus},
        requests::non_blank,
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserFields {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserFields {
    /// Fields to `$set`, status checked against the user lifecycle.
    pub fn to_document(&self) -> ServiceResult<Document> {
        let mut document = Document::new();
        for (key, value) in [
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("phoneNumber", &self.phone_number),
            ("region", &self.region),
        ] {
            if let Some(value) = non_blank(value) {
                document.insert(key, value);
            }
        }
        if let Some(status) = non_blank(&self.status) {
            document.insert("status", UserStatus::parse_for_write(status)?.as_ref());
        }
        Ok(document)
    }
}
