use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::Serialize;
use std::collections::HashMap;

use crate::utils::bson_utils::{datetime_field, id_string, reference_field, string_field};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub phone_number: String,
    pub firstname: String,
    pub lastname: String,
    pub region: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserView {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: id_string(doc),
            phone_number: string_field(doc, "phoneNumber"),
            firstname: string_field(doc, "firstname"),
            lastname: string_field(doc, "lastname"),
            region: string_field(doc, "region"),
            status: string_field(doc, "status"),
            created_at: datetime_field(doc, "createdAt"),
        }
    }
}

/// Denormalized owner embedded in every record that points at a user.
///
/// An unresolvable reference yields the empty summary, which serializes as
/// `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UserSummary {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: Some(id_string(doc)),
            firstname: Some(string_field(doc, "firstname")),
            lastname: Some(string_field(doc, "lastname")),
            phone_number: Some(string_field(doc, "phoneNumber")),
            status: Some(string_field(doc, "status")),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Users fetched in one round trip for the references of a result page.
#[derive(Debug, Default)]
pub struct UserDirectory {
    summaries: HashMap<ObjectId, UserSummary>,
}

impl UserDirectory {
    pub fn from_documents(users: impl IntoIterator<Item = Document>) -> Self {
        let summaries = users
            .into_iter()
            .filter_map(|user| {
                let oid = user.get_object_id("_id").ok()?;
                Some((oid, UserSummary::from_document(&user)))
            })
            .collect();
        Self { summaries }
    }

    /// Reference ids under `key` across `docs`, deduplicated.
    pub fn referenced_ids(docs: &[Document], key: &str) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = docs
            .iter()
            .filter_map(|doc| reference_field(doc, key))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn resolve(&self, reference: Option<&Bson>) -> UserSummary {
        let oid = match reference {
            Some(Bson::ObjectId(oid)) => *oid,
            Some(Bson::String(hex)) => match ObjectId::parse_str(hex) {
                Ok(oid) => oid,
                Err(_) => return UserSummary::default(),
            },
            Some(Bson::Document(embedded)) => return UserSummary::from_document(embedded),
            _ => return UserSummary::default(),
        };
        self.summaries.get(&oid).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn stored_user(oid: ObjectId) -> Document {
        doc! {
            "_id": oid,
            "firstname": "Awa",
            "lastname": "Diop",
            "phoneNumber": "+221770000000",
            "region": "Dakar",
            "status": "active",
        }
    }

    #[test]
    fn user_view_defaults_missing_fields() {
        let oid = ObjectId::new();
        let view = UserView::from_document(&doc! { "_id": oid, "firstname": "Awa" });
        assert_eq!(view.id, oid.to_hex());
        assert_eq!(view.firstname, "Awa");
        assert_eq!(view.region, "");
        assert_eq!(view.created_at, None);
    }

    #[test]
    fn directory_resolves_native_and_hex_references() {
        let oid = ObjectId::new();
        let directory = UserDirectory::from_documents(vec![stored_user(oid)]);

        let native = directory.resolve(Some(&Bson::ObjectId(oid)));
        let hex = directory.resolve(Some(&Bson::String(oid.to_hex())));
        assert_eq!(native, hex);
        assert_eq!(native.id.as_deref(), Some(oid.to_hex().as_str()));
        assert_eq!(native.status.as_deref(), Some("active"));
    }

    #[test]
    fn dangling_reference_resolves_to_empty_summary() {
        let directory = UserDirectory::from_documents(vec![stored_user(ObjectId::new())]);
        let summary = directory.resolve(Some(&Bson::ObjectId(ObjectId::new())));
        assert!(summary.is_empty());
        assert_eq!(serde_json::to_value(&summary).unwrap(), serde_json::json!({}));

        assert!(directory.resolve(None).is_empty());
        assert!(directory.resolve(Some(&Bson::String("garbage".into()))).is_empty());
    }

    #[test]
    fn embedded_user_documents_are_summarized_in_place() {
        let directory = UserDirectory::default();
        let embedded = stored_user(ObjectId::new());
        let summary = directory.resolve(Some(&Bson::Document(embedded)));
        assert_eq!(summary.firstname.as_deref(), Some("Awa"));
        assert_eq!(summary.phone_number.as_deref(), Some("+221770000000"));
    }

    #[test]
    fn referenced_ids_are_deduplicated() {
        let oid = ObjectId::new();
        let docs = vec![
            doc! { "user": oid },
            doc! { "user": oid.to_hex() },
            doc! { "user": "nope" },
            doc! {},
        ];
        assert_eq!(UserDirectory::referenced_ids(&docs, "user"), vec![oid]);
    }
}
