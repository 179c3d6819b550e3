use chrono::Utc;
use mongodb::{
    bson::{Document, doc, oid::ObjectId},
    results::UpdateResult,
};
use std::sync::Arc;

use crate::{
    config::database::Store,
    constants::BOX_COL_NAME,
    errors::ServiceResult,
    repositories::document_repository::{DocumentRepository, text_search_filter},
    utils::bson_utils::to_bson_datetime,
};

pub const BOX_SEARCH_FIELDS: [&str; 3] = ["name", "location", "status"];

pub struct BoxRepository {
    pub documents: DocumentRepository,
}

impl BoxRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            documents: DocumentRepository::optional(store, BOX_COL_NAME),
        }
    }

    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Document>> {
        self.documents
            .find_many(text_search_filter(&BOX_SEARCH_FIELDS, query))
            .await
    }

    pub async fn find_by_user(&self, user_id: ObjectId) -> ServiceResult<Vec<Document>> {
        self.documents.find_many(owned_by(user_id)).await
    }

    pub async fn assign(
        &self,
        box_id: ObjectId,
        user_id: ObjectId,
        notes: Option<&str>,
    ) -> ServiceResult<UpdateResult> {
        let mut fields = doc! {
            "user": user_id,
            "updatedAt": to_bson_datetime(Utc::now()),
        };
        if let Some(notes) = notes {
            fields.insert("assignmentNotes", notes);
        }
        self.documents
            .update_one(doc! { "_id": box_id }, doc! { "$set": fields })
            .await
    }

    /// Clears the owner only while the box still belongs to `user_id`.
    pub async fn unassign(&self, box_id: ObjectId, user_id: ObjectId) -> ServiceResult<UpdateResult> {
        let mut filter = owned_by(user_id);
        filter.insert("_id", box_id);
        self.documents
            .update_one(
                filter,
                doc! {
                    "$unset": { "user": "", "assignmentNotes": "" },
                    "$set": { "updatedAt": to_bson_datetime(Utc::now()) },
                },
            )
            .await
    }
}

/// Matches boxes whose owner reference is `user_id`, stored natively or as hex.
pub fn owned_by(user_id: ObjectId) -> Document {
    doc! { "$or": [ { "user": user_id }, { "user": user_id.to_hex() } ] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_filter_accepts_legacy_hex_references() {
        let owner = ObjectId::new();
        let filter = owned_by(owner);
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].as_document().unwrap().get_object_id("user").unwrap(), owner);
        assert_eq!(
            clauses[1].as_document().unwrap().get_str("user").unwrap(),
            owner.to_hex()
        );
    }
}
