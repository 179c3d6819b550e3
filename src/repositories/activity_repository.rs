use mongodb::bson::{Document, doc};
use std::sync::Arc;

use crate::{
    config::database::Store, constants::ACTIVITY_COL_NAME, errors::ServiceResult,
    repositories::document_repository::DocumentRepository,
};

pub struct ActivityRepository {
    pub documents: DocumentRepository,
}

impl ActivityRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            documents: DocumentRepository::optional(store, ACTIVITY_COL_NAME),
        }
    }

    pub async fn recent(&self, limit: i64) -> ServiceResult<Vec<Document>> {
        self.documents
            .find_sorted(doc! {}, doc! { "timestamp": -1 }, limit)
            .await
    }
}
