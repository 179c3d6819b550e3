use log::warn;
use mongodb::bson::Document;
use std::sync::Arc;

use crate::{
    config::database::Store,
    constants::USER_COL_NAME,
    errors::ServiceResult,
    models::user_model::UserDirectory,
    repositories::document_repository::{DocumentRepository, text_search_filter},
};

pub const USER_SEARCH_FIELDS: [&str; 4] = ["firstname", "lastname", "phoneNumber", "region"];

pub struct UserRepository {
    pub documents: DocumentRepository,
}

impl UserRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            documents: DocumentRepository::new(store, USER_COL_NAME),
        }
    }

    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Document>> {
        self.documents
            .find_many(text_search_filter(&USER_SEARCH_FIELDS, query))
            .await
    }

    /// Loads the owners referenced under `key` by `docs` in one query. A
    /// failed lookup degrades to an empty directory, so every reference then
    /// resolves to the empty summary.
    pub async fn directory_for(&self, docs: &[Document], key: &str) -> UserDirectory {
        let ids = UserDirectory::referenced_ids(docs, key);
        match self.documents.find_by_ids(&ids).await {
            Ok(users) => UserDirectory::from_documents(users),
            Err(err) => {
                warn!("Failed to resolve {} referenced users: {}", ids.len(), err);
                UserDirectory::default()
            }
        }
    }
}
