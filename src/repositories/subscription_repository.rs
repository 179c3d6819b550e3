use std::sync::Arc;

use crate::{
    config::database::Store, constants::SUBSCRIPTION_COL_NAME,
    repositories::document_repository::DocumentRepository,
};

pub struct SubscriptionRepository {
    pub documents: DocumentRepository,
}

impl SubscriptionRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            documents: DocumentRepository::optional(store, SUBSCRIPTION_COL_NAME),
        }
    }
}
