use futures_util::stream::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
    results::{DeleteResult, UpdateResult},
};
use std::sync::Arc;

use crate::{
    config::database::Store,
    errors::{ServiceError, ServiceResult},
};

/// Raw document access on one collection.
///
/// Optional collections are the ones the dashboard does not create itself;
/// writes against them report [`ServiceError::CollectionAbsent`] while they
/// are missing.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<Store>,
    name: &'static str,
    optional: bool,
}

impl DocumentRepository {
    pub fn new(store: Arc<Store>, name: &'static str) -> Self {
        Self {
            store,
            name,
            optional: false,
        }
    }

    pub fn optional(store: Arc<Store>, name: &'static str) -> Self {
        Self {
            store,
            name,
            optional: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn collection(&self) -> ServiceResult<Collection<Document>> {
        self.store.collection(self.name).await
    }

    async fn existing_collection(&self) -> ServiceResult<Collection<Document>> {
        let collection = self.collection().await?;
        if self.optional && !self.store.collection_exists(self.name).await? {
            return Err(ServiceError::CollectionAbsent(self.name));
        }
        Ok(collection)
    }

    pub async fn find_many(&self, filter: Document) -> ServiceResult<Vec<Document>> {
        let cursor = self.existing_collection().await?.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Document>> {
        self.find_many(doc! {}).await
    }

    pub async fn find_sorted(
        &self,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> ServiceResult<Vec<Document>> {
        let cursor = self
            .existing_collection()
            .await?
            .find(filter)
            .sort(sort)
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_id(&self, id: ObjectId) -> ServiceResult<Option<Document>> {
        Ok(self
            .existing_collection()
            .await?
            .find_one(doc! { "_id": id })
            .await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> ServiceResult<Vec<Document>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_many(doc! { "_id": { "$in": ids.to_vec() } }).await
    }

    pub async fn insert(&self, document: Document) -> ServiceResult<String> {
        let result = self.collection().await?.insert_one(document).await?;
        Ok(result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| result.inserted_id.to_string()))
    }

    pub async fn update_one(&self, filter: Document, update: Document) -> ServiceResult<UpdateResult> {
        Ok(self
            .existing_collection()
            .await?
            .update_one(filter, update)
            .await?)
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> ServiceResult<DeleteResult> {
        Ok(self
            .existing_collection()
            .await?
            .delete_one(doc! { "_id": id })
            .await?)
    }

    pub async fn aggregate(&self, pipeline: Vec<Document>) -> ServiceResult<Vec<Document>> {
        let cursor = self.existing_collection().await?.aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn count_by_status(&self) -> ServiceResult<Vec<Document>> {
        self.aggregate(status_group_pipeline()).await
    }
}

pub fn status_group_pipeline() -> Vec<Document> {
    vec![doc! { "$group": { "_id": "$status", "count": { "$sum": 1 } } }]
}

/// Case-insensitive literal substring match on any of `fields`.
pub fn text_search_filter(fields: &[&str], query: &str) -> Document {
    let pattern = regex::escape(query.trim());
    let clauses: Vec<Document> = fields
        .iter()
        .map(|&field| doc! { field: { "$regex": pattern.as_str(), "$options": "i" } })
        .collect();
    doc! { "$or": clauses }
}
