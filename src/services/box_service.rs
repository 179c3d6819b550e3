use chrono::Utc;
use log::{info, warn};
use mongodb::bson::{Document, doc};
use std::sync::Arc;

use crate::{
    config::database::Store,
    errors::{ErrorKind, ServiceError, ServiceResult},
    models::box_model::BoxView,
    repositories::{box_repository::BoxRepository, user_repository::UserRepository},
    services::write_support::{apply_status, deleted, modified, stamp_created_at, stamp_updated_at},
    types::{
        models::{
            stats::StatusStats,
            status::{BoxStatus, default_box_status},
        },
        requests::{box_request::BoxFields, parse_object_id},
        responses::write_outcome::{Created, Deleted, Modified, StatusChanged},
    },
    utils::bson_utils::to_bson_datetime,
};

const ENTITY: &str = "box";
const USER_ENTITY: &str = "user";

pub struct BoxService {
    pub box_repository: BoxRepository,
    pub user_repository: UserRepository,
}

impl BoxService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            box_repository: BoxRepository::new(store.clone()),
            user_repository: UserRepository::new(store),
        }
    }

    async fn normalize(&self, boxes: Vec<Document>) -> Vec<BoxView> {
        let owners = self.user_repository.directory_for(&boxes, "user").await;
        boxes
            .iter()
            .map(|doc| BoxView::from_document(doc, &owners))
            .collect()
    }

    async fn normalize_or_empty(&self, fetched: ServiceResult<Vec<Document>>, context: &str) -> Vec<BoxView> {
        match fetched {
            Ok(boxes) => self.normalize(boxes).await,
            Err(err) => {
                warn!("Error {}: {}", context, err);
                Vec::new()
            }
        }
    }

    pub async fn list(&self) -> Vec<BoxView> {
        let fetched = self.box_repository.documents.find_all().await;
        self.normalize_or_empty(fetched, "fetching boxes").await
    }

    pub async fn get_by_id(&self, id: &str) -> Option<BoxView> {
        let oid = parse_object_id(id).ok()?;
        match self.box_repository.documents.find_by_id(oid).await {
            Ok(found) => self.normalize(found.into_iter().collect()).await.pop(),
            Err(err) => {
                warn!("Error retrieving box {}: {}", id, err);
                None
            }
        }
    }

    pub async fn create(&self, fields: BoxFields) -> ServiceResult<Created> {
        let mut document = fields.to_document()?;
        if !document.contains_key("status") {
            document.insert("status", default_box_status().as_ref());
        }
        let now = Utc::now();
        stamp_created_at(&mut document, now);
        document.insert("lastActivity", to_bson_datetime(now));

        let inserted_id = self.box_repository.documents.insert(document).await?;
        info!("Box {} created", inserted_id);
        Ok(Created { inserted_id })
    }

    pub async fn update(&self, id: &str, fields: BoxFields) -> ServiceResult<Modified> {
        let oid = parse_object_id(id)?;
        let mut document = fields.to_document()?;
        stamp_updated_at(&mut document, Utc::now());

        let result = self
            .box_repository
            .documents
            .update_one(doc! { "_id": oid }, doc! { "$set": document })
            .await?;
        modified(ENTITY, id, &result)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<Deleted> {
        let oid = parse_object_id(id)?;
        let result = self.box_repository.documents.delete_by_id(oid).await?;
        deleted(ENTITY, id, &result)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ServiceResult<StatusChanged> {
        apply_status::<BoxStatus>(&self.box_repository.documents, id, status).await
    }

    pub async fn search(&self, query: &str) -> Vec<BoxView> {
        if query.trim().is_empty() {
            return self.list().await;
        }
        let fetched = self.box_repository.search(query).await;
        self.normalize_or_empty(fetched, "searching boxes").await
    }

    pub async fn stats(&self) -> StatusStats<BoxStatus> {
        match self.box_repository.documents.count_by_status().await {
            Ok(groups) => StatusStats::from_groups(groups),
            Err(err) if err.kind() == ErrorKind::StoreUnreachable => {
                warn!("Box stats unavailable: {}", err);
                Default::default()
            }
            Err(err) => {
                warn!("Box stats aggregation failed, counting client-side: {}", err);
                self.stats_from_list().await
            }
        }
    }

    pub async fn stats_from_list(&self) -> StatusStats<BoxStatus> {
        let boxes = self.list().await;
        StatusStats::from_statuses(boxes.iter().map(|item| item.status.as_str()))
    }

    /// Boxes currently owned by `user_id`; a malformed id owns nothing.
    pub async fn user_boxes(&self, user_id: &str) -> Vec<BoxView> {
        let Ok(owner) = parse_object_id(user_id) else {
            return Vec::new();
        };
        let fetched = self.box_repository.find_by_user(owner).await;
        self.normalize_or_empty(fetched, "fetching boxes for user").await
    }

    pub async fn assign(
        &self,
        user_id: &str,
        box_id: &str,
        notes: Option<&str>,
    ) -> ServiceResult<Modified> {
        let owner = parse_object_id(user_id)?;
        let target = parse_object_id(box_id)?;
        if self.user_repository.documents.find_by_id(owner).await?.is_none() {
            return Err(ServiceError::not_found(USER_ENTITY, user_id));
        }

        let result = self.box_repository.assign(target, owner, notes).await?;
        let outcome = modified(ENTITY, box_id, &result)?;
        info!("Box {} assigned to user {}", box_id, user_id);
        Ok(outcome)
    }

    /// Releases the box only while `user_id` still owns it.
    pub async fn unassign(&self, user_id: &str, box_id: &str) -> ServiceResult<Modified> {
        let owner = parse_object_id(user_id)?;
        let target = parse_object_id(box_id)?;

        let result = self.box_repository.unassign(target, owner).await?;
        let outcome = modified(ENTITY, box_id, &result)?;
        info!("Box {} released from user {}", box_id, user_id);
        Ok(outcome)
    }

    pub async fn create_for_user(&self, user_id: &str, fields: BoxFields) -> ServiceResult<Created> {
        self.create(BoxFields {
            user_id: Some(user_id.to_string()),
            ..fields
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::database::StoreConfig, errors::ErrorKind};
    use mongodb::bson::oid::ObjectId;

    #[actix_rt::test]
    async fn assignment_rejects_malformed_ids_before_any_lookup() {
        let store = Arc::new(Store::new(StoreConfig::unreachable()));
        let service = BoxService::new(store.clone());

        let err = service
            .assign("not-an-id", &ObjectId::new().to_hex(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedId);

        let err = service
            .unassign(&ObjectId::new().to_hex(), "still-not-an-id")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedId);
        assert!(!store.is_connected());
    }

    #[actix_rt::test]
    async fn malformed_owner_has_no_boxes() {
        let store = Arc::new(Store::new(StoreConfig::unreachable()));
        let service = BoxService::new(store.clone());
        assert!(service.user_boxes("12345").await.is_empty());
        assert!(!store.is_connected());
    }
}
