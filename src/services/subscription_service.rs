use chrono::Utc;
use log::{info, warn};
use mongodb::bson::{Document, doc};
use std::sync::Arc;

use crate::{
    config::database::Store,
    errors::{ErrorKind, ServiceResult},
    models::subscription_model::SubscriptionView,
    repositories::{
        subscription_repository::SubscriptionRepository, user_repository::UserRepository,
    },
    services::write_support::{apply_status, deleted, modified, stamp_created_at, stamp_updated_at},
    types::{
        models::{stats::StatusStats, status::SubscriptionStatus},
        requests::{parse_object_id, subscription_request::SubscriptionFields},
        responses::write_outcome::{Created, Deleted, Modified, StatusChanged},
    },
};

const ENTITY: &str = "subscription";

pub struct SubscriptionService {
    pub subscription_repository: SubscriptionRepository,
    pub user_repository: UserRepository,
}

impl SubscriptionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            subscription_repository: SubscriptionRepository::new(store.clone()),
            user_repository: UserRepository::new(store),
        }
    }

    async fn normalize(&self, subscriptions: Vec<Document>) -> Vec<SubscriptionView> {
        let subscribers = self
            .user_repository
            .directory_for(&subscriptions, "user")
            .await;
        subscriptions
            .iter()
            .map(|doc| SubscriptionView::from_document(doc, &subscribers))
            .collect()
    }

    pub async fn list(&self) -> Vec<SubscriptionView> {
        match self.subscription_repository.documents.find_all().await {
            Ok(subscriptions) => self.normalize(subscriptions).await,
            Err(err) => {
                warn!("Error fetching subscriptions: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<SubscriptionView> {
        let oid = parse_object_id(id).ok()?;
        match self.subscription_repository.documents.find_by_id(oid).await {
            Ok(found) => self.normalize(found.into_iter().collect()).await.pop(),
            Err(err) => {
                warn!("Error retrieving subscription {}: {}", id, err);
                None
            }
        }
    }

    pub async fn create(&self, fields: SubscriptionFields) -> ServiceResult<Created> {
        let mut document = fields.to_document()?;
        let now = Utc::now();
        stamp_created_at(&mut document, now);
        stamp_updated_at(&mut document, now);

        let inserted_id = self
            .subscription_repository
            .documents
            .insert(document)
            .await?;
        info!("Subscription {} created", inserted_id);
        Ok(Created { inserted_id })
    }

    pub async fn update(&self, id: &str, fields: SubscriptionFields) -> ServiceResult<Modified> {
        let oid = parse_object_id(id)?;
        let mut document = fields.to_document()?;
        stamp_updated_at(&mut document, Utc::now());

        let result = self
            .subscription_repository
            .documents
            .update_one(doc! { "_id": oid }, doc! { "$set": document })
            .await?;
        modified(ENTITY, id, &result)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<Deleted> {
        let oid = parse_object_id(id)?;
        let result = self
            .subscription_repository
            .documents
            .delete_by_id(oid)
            .await?;
        deleted(ENTITY, id, &result)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ServiceResult<StatusChanged> {
        apply_status::<SubscriptionStatus>(&self.subscription_repository.documents, id, status)
            .await
    }

    pub async fn stats(&self) -> StatusStats<SubscriptionStatus> {
        match self.subscription_repository.documents.count_by_status().await {
            Ok(groups) => StatusStats::from_groups(groups),
            Err(err) if err.kind() == ErrorKind::StoreUnreachable => {
                warn!("Subscription stats unavailable: {}", err);
                Default::default()
            }
            Err(err) => {
                warn!(
                    "Subscription stats aggregation failed, counting client-side: {}",
                    err
                );
                self.stats_from_list().await
            }
        }
    }

    pub async fn stats_from_list(&self) -> StatusStats<SubscriptionStatus> {
        let subscriptions = self.list().await;
        StatusStats::from_statuses(subscriptions.iter().map(|item| item.status.as_str()))
    }
}
