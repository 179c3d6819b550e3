use chrono::Utc;
use log::{info, warn};
use mongodb::bson::doc;
use std::sync::Arc;

use crate::{
    config::database::Store,
    errors::{ErrorKind, ServiceResult},
    models::user_model::UserView,
    repositories::user_repository::UserRepository,
    services::write_support::{apply_status, deleted, modified, stamp_created_at, stamp_updated_at},
    types::{
        models::{
            stats::StatusStats,
            status::{UserStatus, default_user_status},
        },
        requests::{parse_object_id, user_request::UserFields},
        responses::write_outcome::{Created, Deleted, Modified, StatusChanged},
    },
};

const ENTITY: &str = "user";

pub struct UserService {
    pub user_repository: UserRepository,
}

impl UserService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            user_repository: UserRepository::new(store),
        }
    }

    pub async fn list(&self) -> Vec<UserView> {
        match self.user_repository.documents.find_all().await {
            Ok(users) => users.iter().map(UserView::from_document).collect(),
            Err(err) => {
                warn!("Error fetching users: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<UserView> {
        let oid = parse_object_id(id).ok()?;
        match self.user_repository.documents.find_by_id(oid).await {
            Ok(user) => user.as_ref().map(UserView::from_document),
            Err(err) => {
                warn!("Error retrieving user {}: {}", id, err);
                None
            }
        }
    }

    pub async fn create(&self, fields: UserFields) -> ServiceResult<Created> {
        let mut document = fields.to_document()?;
        if !document.contains_key("status") {
            document.insert("status", default_user_status().as_ref());
        }
        stamp_created_at(&mut document, fields.created_at.unwrap_or_else(Utc::now));

        let inserted_id = self.user_repository.documents.insert(document).await?;
        info!("User {} created", inserted_id);
        Ok(Created { inserted_id })
    }

    pub async fn update(&self, id: &str, fields: UserFields) -> ServiceResult<Modified> {
        let oid = parse_object_id(id)?;
        let mut document = fields.to_document()?;
        stamp_updated_at(&mut document, Utc::now());

        let result = self
            .user_repository
            .documents
            .update_one(doc! { "_id": oid }, doc! { "$set": document })
            .await?;
        modified(ENTITY, id, &result)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<Deleted> {
        let oid = parse_object_id(id)?;
        let result = self.user_repository.documents.delete_by_id(oid).await?;
        deleted(ENTITY, id, &result)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ServiceResult<StatusChanged> {
        apply_status::<UserStatus>(&self.user_repository.documents, id, status).await
    }

    pub async fn search(&self, query: &str) -> Vec<UserView> {
        if query.trim().is_empty() {
            return self.list().await;
        }
        match self.user_repository.search(query).await {
            Ok(users) => users.iter().map(UserView::from_document).collect(),
            Err(err) => {
                warn!("Error searching users for '{}': {}", query, err);
                Vec::new()
            }
        }
    }

    pub async fn stats(&self) -> StatusStats<UserStatus> {
        match self.user_repository.documents.count_by_status().await {
            Ok(groups) => StatusStats::from_groups(groups),
            Err(err) if err.kind() == ErrorKind::StoreUnreachable => {
                warn!("User stats unavailable: {}", err);
                Default::default()
            }
            Err(err) => {
                warn!("User stats aggregation failed, counting client-side: {}", err);
                self.stats_from_list().await
            }
        }
    }

    pub async fn stats_from_list(&self) -> StatusStats<UserStatus> {
        let users = self.list().await;
        StatusStats::from_statuses(users.iter().map(|user| user.status.as_str()))
    }
}
