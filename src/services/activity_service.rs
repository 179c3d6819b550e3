use log::warn;
use std::sync::Arc;

use crate::{
    config::database::Store,
    models::activity_model::ActivityView,
    repositories::{activity_repository::ActivityRepository, user_repository::UserRepository},
};

pub struct ActivityService {
    pub activity_repository: ActivityRepository,
    pub user_repository: UserRepository,
}

impl ActivityService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            activity_repository: ActivityRepository::new(store.clone()),
            user_repository: UserRepository::new(store),
        }
    }

    /// Newest entries first. A non-positive `limit` reads as "no limit".
    pub async fn recent_activity(&self, limit: i64) -> Vec<ActivityView> {
        let activities = match self.activity_repository.recent(limit.max(0)).await {
            Ok(activities) => activities,
            Err(err) => {
                warn!("Error fetching recent activity: {}", err);
                return Vec::new();
            }
        };
        let actors = self.user_repository.directory_for(&activities, "user").await;
        activities
            .iter()
            .map(|doc| ActivityView::from_document(doc, &actors))
            .collect()
    }
}
