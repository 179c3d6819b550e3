use serde::Serialize;
use std::sync::Arc;

use crate::{
    config::database::Store,
    models::{box_model::BoxView, user_model::UserView},
    services::{
        activity_service::ActivityService, box_service::BoxService,
        feedback_service::FeedbackService, subscription_service::SubscriptionService,
        user_service::UserService,
    },
    types::models::{
        stats::{FeedbackStats, StatusStats},
        status::{BoxStatus, SubscriptionStatus, UserStatus},
    },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub user_stats: StatusStats<UserStatus>,
    pub box_stats: StatusStats<BoxStatus>,
    pub subscription_stats: StatusStats<SubscriptionStatus>,
    pub feedback_stats: FeedbackStats,
    pub users: Vec<UserView>,
    pub boxes: Vec<BoxView>,
}

/// Every entity service over one shared store handle.
pub struct DataService {
    pub store: Arc<Store>,
    pub users: UserService,
    pub boxes: BoxService,
    pub subscriptions: SubscriptionService,
    pub feedbacks: FeedbackService,
    pub activities: ActivityService,
}

impl DataService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            boxes: BoxService::new(store.clone()),
            subscriptions: SubscriptionService::new(store.clone()),
            feedbacks: FeedbackService::new(store.clone()),
            activities: ActivityService::new(store.clone()),
            store,
        }
    }

    pub async fn overview(&self) -> DashboardOverview {
        let (user_stats, box_stats, subscription_stats, feedback_stats, users, boxes) = tokio::join!(
            self.users.stats(),
            self.boxes.stats(),
            self.subscriptions.stats(),
            self.feedbacks.feedback_stats(),
            self.users.list(),
            self.boxes.list(),
        );

        DashboardOverview {
            user_stats,
            box_stats,
            subscription_stats,
            feedback_stats,
            users,
            boxes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::database::StoreConfig;
    use std::time::{Duration, Instant};

    #[actix_rt::test]
    async fn overview_degrades_to_zero_counts_without_a_store() {
        let service = DataService::new(Arc::new(Store::new(StoreConfig::unreachable())));
        let overview = service.overview().await;

        assert_eq!(overview.user_stats.total(), 0);
        assert_eq!(overview.box_stats.total(), 0);
        assert_eq!(overview.subscription_stats.total(), 0);
        assert_eq!(overview.feedback_stats, FeedbackStats::default());
        assert!(overview.users.is_empty());
        assert!(overview.boxes.is_empty());

        let body = serde_json::to_value(&overview).unwrap();
        assert_eq!(body["userStats"]["pending_box"], 0);
        assert_eq!(body["feedbackStats"]["total"], 0);
    }

    #[actix_rt::test]
    async fn overview_against_a_dead_store_costs_one_retry_cycle() {
        let config = StoreConfig {
            connect_attempts: 2,
            retry_delay: Duration::from_millis(100),
            ..StoreConfig::unreachable()
        };
        let cycle = (config.server_selection_timeout + config.retry_delay) * config.connect_attempts;
        let service = DataService::new(Arc::new(Store::new(config)));

        let started = Instant::now();
        let overview = service.overview().await;
        let elapsed = started.elapsed();

        assert_eq!(overview.user_stats.total(), 0);
        assert!(elapsed < cycle * 2, "overview took {elapsed:?}");

        let started = Instant::now();
        service.overview().await;
        assert!(started.elapsed() < cycle);
    }
}
