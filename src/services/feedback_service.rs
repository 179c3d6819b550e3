use log::warn;
use std::sync::Arc;

use crate::{
    config::database::Store,
    errors::ErrorKind,
    models::feedback_model::FeedbackView,
    repositories::{feedback_repository::FeedbackRepository, user_repository::UserRepository},
    types::models::stats::FeedbackStats,
};

/// Read-only access to the feedback users leave from the mobile app.
pub struct FeedbackService {
    pub feedback_repository: FeedbackRepository,
    pub user_repository: UserRepository,
}

impl FeedbackService {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            feedback_repository: FeedbackRepository::new(store.clone()),
            user_repository: UserRepository::new(store),
        }
    }

    pub async fn list(&self) -> Vec<FeedbackView> {
        let feedbacks = match self.feedback_repository.documents.find_all().await {
            Ok(feedbacks) => feedbacks,
            Err(err) => {
                warn!("Error fetching feedbacks: {}", err);
                return Vec::new();
            }
        };
        let authors = self.user_repository.directory_for(&feedbacks, "user").await;
        feedbacks
            .iter()
            .map(|doc| FeedbackView::from_document(doc, &authors))
            .collect()
    }

    pub async fn feedback_stats(&self) -> FeedbackStats {
        match self.feedback_repository.rating_buckets().await {
            Ok(group) => FeedbackStats::from_group(group.as_ref()),
            Err(err) if err.kind() == ErrorKind::StoreUnreachable => {
                warn!("Feedback stats unavailable: {}", err);
                Default::default()
            }
            Err(err) => {
                warn!("Feedback stats aggregation failed, bucketing client-side: {}", err);
                self.stats_from_list().await
            }
        }
    }

    pub async fn stats_from_list(&self) -> FeedbackStats {
        let feedbacks = self.list().await;
        FeedbackStats::from_ratings(feedbacks.iter().map(|feedback| feedback.rating))
    }
}
