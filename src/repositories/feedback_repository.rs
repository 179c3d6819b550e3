use mongodb::bson::{Bson, Document, doc};
use std::sync::Arc;

use crate::{
    config::database::Store,
    constants::FEEDBACK_COL_NAME,
    errors::ServiceResult,
    repositories::document_repository::DocumentRepository,
    types::models::stats::{NEUTRAL_RATING_MIN, POSITIVE_RATING_MIN},
};

pub struct FeedbackRepository {
    pub documents: DocumentRepository,
}

impl FeedbackRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            documents: DocumentRepository::optional(store, FEEDBACK_COL_NAME),
        }
    }

    /// Returns the single bucket document, or `None` on an empty collection.
    pub async fn rating_buckets(&self) -> ServiceResult<Option<Document>> {
        let groups = self.documents.aggregate(rating_bucket_pipeline()).await?;
        Ok(groups.into_iter().next())
    }
}

/// One pass over the collection, bucketing ratings with the thresholds the
/// client-side classifier uses. Ratings are coerced to doubles first, with
/// anything unconvertible counted as zero.
pub fn rating_bucket_pipeline() -> Vec<Document> {
    vec![
        doc! { "$project": { "rating": {
            "$convert": { "input": "$rating", "to": "double", "onError": 0.0, "onNull": 0.0 }
        } } },
        doc! { "$group": {
            "_id": Bson::Null,
            "total": { "$sum": 1 },
            "positive": { "$sum": { "$cond": [
                { "$gte": ["$rating", POSITIVE_RATING_MIN] }, 1, 0
            ] } },
            "neutral": { "$sum": { "$cond": [
                { "$and": [
                    { "$gte": ["$rating", NEUTRAL_RATING_MIN] },
                    { "$lt": ["$rating", POSITIVE_RATING_MIN] }
                ] }, 1, 0
            ] } },
            "negative": { "$sum": { "$cond": [
                { "$lt": ["$rating", NEUTRAL_RATING_MIN] }, 1, 0
            ] } }
        } },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_pipeline_uses_shared_thresholds() {
        let pipeline = rating_bucket_pipeline();
        assert_eq!(pipeline.len(), 2);

        let group = pipeline[1].get_document("$group").unwrap();
        let threshold = |bucket: &str, op: &str| -> Bson {
            let cond = group
                .get_document(bucket)
                .unwrap()
                .get_document("$sum")
                .unwrap()
                .get_array("$cond")
                .unwrap()[0]
                .clone();
            cond.as_document().unwrap().get_array(op).unwrap()[1].clone()
        };
        assert_eq!(threshold("positive", "$gte"), Bson::Double(POSITIVE_RATING_MIN));
        assert_eq!(threshold("negative", "$lt"), Bson::Double(NEUTRAL_RATING_MIN));
    }
}
