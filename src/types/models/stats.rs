use mongodb::bson::{Bson, Document};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

use crate::{types::models::status::EntityStatus, utils::bson_utils::count_field};

pub const POSITIVE_RATING_MIN: f64 = 4.0;
pub const NEUTRAL_RATING_MIN: f64 = 3.0;

/// Per-status document counts of one collection.
///
/// Serializes flat as `{"total": n, "<status>": n, ...}` with every status of
/// the entity present, zero when nothing carries it. Documents whose status is
/// missing or outside the enum only count towards `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStats<S: EntityStatus> {
    total: u64,
    counts: BTreeMap<S, u64>,
}

impl<S: EntityStatus> Default for StatusStats<S> {
    fn default() -> Self {
        Self {
            total: 0,
            counts: BTreeMap::new(),
        }
    }
}

impl<S: EntityStatus> StatusStats<S> {
    pub fn record(&mut self, status: Option<&str>, count: u64) {
        self.total += count;
        if let Some(status) = status.and_then(|value| S::from_str(value).ok()) {
            *self.counts.entry(status).or_insert(0) += count;
        }
    }

    /// Folds the output of a `{ $group: { _id: "$status", count: { $sum: 1 } } }`
    /// stage.
    pub fn from_groups(groups: impl IntoIterator<Item = Document>) -> Self {
        let mut stats = Self::default();
        for group in groups {
            let status = match group.get("_id") {
                Some(Bson::String(status)) => Some(status.as_str()),
                _ => None,
            };
            stats.record(status, count_field(&group, "count"));
        }
        stats
    }

    /// Client-side count over already normalized records.
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.record(Some(status), 1);
        }
        stats
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, status: S) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

impl<S: EntityStatus> Serialize for StatusStats<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("total", &self.total)?;
        for status in S::iter() {
            map.serialize_entry(status.as_ref(), &self.count(status))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBucket {
    Positive,
    Neutral,
    Negative,
}

impl RatingBucket {
    pub fn classify(rating: f64) -> Self {
        if rating >= POSITIVE_RATING_MIN {
            RatingBucket::Positive
        } else if rating >= NEUTRAL_RATING_MIN {
            RatingBucket::Neutral
        } else {
            RatingBucket::Negative
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackStats {
    pub total: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl FeedbackStats {
    pub fn from_ratings(ratings: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::default();
        for rating in ratings {
            stats.total += 1;
            match RatingBucket::classify(rating) {
                RatingBucket::Positive => stats.positive += 1,
                RatingBucket::Neutral => stats.neutral += 1,
                RatingBucket::Negative => stats.negative += 1,
            }
        }
        stats
    }

    /// Reads the single document produced by the bucketing `$group` stage;
    /// an empty collection produces no document at all.
    pub fn from_group(group: Option<&Document>) -> Self {
        match group {
            Some(group) => Self {
                total: count_field(group, "total"),
                positive: count_field(group, "positive"),
                neutral: count_field(group, "neutral"),
                negative: count_field(group, "negative"),
            },
            None => Self::default(),
        }
    }
}
