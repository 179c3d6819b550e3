use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::{ServiceError, ServiceResult};

/// Closed set of lifecycle states an entity's `status` field may hold.
pub trait EntityStatus:
    FromStr + AsRef<str> + IntoEnumIterator + Copy + Ord + Send + Sync + 'static
{
    const ENTITY: &'static str;

    fn parse_for_write(value: &str) -> ServiceResult<Self> {
        Self::from_str(value.trim()).map_err(|_| ServiceError::InvalidStatus {
            entity: Self::ENTITY,
            value: value.to_string(),
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserStatus {
    PendingBox,
    Active,
    Suspended,
}

impl EntityStatus for UserStatus {
    const ENTITY: &'static str = "user";
}

pub fn default_user_status() -> UserStatus {
    UserStatus::PendingBox
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoxStatus {
    Active,
    Inactive,
    Maintenance,
}

impl EntityStatus for BoxStatus {
    const ENTITY: &'static str = "box";
}

pub fn default_box_status() -> BoxStatus {
    BoxStatus::Inactive
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Canceled,
}

impl EntityStatus for SubscriptionStatus {
    const ENTITY: &'static str = "subscription";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn user_status_accepts_exactly_three_values() {
        let accepted: Vec<_> = ["pending_box", "active", "suspended"]
            .iter()
            .map(|value| UserStatus::parse_for_write(value).unwrap())
            .collect();
        assert_eq!(
            accepted,
            vec![UserStatus::PendingBox, UserStatus::Active, UserStatus::Suspended]
        );
        assert_eq!(UserStatus::iter().count(), 3);

        for rejected in ["", "Active", "pending", "deleted", "inactive"] {
            let err = UserStatus::parse_for_write(rejected).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidStatus, "{rejected}");
        }
    }

    #[test]
    fn box_and_subscription_statuses_use_their_own_sets() {
        assert_eq!(
            BoxStatus::parse_for_write("maintenance").unwrap(),
            BoxStatus::Maintenance
        );
        assert!(BoxStatus::parse_for_write("suspended").is_err());
        assert_eq!(
            SubscriptionStatus::parse_for_write("canceled").unwrap(),
            SubscriptionStatus::Canceled
        );
        assert!(SubscriptionStatus::parse_for_write("cancelled").is_err());
    }

    #[test]
    fn status_round_trips_through_its_wire_name() {
        assert_eq!(UserStatus::PendingBox.as_ref(), "pending_box");
        assert_eq!(
            serde_json::to_value(BoxStatus::Inactive).unwrap(),
            serde_json::json!("inactive")
        );
    }
}
