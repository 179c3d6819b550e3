use chrono::{DateTime, Utc};
use log::info;
use mongodb::{
    bson::{Document, doc},
    results::{DeleteResult, UpdateResult},
};

use crate::{
    errors::{ServiceError, ServiceResult},
    repositories::document_repository::DocumentRepository,
    types::{
        models::status::EntityStatus,
        requests::parse_object_id,
        responses::write_outcome::{Deleted, Modified, StatusChanged},
    },
    utils::bson_utils::to_bson_datetime,
};

pub fn stamp_created_at(document: &mut Document, now: DateTime<Utc>) {
    if !document.contains_key("createdAt") {
        document.insert("createdAt", to_bson_datetime(now));
    }
}

pub fn stamp_updated_at(document: &mut Document, now: DateTime<Utc>) {
    document.insert("updatedAt", to_bson_datetime(now));
}

/// A write that matched nothing is `NotFound`; one that matched but changed
/// nothing is `NoModification`, left to the caller to treat as it sees fit.
pub fn modified(entity: &'static str, id: &str, result: &UpdateResult) -> ServiceResult<Modified> {
    classify_update(entity, id, result.matched_count, result.modified_count)
}

fn classify_update(
    entity: &'static str,
    id: &str,
    matched_count: u64,
    modified_count: u64,
) -> ServiceResult<Modified> {
    if matched_count == 0 {
        Err(ServiceError::not_found(entity, id))
    } else if modified_count == 0 {
        Err(ServiceError::no_modification(entity, id))
    } else {
        Ok(Modified { modified_count })
    }
}

pub fn deleted(entity: &'static str, id: &str, result: &DeleteResult) -> ServiceResult<Deleted> {
    if result.deleted_count == 0 {
        return Err(ServiceError::not_found(entity, id));
    }
    info!("{} {} deleted", entity, id);
    Ok(Deleted {
        deleted_count: result.deleted_count,
    })
}

/// Checks `status` against the entity's lifecycle before the store is
/// touched, then writes it.
pub async fn apply_status<S: EntityStatus>(
    documents: &DocumentRepository,
    id: &str,
    status: &str,
) -> ServiceResult<StatusChanged> {
    let status = S::parse_for_write(status)?;
    let oid = parse_object_id(id)?;

    let result = documents
        .update_one(
            doc! { "_id": oid },
            doc! { "$set": { "status": status.as_ref() } },
        )
        .await?;
    modified(S::ENTITY, id, &result)?;

    info!("{} {} moved to status '{}'", S::ENTITY, id, status.as_ref());
    Ok(StatusChanged {
        id: id.to_string(),
        status: status.as_ref().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::TimeZone;

    #[test]
    fn missing_created_at_is_stamped_with_call_time() {
        let now = Utc.with_ymd_and_hms(2025, 5, 4, 12, 0, 0).unwrap();
        let mut document = doc! { "firstname": "Awa" };
        stamp_created_at(&mut document, now);
        assert_eq!(document.get_datetime("createdAt").unwrap().to_chrono(), now);
    }

    #[test]
    fn caller_supplied_created_at_is_kept() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut document = doc! { "createdAt": to_bson_datetime(earlier) };
        stamp_created_at(&mut document, Utc::now());
        assert_eq!(
            document.get_datetime("createdAt").unwrap().to_chrono(),
            earlier
        );
    }

    #[test]
    fn update_outcomes_are_distinguished() {
        assert_eq!(
            classify_update("user", "x", 0, 0).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            classify_update("user", "x", 1, 0).unwrap_err().kind(),
            ErrorKind::NoModification
        );
        assert_eq!(
            classify_update("user", "x", 1, 1).unwrap(),
            Modified { modified_count: 1 }
        );
    }
}
