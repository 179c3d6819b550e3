use mongodb::bson::{Bson, Document};
use serde::Deserialize;

use crate::{
    errors::{ServiceError, ServiceResult},
    types::{
        models::status::{EntityStatus, SubscriptionStatus},
        requests::{non_blank, parse_object_id},
    },
    utils::{bson_utils::to_bson_datetime, date_utils::parse_iso_datetime},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionFields {
    pub user_id: Option<String>,
    pub plan: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
}

impl SubscriptionFields {
    /// Converts the owner id into a native reference and the ISO-8601 dates
    /// into native dates before anything is written.
    pub fn to_document(&self) -> ServiceResult<Document> {
        let mut document = Document::new();

        if let Some(user_id) = non_blank(&self.user_id) {
            document.insert("user", parse_object_id(user_id)?);
        }
        for (key, value) in [("plan", &self.plan), ("paymentMethod", &self.payment_method)] {
            if let Some(value) = non_blank(value) {
                document.insert(key, value);
            }
        }
        if let Some(status) = non_blank(&self.status) {
            document.insert(
                "status",
                SubscriptionStatus::parse_for_write(status)?.as_ref(),
            );
        }
        for (key, value) in [("startDate", &self.start_date), ("endDate", &self.end_date)] {
            if let Some(raw) = non_blank(value) {
                let parsed = parse_iso_datetime(raw)
                    .ok_or_else(|| ServiceError::InvalidDate(raw.to_string()))?;
                document.insert(key, to_bson_datetime(parsed));
            }
        }
        if let Some(price) = non_blank(&self.price) {
            let value = match price.parse::<f64>() {
                Ok(amount) => Bson::Double(amount),
                Err(_) => Bson::String(price.to_string()),
            };
            document.insert("price", value);
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::{TimeZone, Utc};
    use mongodb::bson::oid::ObjectId;

    fn fields() -> SubscriptionFields {
        SubscriptionFields {
            user_id: Some(ObjectId::new().to_hex()),
            plan: Some("premium".into()),
            status: Some("active".into()),
            start_date: Some("2024-01-01T00:00:00Z".into()),
            end_date: Some("2024-12-31".into()),
            price: Some("15000".into()),
            payment_method: Some("wave".into()),
        }
    }

    #[test]
    fn dates_are_stored_natively() {
        let document = fields().to_document().unwrap();
        let start = document.get_datetime("startDate").unwrap();
        assert_eq!(
            start.to_chrono(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(document.get_datetime("endDate").is_ok());
        assert!(document.get_object_id("user").is_ok());
        assert_eq!(document.get_f64("price").unwrap(), 15000.0);
    }

    #[test]
    fn unparseable_date_is_reported() {
        let mut fields = fields();
        fields.end_date = Some("31/12/2024".into());
        assert_eq!(fields.to_document().unwrap_err().kind(), ErrorKind::InvalidDate);
    }

    #[test]
    fn misspelled_status_is_rejected() {
        let mut fields = fields();
        fields.status = Some("cancelled".into());
        assert_eq!(
            fields.to_document().unwrap_err().kind(),
            ErrorKind::InvalidStatus
        );
    }
}
