use mongodb::bson::Document;
use serde::Deserialize;

use crate::{
    errors::ServiceResult,
    types::{
        models::status::{BoxStatus, EntityStatus},
        requests::{non_blank, parse_object_id},
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoxFields {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub box_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub user_id: Option<String>,
}

impl BoxFields {
    pub fn to_document(&self) -> ServiceResult<Document> {
        let mut document = Document::new();
        for (key, value) in [
            ("name", &self.name),
            ("serialNumber", &self.serial_number),
            ("boxType", &self.box_type),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if let Some(value) = non_blank(value) {
                document.insert(key, value);
            }
        }
        if let Some(status) = non_blank(&self.status) {
            document.insert("status", BoxStatus::parse_for_write(status)?.as_ref());
        }
        if let Some(user_id) = non_blank(&self.user_id) {
            document.insert("user", parse_object_id(user_id)?);
        }
        Ok(document)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignBoxForm {
    pub box_id: String,
    pub assignment_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn user_id_becomes_native_reference() {
        let owner = ObjectId::new();
        let fields = BoxFields {
            name: Some("Box 12".into()),
            serial_number: Some("SN-0012".into()),
            status: Some("active".into()),
            user_id: Some(owner.to_hex()),
            ..Default::default()
        };
        assert_eq!(
            fields.to_document().unwrap(),
            doc! { "name": "Box 12", "serialNumber": "SN-0012", "status": "active", "user": owner }
        );
    }

    #[test]
    fn malformed_user_id_is_reported() {
        let fields = BoxFields {
            user_id: Some("12345".into()),
            ..Default::default()
        };
        assert_eq!(fields.to_document().unwrap_err().kind(), ErrorKind::MalformedId);
    }
}
