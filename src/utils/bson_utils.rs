use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document, oid::ObjectId};

use crate::utils::date_utils::parse_iso_datetime;

pub fn id_string(doc: &Document) -> String {
    string_field(doc, "_id")
}

/// Display string for a loosely typed field; absent or structured values
/// read as the empty string.
pub fn string_field(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::Int32(value)) => value.to_string(),
        Some(Bson::Int64(value)) => value.to_string(),
        Some(Bson::Double(value)) => value.to_string(),
        _ => String::new(),
    }
}

pub fn optional_string_field(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key) {
        None | Some(Bson::Null) => None,
        Some(_) => Some(string_field(doc, key)),
    }
}

/// Numeric reading of a field, mirroring the store's `$convert` to double
/// with `onError`/`onNull` set to zero.
pub fn number_field(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(Bson::Double(value)) => *value,
        Some(Bson::Int32(value)) => f64::from(*value),
        Some(Bson::Int64(value)) => *value as f64,
        Some(Bson::Decimal128(value)) => value.to_string().parse().unwrap_or(0.0),
        Some(Bson::Boolean(value)) => f64::from(u8::from(*value)),
        Some(Bson::DateTime(value)) => value.timestamp_millis() as f64,
        Some(Bson::String(value)) => value.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn count_field(doc: &Document, key: &str) -> u64 {
    match doc.get(key) {
        Some(Bson::Int32(value)) => u64::try_from(*value).unwrap_or(0),
        Some(Bson::Int64(value)) => u64::try_from(*value).unwrap_or(0),
        Some(Bson::Double(value)) if *value > 0.0 => *value as u64,
        _ => 0,
    }
}

pub fn datetime_field(doc: &Document, key: &str) -> Option<DateTime<Utc>> {
    match doc.get(key) {
        Some(Bson::DateTime(value)) => Some(value.to_chrono()),
        Some(Bson::String(value)) => parse_iso_datetime(value),
        _ => None,
    }
}

/// Reference stored under `key`, whether written as a native id or as its
/// hex string.
pub fn reference_field(doc: &Document, key: &str) -> Option<ObjectId> {
    match doc.get(key) {
        Some(Bson::ObjectId(oid)) => Some(*oid),
        Some(Bson::String(value)) => ObjectId::parse_str(value).ok(),
        _ => None,
    }
}

pub fn to_bson_datetime(value: DateTime<Utc>) -> Bson {
    Bson::DateTime(mongodb::bson::DateTime::from_chrono(value))
}
