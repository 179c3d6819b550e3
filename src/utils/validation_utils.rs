use actix_web::{HttpResponse, http::StatusCode};
use log::error;
use serde_json::json;
use std::{borrow::Cow, collections::HashMap};
use validator::{ValidationError, ValidationErrors};

use crate::{
    errors::{ErrorKind, ServiceError},
    types::{
        requests::{
            non_blank, subscription_request::SubscriptionFields, user_request::UserFields,
        },
        responses::api_response::{ApiResponse, ErrorDetails},
    },
    utils::locale_utils::Messages,
    validations::{name::validate_name, phone::validate_phone_number},
};

pub fn handle_validation_error(errors: ValidationErrors, msg: &str) -> HttpResponse {
    let error_details = ErrorDetails {
        kind: None,
        details: Some(json!(&errors)),
    };
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(msg, error_details))
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MalformedId | ErrorKind::InvalidStatus | ErrorKind::InvalidDate => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound | ErrorKind::CollectionAbsent => StatusCode::NOT_FOUND,
        ErrorKind::NoModification => StatusCode::CONFLICT,
        ErrorKind::StoreUnreachable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn fallback_notice(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::StoreUnreachable => "The database is currently unreachable.",
        ErrorKind::CollectionAbsent => "This collection does not exist yet.",
        ErrorKind::NotFound => "The requested record was not found.",
        ErrorKind::NoModification => "No changes were applied.",
        ErrorKind::MalformedId => "The identifier is malformed.",
        ErrorKind::InvalidStatus => "The status is not allowed for this record.",
        ErrorKind::InvalidDate => "The date could not be understood.",
        ErrorKind::Store => "The database rejected the operation.",
    }
}

/// Maps a data-layer failure to its HTTP status and localized notice.
pub fn handle_service_error(err: ServiceError, messages: &Messages) -> HttpResponse {
    let kind = err.kind();
    let status = status_for(kind);
    if status.is_server_error() {
        error!("Dashboard operation failed: {}", err);
    }

    let key: &'static str = kind.into();
    let notice = messages.get_dashboard_message(&format!("errors.{key}"), fallback_notice(kind));
    let error_details = ErrorDetails {
        kind: Some(kind),
        details: Some(json!(err.to_string())),
    };
    HttpResponse::build(status).json(ApiResponse::<()>::error(notice, error_details))
}

pub fn handle_not_found(messages: &Messages, key: &str, fallback: &str, id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        format!("{}: {}", messages.get_dashboard_message(key, fallback), id),
        ErrorDetails::of_kind(ErrorKind::NotFound),
    ))
}

/// Create forms need every identity field; edit forms only check what was sent.
pub fn validate_user_fields(
    data: &UserFields,
    messages: &Messages,
    require_all: bool,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for (field, value) in [("firstname", &data.firstname), ("lastname", &data.lastname)] {
        match non_blank(value) {
            Some(name) => {
                if let Err(e) = validate_name(name, messages) {
                    errors.add(field, e);
                }
            }
            None if require_all => errors.add(field, missing_field(field, messages)),
            None => {}
        }
    }

    match non_blank(&data.phone_number) {
        Some(phone) => {
            if let Err(e) = validate_phone_number(phone, messages) {
                errors.add("phoneNumber", e);
            }
        }
        None if require_all => errors.add("phoneNumber", missing_field("phoneNumber", messages)),
        None => {}
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_subscription_fields(
    data: &SubscriptionFields,
    messages: &Messages,
    require_owner: bool,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if require_owner && non_blank(&data.user_id).is_none() {
        errors.add("user_id", missing_field("user_id", messages));
    }
    if let Some(price) = non_blank(&data.price) {
        if !price.parse::<f64>().is_ok_and(|amount| amount >= 0.0) {
            errors.add(
                "price",
                add_error(
                    "price.invalid",
                    messages.get_validation_message(
                        "price.invalid",
                        "Price must be a positive number",
                    ),
                    price,
                ),
            );
        }
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn missing_field(field: &'static str, messages: &Messages) -> ValidationError {
    add_error(
        "field.required",
        messages.get_validation_message("field.required", "This field is required"),
        field,
    )
}

pub fn add_error(code: &'static str, message: String, field_value: &str) -> ValidationError {
    ValidationError {
        code: code.into(),
        message: Some(Cow::Owned(message)),
        params: {
            let mut params = HashMap::new();
            params.insert("value".into(), json!(field_value));
            params
        },
    }
}
