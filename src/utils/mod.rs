pub mod auth_utils;
pub mod bson_utils;
pub mod date_utils;
pub mod locale_utils;
pub mod validation_utils;
