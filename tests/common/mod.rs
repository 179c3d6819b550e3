#![allow(dead_code)]

use actix_web::web;
use boxfleet_dashboard::{
    config::database::{Store, StoreConfig},
    services::data_service::DataService,
    utils::auth_utils::{AuthConfig, generate_jwt},
};
use chrono::Duration as TokenTtl;
use std::{sync::Arc, time::Duration};

pub const SESSION_COOKIE: &str = "admin_session";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: "integration-secret".to_string(),
        cookie_name: SESSION_COOKIE.to_string(),
    }
}

pub fn staff_token() -> String {
    generate_jwt(&auth_config(), "admin-1", true, TokenTtl::hours(1)).unwrap()
}

pub fn member_token() -> String {
    generate_jwt(&auth_config(), "member-7", false, TokenTtl::hours(1)).unwrap()
}

/// A store pointed at a port nothing listens on; it only fails once used.
pub fn unreachable_store() -> Arc<Store> {
    Arc::new(Store::new(StoreConfig {
        uri: "mongodb://127.0.0.1:1/agrioth_test".to_string(),
        connect_attempts: 1,
        retry_delay: Duration::from_millis(10),
        server_selection_timeout: Duration::from_millis(100),
        retry_cooldown: Duration::from_secs(30),
    }))
}

pub fn offline_data() -> (Arc<Store>, web::Data<Arc<DataService>>) {
    let store = unreachable_store();
    let data = web::Data::new(Arc::new(DataService::new(store.clone())));
    (store, data)
}

/// Live store on a throwaway database, or `None` when `MONGODB_TEST_URI`
/// is unset. The URI names a server, not a database.
pub fn live_store() -> Option<Arc<Store>> {
    let base = std::env::var("MONGODB_TEST_URI").ok()?;
    let database = format!("boxfleet_test_{}", uuid::Uuid::new_v4().simple());
    Some(Arc::new(Store::new(StoreConfig {
        uri: format!("{}/{}", base.trim_end_matches('/'), database),
        connect_attempts: 2,
        retry_delay: Duration::from_millis(200),
        server_selection_timeout: Duration::from_secs(3),
        retry_cooldown: Duration::from_secs(1),
    })))
}
