use actix_cors::Cors;
use actix_web::http::{Method, header};

use crate::constants::ALLOWED_ORIGIN;

pub fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&ALLOWED_ORIGIN)
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
