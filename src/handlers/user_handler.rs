use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    services::data_service::DataService,
    types::{
        requests::{
            query_request::SearchQuery, status_request::StatusForm, user_request::UserFields,
        },
        responses::api_response::ApiResponse,
    },
    utils::{
        auth_utils::AdminSession,
        locale_utils::{Messages, get_lang},
        validation_utils::{
            handle_not_found, handle_service_error, handle_validation_error, validate_user_fields,
        },
    },
};

pub async fn get_users_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let users = match query.q.as_deref() {
        Some(q) => data_service.users.search(q).await,
        None => data_service.users.list().await,
    };
    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("users.fetch_all_success", "Users fetched successfully."),
        users,
    ))
}

pub async fn get_user_stats_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("users.stats_success", "User statistics computed."),
        data_service.users.stats().await,
    ))
}

pub async fn get_user_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.users.get_by_id(&id).await {
        Some(user) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("users.fetch_success", "User fetched successfully."),
            user,
        )),
        None => handle_not_found(&messages, "users.not_found", "User not found", &id),
    }
}

pub async fn create_user_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    form: web::Form<UserFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let data = form.into_inner();

    if let Err(errs) = validate_user_fields(&data, &messages, true) {
        let err_msg = messages.get_dashboard_message("users.create.invalid", "Invalid user data");
        return handle_validation_error(errs, &err_msg);
    }

    match data_service.users.create(data).await {
        Ok(created) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_dashboard_message("users.create.success", "User successfully created."),
            created,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_user_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<UserFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let data = form.into_inner();

    if let Err(errs) = validate_user_fields(&data, &messages, false) {
        let err_msg = messages.get_dashboard_message("users.update.invalid", "Invalid user data");
        return handle_validation_error(errs, &err_msg);
    }

    match data_service.users.update(&id, data).await {
        Ok(modified) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("users.update.success", "User updated successfully."),
            modified,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn delete_user_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.users.delete(&id).await {
        Ok(deleted) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("users.delete.success", "User deleted successfully."),
            deleted,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_user_status_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<StatusForm>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.users.update_status(&id, &form.status).await {
        Ok(changed) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("users.status.success", "User status updated."),
            changed,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}
