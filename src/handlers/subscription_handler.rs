use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    services::data_service::DataService,
    types::{
        requests::{status_request::StatusForm, subscription_request::SubscriptionFields},
        responses::api_response::ApiResponse,
    },
    utils::{
        auth_utils::AdminSession,
        locale_utils::{Messages, get_lang},
        validation_utils::{
            handle_not_found, handle_service_error, handle_validation_error,
            validate_subscription_fields,
        },
    },
};

pub async fn get_subscriptions_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message(
            "subscriptions.fetch_all_success",
            "Subscriptions fetched successfully.",
        ),
        data_service.subscriptions.list().await,
    ))
}

pub async fn get_subscription_stats_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message(
            "subscriptions.stats_success",
            "Subscription statistics computed.",
        ),
        data_service.subscriptions.stats().await,
    ))
}

pub async fn get_subscription_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.subscriptions.get_by_id(&id).await {
        Some(subscription) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message(
                "subscriptions.fetch_success",
                "Subscription fetched successfully.",
            ),
            subscription,
        )),
        None => handle_not_found(
            &messages,
            "subscriptions.not_found",
            "Subscription not found",
            &id,
        ),
    }
}

pub async fn create_subscription_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    form: web::Form<SubscriptionFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let data = form.into_inner();

    if let Err(errs) = validate_subscription_fields(&data, &messages, true) {
        let err_msg = messages
            .get_dashboard_message("subscriptions.invalid", "Invalid subscription data");
        return handle_validation_error(errs, &err_msg);
    }

    match data_service.subscriptions.create(data).await {
        Ok(created) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_dashboard_message(
                "subscriptions.create_success",
                "Subscription successfully created.",
            ),
            created,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_subscription_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<SubscriptionFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let data = form.into_inner();

    if let Err(errs) = validate_subscription_fields(&data, &messages, false) {
        let err_msg = messages
            .get_dashboard_message("subscriptions.invalid", "Invalid subscription data");
        return handle_validation_error(errs, &err_msg);
    }

    match data_service.subscriptions.update(&id, data).await {
        Ok(modified) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message(
                "subscriptions.update_success",
                "Subscription updated successfully.",
            ),
            modified,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn delete_subscription_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.subscriptions.delete(&id).await {
        Ok(deleted) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message(
                "subscriptions.delete_success",
                "Subscription deleted successfully.",
            ),
            deleted,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_subscription_status_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<StatusForm>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service
        .subscriptions
        .update_status(&id, &form.status)
        .await
    {
        Ok(changed) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message(
                "subscriptions.status_success",
                "Subscription status updated.",
            ),
            changed,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}
