use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    constants::DEFAULT_ACTIVITY_LIMIT,
    services::data_service::DataService,
    types::{requests::query_request::ActivityQuery, responses::api_response::ApiResponse},
    utils::{
        auth_utils::AdminSession,
        locale_utils::{Messages, get_lang},
    },
};

pub async fn overview_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("overview.success", "Dashboard loaded."),
        data_service.overview().await,
    ))
}

pub async fn recent_activity_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    query: web::Query<ActivityQuery>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("activities.fetch_success", "Recent activity fetched."),
        data_service.activities.recent_activity(limit).await,
    ))
}

pub async fn get_feedbacks_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message(
            "feedbacks.fetch_all_success",
            "Feedbacks fetched successfully.",
        ),
        data_service.feedbacks.list().await,
    ))
}

pub async fn get_feedback_stats_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("feedbacks.stats_success", "Feedback statistics computed."),
        data_service.feedbacks.feedback_stats().await,
    ))
}
