use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    services::data_service::DataService,
    types::{
        requests::{
            box_request::{AssignBoxForm, BoxFields},
            non_blank,
            query_request::SearchQuery,
            status_request::StatusForm,
        },
        responses::api_response::ApiResponse,
    },
    utils::{
        auth_utils::AdminSession,
        locale_utils::{Messages, get_lang},
        validation_utils::{handle_not_found, handle_service_error},
    },
};

pub async fn get_boxes_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let boxes = match query.q.as_deref() {
        Some(q) => data_service.boxes.search(q).await,
        None => data_service.boxes.list().await,
    };
    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("boxes.fetch_all_success", "Boxes fetched successfully."),
        boxes,
    ))
}

pub async fn get_box_stats_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("boxes.stats_success", "Box statistics computed."),
        data_service.boxes.stats().await,
    ))
}

pub async fn get_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.boxes.get_by_id(&id).await {
        Some(found) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.fetch_success", "Box fetched successfully."),
            found,
        )),
        None => handle_not_found(&messages, "boxes.not_found", "Box not found", &id),
    }
}

pub async fn create_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    form: web::Form<BoxFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.boxes.create(form.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.create_success", "Box successfully created."),
            created,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<BoxFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.boxes.update(&id, form.into_inner()).await {
        Ok(modified) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.update_success", "Box updated successfully."),
            modified,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn delete_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.boxes.delete(&id).await {
        Ok(deleted) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.delete_success", "Box deleted successfully."),
            deleted,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn update_box_status_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    id: web::Path<String>,
    form: web::Form<StatusForm>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service.boxes.update_status(&id, &form.status).await {
        Ok(changed) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.status_success", "Box status updated."),
            changed,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn get_user_boxes_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_dashboard_message("boxes.user_fetch_success", "User boxes fetched."),
        data_service.boxes.user_boxes(&user_id).await,
    ))
}

pub async fn create_user_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    user_id: web::Path<String>,
    form: web::Form<BoxFields>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match data_service
        .boxes
        .create_for_user(&user_id, form.into_inner())
        .await
    {
        Ok(created) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.create_success", "Box successfully created."),
            created,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn assign_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    user_id: web::Path<String>,
    form: web::Form<AssignBoxForm>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let notes = non_blank(&form.assignment_notes);

    match data_service.boxes.assign(&user_id, &form.box_id, notes).await {
        Ok(modified) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.assign_success", "Box assigned to user."),
            modified,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}

pub async fn unassign_box_handler(
    _session: AdminSession,
    req: HttpRequest,
    data_service: web::Data<Arc<DataService>>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let (user_id, box_id) = path.into_inner();

    match data_service.boxes.unassign(&user_id, &box_id).await {
        Ok(modified) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_dashboard_message("boxes.unassign_success", "Box released from user."),
            modified,
        )),
        Err(err) => handle_service_error(err, &messages),
    }
}
