use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::{
        box_handler::{
            assign_box_handler, create_box_handler, create_user_box_handler, delete_box_handler,
            get_box_handler, get_box_stats_handler, get_boxes_handler, get_user_boxes_handler,
            unassign_box_handler, update_box_handler, update_box_status_handler,
        },
        dashboard_handler::{
            get_feedback_stats_handler, get_feedbacks_handler, overview_handler,
            recent_activity_handler,
        },
        subscription_handler::{
            create_subscription_handler, delete_subscription_handler,
            get_subscription_handler, get_subscription_stats_handler, get_subscriptions_handler,
            update_subscription_handler, update_subscription_status_handler,
        },
        user_handler::{
            create_user_handler, delete_user_handler, get_user_handler, get_user_stats_handler,
            get_users_handler, update_user_handler, update_user_status_handler,
        },
    },
    services::data_service::DataService,
    utils::auth_utils::AuthConfig,
};

/// Registers the admin surface under `/dashboard`. Static segments such as
/// `/stats` are declared before the `{id}` resources they would shadow.
pub fn configure_dashboard_routes(
    cfg: &mut web::ServiceConfig,
    data_service_data: web::Data<Arc<DataService>>,
    auth_config_data: web::Data<AuthConfig>,
) {
    cfg.service(
        web::scope("/dashboard")
            .wrap(configure_cors())
            .app_data(data_service_data)
            .app_data(auth_config_data)
            .route("", web::get().to(overview_handler))
            .route("/activities", web::get().to(recent_activity_handler))
            .service(
                web::scope("/users")
                    .route("", web::get().to(get_users_handler))
                    .route("", web::post().to(create_user_handler))
                    .route("/stats", web::get().to(get_user_stats_handler))
                    .route("/{id}", web::get().to(get_user_handler))
                    .route("/{id}", web::post().to(update_user_handler))
                    .route("/{id}", web::delete().to(delete_user_handler))
                    .route("/{id}/status", web::post().to(update_user_status_handler))
                    .route("/{id}/boxes", web::get().to(get_user_boxes_handler))
                    .route("/{id}/boxes", web::post().to(create_user_box_handler))
                    .route("/{id}/boxes/assign", web::post().to(assign_box_handler))
                    .route(
                        "/{id}/boxes/{box_id}",
                        web::delete().to(unassign_box_handler),
                    ),
            )
            .service(
                web::scope("/boxes")
                    .route("", web::get().to(get_boxes_handler))
                    .route("", web::post().to(create_box_handler))
                    .route("/stats", web::get().to(get_box_stats_handler))
                    .route("/{id}", web::get().to(get_box_handler))
                    .route("/{id}", web::post().to(update_box_handler))
                    .route("/{id}", web::delete().to(delete_box_handler))
                    .route("/{id}/status", web::post().to(update_box_status_handler)),
            )
            .service(
                web::scope("/subscriptions")
                    .route("", web::get().to(get_subscriptions_handler))
                    .route("", web::post().to(create_subscription_handler))
                    .route("/stats", web::get().to(get_subscription_stats_handler))
                    .route("/{id}", web::get().to(get_subscription_handler))
                    .route("/{id}", web::post().to(update_subscription_handler))
                    .route("/{id}", web::delete().to(delete_subscription_handler))
                    .route(
                        "/{id}/status",
                        web::post().to(update_subscription_status_handler),
                    ),
            )
            .service(
                web::scope("/feedbacks")
                    .route("", web::get().to(get_feedbacks_handler))
                    .route("/stats", web::get().to(get_feedback_stats_handler)),
            ),
    );
}
