mod common;

use actix_web::{
    App,
    cookie::Cookie,
    http::{StatusCode, header},
    test, web,
};
use boxfleet_dashboard::routes::dashboard_routes::configure_dashboard_routes;
use serde_json::Value;

use common::{SESSION_COOKIE, auth_config, member_token, offline_data, staff_token};

macro_rules! offline_app {
    () => {{
        let (store, data) = offline_data();
        let auth = web::Data::new(auth_config());
        let app = test::init_service(
            App::new().configure(|cfg| configure_dashboard_routes(cfg, data, auth)),
        )
        .await;
        (store, app)
    }};
}

fn as_staff(req: test::TestRequest) -> test::TestRequest {
    req.cookie(Cookie::new(SESSION_COOKIE, staff_token()))
}

#[actix_web::test]
async fn routes_require_a_session() {
    let (store, app) = offline_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboard/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/dashboard/boxes")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    assert!(!store.is_connected());
}

#[actix_web::test]
async fn non_staff_sessions_are_forbidden() {
    let (_, app) = offline_app!();

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, member_token()))
        .insert_header((header::ACCEPT_LANGUAGE, "fr-FR"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Accès réservé au personnel.");
}

#[actix_web::test]
async fn bearer_header_is_accepted_like_the_cookie() {
    let (_, app) = offline_app!();

    let req = test::TestRequest::get()
        .uri("/dashboard/feedbacks/stats")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", staff_token())))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        serde_json::json!({ "total": 0, "positive": 0, "neutral": 0, "negative": 0 })
    );
}

#[actix_web::test]
async fn reads_degrade_to_empty_payloads_without_a_store() {
    let (_, app) = offline_app!();

    let req = as_staff(test::TestRequest::get().uri("/dashboard/users?q=Awa")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], serde_json::json!([]));

    let req = as_staff(test::TestRequest::get().uri("/dashboard/boxes/stats")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        serde_json::json!({ "total": 0, "active": 0, "inactive": 0, "maintenance": 0 })
    );

    let req = as_staff(test::TestRequest::get().uri("/dashboard/activities?limit=5")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], serde_json::json!([]));
}

#[actix_web::test]
async fn unknown_records_answer_not_found() {
    let (_, app) = offline_app!();

    let req = as_staff(test::TestRequest::get().uri("/dashboard/users/not-an-id")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "not_found");
}

#[actix_web::test]
async fn invalid_status_is_rejected_before_the_store_is_used() {
    let (store, app) = offline_app!();

    let req = as_staff(
        test::TestRequest::post()
            .uri("/dashboard/boxes/65f1c0ffee0000000000beef/status")
            .set_form([("status", "exploded")]),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "invalid_status");
    assert!(!store.is_connected());
}

#[actix_web::test]
async fn malformed_ids_are_reported() {
    let (_, app) = offline_app!();

    let req = as_staff(test::TestRequest::delete().uri("/dashboard/subscriptions/1234")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "malformed_id");
}

#[actix_web::test]
async fn user_form_is_validated_per_field() {
    let (store, app) = offline_app!();

    let req = as_staff(
        test::TestRequest::post()
            .uri("/dashboard/users")
            .set_form([("firstname", "A"), ("lastname", "Diop"), ("phoneNumber", "")]),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let details = &body["error"]["details"];
    assert!(details.get("firstname").is_some());
    assert!(details.get("phoneNumber").is_some());
    assert!(details.get("lastname").is_none());
    assert!(!store.is_connected());
}

#[actix_web::test]
async fn writes_report_an_unreachable_store() {
    let (_, app) = offline_app!();

    let req = as_staff(
        test::TestRequest::post().uri("/dashboard/users").set_form([
            ("firstname", "Awa"),
            ("lastname", "Diop"),
            ("phoneNumber", "+33612345678"),
            ("region", "Dakar"),
        ]),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "store_unreachable");
}

#[actix_web::test]
async fn subscription_dates_are_checked_before_writing() {
    let (store, app) = offline_app!();

    let req = as_staff(
        test::TestRequest::post().uri("/dashboard/subscriptions").set_form([
            ("user_id", "65f1c0ffee0000000000beef"),
            ("plan", "premium"),
            ("startDate", "next tuesday"),
        ]),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "invalid_date");
    assert!(!store.is_connected());
}
