pub mod box_handler;
pub mod dashboard_handler;
pub mod subscription_handler;
pub mod user_handler;
