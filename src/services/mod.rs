pub mod activity_service;
pub mod box_service;
pub mod data_service;
pub mod feedback_service;
pub mod subscription_service;
pub mod user_service;
pub mod write_support;
