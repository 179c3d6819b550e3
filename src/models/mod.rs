pub mod activity_model;
pub mod box_model;
pub mod feedback_model;
pub mod subscription_model;
pub mod user_model;
