pub mod activity_repository;
pub mod box_repository;
pub mod document_repository;
pub mod feedback_repository;
pub mod subscription_repository;
pub mod user_repository;
