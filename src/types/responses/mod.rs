pub mod api_response;
pub mod write_outcome;
