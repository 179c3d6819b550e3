use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    pub status: String,
}
