use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message_id: String,
    pub status: String,
}
