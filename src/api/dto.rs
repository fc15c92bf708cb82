use serde::Serialize;

/// Plain acknowledgement body, e.g. `{"message": "Job Seeker updated successfully"}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
