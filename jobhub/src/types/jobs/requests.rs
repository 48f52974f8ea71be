use serde::{Deserialize, Serialize};

/// Body of `POST /job/owner/create`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub pay_amount: f64,
    pub time_to_complete_seconds: u64,
    pub expiry_seconds: u64,
}

/// Body of `PUT /job/owner/update/{jobId}`. The category cannot change after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub name: String,
    pub description: String,
    pub pay_amount: f64,
    pub time_to_complete_seconds: u64,
    pub expiry_seconds: u64,
}

/// Body of approve and reject, and the optional body of submit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

/// `{message}` acknowledgement returned by the transition endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
