use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Request succeeded
    Success,
    /// Request was rejected because of the caller's input (4xx)
    Fail,
    /// Request failed on the server side (5xx)
    Error,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    /// Number of items in `data`, present on listing endpoints only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            results: None,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(status: ResponseStatus, message: String) -> ApiResponse<()> {
        ApiResponse {
            status,
            results: None,
            data: None,
            message: Some(message),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Listing envelope: `{status, results, data}`
    pub fn listing(items: Vec<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            results: Some(items.len()),
            data: Some(items),
            message: None,
        }
    }
}
