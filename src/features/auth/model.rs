use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity attached to a request by the identity middleware
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub roles: Vec<String>,
}
