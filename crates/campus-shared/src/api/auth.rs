use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returned by the development login after the session and CSRF cookies
/// have been set.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevLoginResponse {
    pub user_id: Uuid,
    pub csrf_token: String,
}
