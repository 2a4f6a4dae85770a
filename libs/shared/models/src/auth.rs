use serde::{Deserialize, Serialize};

/// Claims carried in the backend's access token. The guardian account id
/// lives in `user_id` and is the only identity the client ever submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
    pub email: Option<String>,
}
