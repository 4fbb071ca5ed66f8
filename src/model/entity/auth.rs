use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    token: String,
    #[serde(default)]
    expired_in: i64,
}

impl LoginData {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expired_in(&self) -> i64 {
        self.expired_in
    }
}
