use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRange {
    id: String,
    name: String,
    from_exp: i64,
    to_exp: i64,
    #[serde(default)]
    is_active: bool,
    created_at: Option<String>,
}

impl LevelRange {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_exp(&self) -> i64 {
        self.from_exp
    }

    pub fn to_exp(&self) -> i64 {
        self.to_exp
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRangePayload {
    pub name: String,
    pub from_exp: i64,
    pub to_exp: i64,
}
