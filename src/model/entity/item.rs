use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    item_id: String,
    item_name: String,
    #[serde(default)]
    is_premium: bool,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    coin: f64,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_active: bool,
    category_id: String,
    category_name: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl Item {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> &str {
        &self.item_name
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn coin(&self) -> f64 {
        self.coin
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }
}
