use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    #[serde(default)]
    item_revenue: f64,
    #[serde(default)]
    course_revenue: f64,
    #[serde(default)]
    premium_revenue: f64,
    #[serde(default)]
    total_revenue: f64,
}

impl Revenue {
    pub fn item_revenue(&self) -> f64 {
        self.item_revenue
    }

    pub fn course_revenue(&self) -> f64 {
        self.course_revenue
    }

    pub fn premium_revenue(&self) -> f64 {
        self.premium_revenue
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }
}
