use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    course_id: String,
    title: String,
    description: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    coin: f64,
    #[serde(default)]
    is_active: bool,
    course_language_id: Option<String>,
    course_language_name: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl Course {
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn coin(&self) -> f64 {
        self.coin
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn course_language_id(&self) -> Option<&str> {
        self.course_language_id.as_deref()
    }

    pub fn course_language_name(&self) -> Option<&str> {
        self.course_language_name.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLanguage {
    id: String,
    name: String,
    #[serde(default)]
    is_active: bool,
}

impl CourseLanguage {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
