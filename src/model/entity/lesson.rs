use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    lesson_id: String,
    title: String,
    description: String,
    order_index: Option<i32>,
    course_id: Option<String>,
    #[serde(default)]
    is_active: bool,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl Lesson {
    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn order_index(&self) -> Option<i32> {
        self.order_index
    }

    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCreatePayload {
    pub course_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdatePayload {
    pub title: String,
    pub description: String,
}
