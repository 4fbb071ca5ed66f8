use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    answer_id: String,
    content: String,
    #[serde(default)]
    is_correct: bool,
}

impl Answer {
    pub fn answer_id(&self) -> &str {
        &self.answer_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    question_id: String,
    content: String,
    lesson_id: String,
    lesson_title: Option<String>,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    answers: Vec<Answer>,
}

impl Question {
    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn lesson_title(&self) -> Option<&str> {
        self.lesson_title.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub content: String,
    pub is_correct: bool,
}

/// One element of the array `POST /questions` accepts (the endpoint takes an
/// array even when creating a single question).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub content: String,
    pub lesson_id: String,
    pub answers: Vec<AnswerPayload>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdatePayload {
    pub question_id: String,
    pub content: String,
    pub lesson_id: String,
    pub answers: Vec<AnswerPayload>,
}
