//! Bulk question authoring: N draft questions, each with its own answers,
//! validated as an ordered batch and submitted as one request the server
//! accepts or rejects whole.

use crate::api::ApiGateway;
use crate::model::entity::QuestionPayload;
use crate::notice::Notices;

use super::question::{AnswerDraft, MSG_ANSWER_REQUIRED, MSG_CHECK_INPUT, QuestionDraft};

pub const MSG_QUESTION_FLOOR: &str = "Cần ít nhất 1 question";

#[derive(Debug)]
pub struct BulkQuestionEditor {
    open: bool,
    drafts: Vec<QuestionDraft>,
    // single surfaced message; empty = no error
    error: String,
}

impl BulkQuestionEditor {
    pub fn new() -> Self {
        Self {
            open: false,
            drafts: vec![QuestionDraft::default()],
            error: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn drafts(&self) -> &[QuestionDraft] {
        &self.drafts
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    /// Open with exactly one empty draft holding one empty answer.
    pub fn open(&mut self) {
        self.drafts = vec![QuestionDraft::default()];
        self.error.clear();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.drafts = vec![QuestionDraft::default()];
        self.error.clear();
        self.open = false;
    }

    pub fn add_question(&mut self) {
        self.drafts.push(QuestionDraft::default());
    }

    /// Refused (with a notice) when it would leave zero drafts.
    pub fn remove_question(&mut self, index: usize, notices: &Notices) {
        if self.drafts.len() <= 1 {
            notices.error(MSG_QUESTION_FLOOR);
            return;
        }
        if index < self.drafts.len() {
            self.drafts.remove(index);
        }
    }

    pub fn add_answer(&mut self, question: usize) {
        if let Some(draft) = self.drafts.get_mut(question) {
            draft.answers.push(AnswerDraft::default());
        }
    }

    /// Refused (with a notice) when it would leave an answer-less question.
    pub fn remove_answer(&mut self, question: usize, answer: usize, notices: &Notices) {
        let Some(draft) = self.drafts.get_mut(question) else {
            return;
        };
        if draft.answers.len() <= 1 {
            notices.error(MSG_ANSWER_REQUIRED);
            return;
        }
        if answer < draft.answers.len() {
            draft.answers.remove(answer);
        }
    }

    pub fn set_question_content(&mut self, question: usize, content: impl Into<String>) {
        if let Some(draft) = self.drafts.get_mut(question) {
            draft.content = content.into();
        }
    }

    pub fn set_answer_content(&mut self, question: usize, answer: usize, content: impl Into<String>) {
        if let Some(a) = self
            .drafts
            .get_mut(question)
            .and_then(|d| d.answers.get_mut(answer))
        {
            a.content = content.into();
        }
    }

    pub fn set_answer_correct(&mut self, question: usize, answer: usize, is_correct: bool) {
        if let Some(a) = self
            .drafts
            .get_mut(question)
            .and_then(|d| d.answers.get_mut(answer))
        {
            a.is_correct = is_correct;
        }
    }

    /// Drafts are checked in order and the first failure wins; later drafts
    /// are not inspected at all, so the user always sees the earliest
    /// problem. The message carries the 1-based draft position.
    pub fn validate_all(&mut self) -> bool {
        for (index, draft) in self.drafts.iter().enumerate() {
            if let Some(reason) = draft.first_violation() {
                self.error = format!("Question {}: {}", index + 1, reason);
                return false;
            }
        }
        self.error.clear();
        true
    }

    /// Validate, then send every draft (empty answers stripped, the parent
    /// lesson attached) as one batch. The outcome is atomic: success closes
    /// the editor, failure keeps every draft for correction.
    pub async fn submit<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        lesson_id: &str,
    ) -> bool {
        if !self.validate_all() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }

        let payload: Vec<QuestionPayload> =
            self.drafts.iter().map(|d| d.payload(lesson_id)).collect();
        let count = payload.len();

        match api
            .create::<_, serde_json::Value>("/questions", &payload)
            .await
        {
            Ok(_) => {
                notices.success(format!("Tạo {count} questions thành công"));
                self.close();
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.error(e.user_message_or("Tạo questions thất bại"));
                }
                false
            }
        }
    }
}

impl Default for BulkQuestionEditor {
    fn default() -> Self {
        Self::new()
    }
}
