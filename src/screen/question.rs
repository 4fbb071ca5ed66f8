//! Third nesting level: questions of one lesson, with their answers edited
//! inline, plus the bulk-create editor.

use crate::api::ApiGateway;
use crate::model::entity::{
    AnswerPayload, Question, QuestionPayload, QuestionUpdatePayload,
};
use crate::notice::Notices;

use super::bulk::BulkQuestionEditor;
use super::form::{FieldErrors, FormMode};
use super::nested::NestedList;

pub const QUESTION_PAGE_SIZE: u32 = 10;

pub const MSG_QUESTION_CONTENT_REQUIRED: &str = "Nội dung câu hỏi không được để trống";
pub const MSG_ANSWER_REQUIRED: &str = "Cần ít nhất 1 câu trả lời";
pub const MSG_CORRECT_ANSWER_REQUIRED: &str = "Cần ít nhất 1 câu trả lời đúng";
pub const MSG_CHECK_INPUT: &str = "Vui lòng kiểm tra lại thông tin";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerDraft {
    pub content: String,
    pub is_correct: bool,
}

/// One question being authored, answers included. Used by the single form
/// and by every row of the bulk editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub content: String,
    pub answers: Vec<AnswerDraft>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            content: String::new(),
            answers: vec![AnswerDraft::default()],
        }
    }
}

impl QuestionDraft {
    pub fn from_entity(question: &Question) -> Self {
        Self {
            content: question.content().to_string(),
            answers: question
                .answers()
                .iter()
                .map(|a| AnswerDraft {
                    content: a.content().to_string(),
                    is_correct: a.is_correct(),
                })
                .collect(),
        }
    }

    /// First failing rule, in the order the user sees them: content, then
    /// answer count, then correctness. Answers whose content is blank do not
    /// count for either answer rule.
    pub fn first_violation(&self) -> Option<&'static str> {
        if self.content.trim().is_empty() {
            return Some(MSG_QUESTION_CONTENT_REQUIRED);
        }
        let non_empty = || self.answers.iter().filter(|a| !a.content.trim().is_empty());
        if non_empty().count() < 1 {
            return Some(MSG_ANSWER_REQUIRED);
        }
        if !non_empty().any(|a| a.is_correct) {
            return Some(MSG_CORRECT_ANSWER_REQUIRED);
        }
        None
    }

    /// Wire payload: empty answers stripped, everything trimmed, the parent
    /// lesson attached.
    pub fn payload(&self, lesson_id: &str) -> QuestionPayload {
        QuestionPayload {
            content: self.content.trim().to_string(),
            lesson_id: lesson_id.to_string(),
            answers: self
                .answers
                .iter()
                .filter(|a| !a.content.trim().is_empty())
                .map(|a| AnswerPayload {
                    content: a.content.trim().to_string(),
                    is_correct: a.is_correct,
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct QuestionForm {
    open: bool,
    mode: FormMode,
    draft: QuestionDraft,
    errors: FieldErrors,
}

impl QuestionForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: QuestionDraft::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn open_create(&mut self) {
        self.draft = QuestionDraft::default();
        self.errors = FieldErrors::default();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, question: &Question) {
        self.draft = QuestionDraft::from_entity(question);
        self.errors = FieldErrors::default();
        self.mode = FormMode::Edit {
            target_id: question.question_id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = QuestionDraft::default();
        self.errors = FieldErrors::default();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
        self.errors.clear("content");
    }

    pub fn add_answer(&mut self) {
        self.draft.answers.push(AnswerDraft::default());
    }

    pub fn remove_answer(&mut self, index: usize, notices: &Notices) {
        if self.draft.answers.len() <= 1 {
            notices.error(MSG_ANSWER_REQUIRED);
            return;
        }
        if index < self.draft.answers.len() {
            self.draft.answers.remove(index);
        }
    }

    pub fn set_answer_content(&mut self, index: usize, content: impl Into<String>) {
        if let Some(answer) = self.draft.answers.get_mut(index) {
            answer.content = content.into();
        }
    }

    pub fn set_answer_correct(&mut self, index: usize, is_correct: bool) {
        if let Some(answer) = self.draft.answers.get_mut(index) {
            answer.is_correct = is_correct;
        }
    }

    /// Field-level validation. Both answer rules run; when both fail the
    /// correctness message is the one left on the field.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();
        if self.draft.content.trim().is_empty() {
            errors.set("content", MSG_QUESTION_CONTENT_REQUIRED);
        }

        let non_empty = self
            .draft
            .answers
            .iter()
            .filter(|a| !a.content.trim().is_empty());
        if non_empty.clone().count() < 1 {
            errors.set("answers", MSG_ANSWER_REQUIRED);
        }
        if !non_empty.clone().any(|a| a.is_correct) {
            errors.set("answers", MSG_CORRECT_ANSWER_REQUIRED);
        }

        self.errors = errors;
        self.errors.is_clean()
    }
}

#[derive(Debug)]
pub struct QuestionPanel {
    list: NestedList<Question>,
    form: QuestionForm,
    bulk: BulkQuestionEditor,
    pending_delete: Option<String>,
}

impl QuestionPanel {
    pub fn new() -> Self {
        Self {
            list: NestedList::new(QUESTION_PAGE_SIZE),
            form: QuestionForm::new(),
            bulk: BulkQuestionEditor::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &NestedList<Question> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut NestedList<Question> {
        &mut self.list
    }

    pub fn form(&self) -> &QuestionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuestionForm {
        &mut self.form
    }

    pub fn bulk(&self) -> &BulkQuestionEditor {
        &self.bulk
    }

    pub fn bulk_mut(&mut self) -> &mut BulkQuestionEditor {
        &mut self.bulk
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Open the panel for one lesson's questions.
    pub async fn open<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        lesson_id: &str,
    ) -> bool {
        let path = format!("/lessons/{lesson_id}/questions");
        self.list.open(api, notices, lesson_id, path).await
    }

    pub fn close(&mut self) {
        self.list.close();
        self.form.close();
        self.bulk.close();
        self.pending_delete = None;
    }

    pub async fn submit_form<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        if !self.form.validate() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }
        let Some(lesson_id) = self.list.parent_id().map(str::to_string) else {
            return false;
        };

        match self.form.mode.clone() {
            FormMode::Create => {
                // the endpoint takes an array even for a single question
                let payload = vec![self.form.draft.payload(&lesson_id)];
                match api
                    .create::<_, serde_json::Value>("/questions", &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Tạo question thành công"));
                        self.form.close();
                        self.list.reload_first(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Tạo question thất bại"));
                        }
                        false
                    }
                }
            }
            FormMode::Edit { target_id } => {
                let draft = self.form.draft.payload(&lesson_id);
                let payload = QuestionUpdatePayload {
                    question_id: target_id.clone(),
                    content: draft.content,
                    lesson_id: draft.lesson_id,
                    answers: draft.answers,
                };
                match api
                    .replace::<_, serde_json::Value>(&format!("/questions/{target_id}"), &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật question thành công"));
                        self.form.close();
                        self.list.refresh(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Cập nhật question thất bại"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, question_id: impl Into<String>) {
        self.pending_delete = Some(question_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending question. The list is re-fetched no matter what
    /// the server said, so the panel shows true server state.
    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(question_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/questions/{question_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa question thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Question đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa question, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }

    /// Submit the bulk editor against this panel's lesson and reload the
    /// question list if the batch went through.
    pub async fn submit_bulk<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(lesson_id) = self.list.parent_id().map(str::to_string) else {
            return false;
        };
        if self.bulk.submit(api, notices, &lesson_id).await {
            self.list.reload_first(api, notices).await;
            return true;
        }
        false
    }
}

impl Default for QuestionPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn draft(content: &str, answers: &[(&str, bool)]) -> QuestionDraft {
        QuestionDraft {
            content: content.to_string(),
            answers: answers
                .iter()
                .map(|(c, ok)| AnswerDraft {
                    content: c.to_string(),
                    is_correct: *ok,
                })
                .collect(),
        }
    }

    #[test]
    fn violation_order_is_content_then_count_then_correctness() {
        assert_eq!(
            draft("", &[("A", true)]).first_violation(),
            Some(MSG_QUESTION_CONTENT_REQUIRED)
        );
        assert_eq!(
            draft("Q", &[("", true)]).first_violation(),
            Some(MSG_ANSWER_REQUIRED)
        );
        assert_eq!(
            draft("Q", &[("A", false)]).first_violation(),
            Some(MSG_CORRECT_ANSWER_REQUIRED)
        );
        assert_eq!(draft("Q", &[("A", true), ("", false)]).first_violation(), None);
    }

    #[test]
    fn blank_correct_answers_do_not_count() {
        // the only "correct" answer has no content
        let d = draft("Q", &[("", true), ("A", false)]);
        assert_eq!(d.first_violation(), Some(MSG_CORRECT_ANSWER_REQUIRED));
    }

    #[test]
    fn payload_strips_empty_answers_and_trims() {
        let d = draft(" Q1 ", &[(" A ", true), ("", false), ("B", false)]);
        let p = d.payload("lesson-9");
        assert_eq!(p.content, "Q1");
        assert_eq!(p.lesson_id, "lesson-9");
        assert_eq!(p.answers.len(), 2);
        assert_eq!(p.answers[0].content, "A");
        assert!(p.answers[0].is_correct);
    }

    #[test]
    fn form_correctness_message_wins_when_both_answer_rules_fail() {
        let mut form = QuestionForm::new();
        form.open_create();
        form.set_content("Q");
        // single empty answer: zero usable answers, zero correct ones
        assert!(!form.validate());
        assert_eq!(form.errors().get("answers"), MSG_CORRECT_ANSWER_REQUIRED);
        assert_eq!(form.errors().get("content"), "");
    }

    #[test]
    fn removing_the_last_answer_is_refused() {
        let notices = Notices::new();
        let mut form = QuestionForm::new();
        form.open_create();
        form.remove_answer(0, &notices);
        assert_eq!(form.draft().answers.len(), 1);
        assert_eq!(notices.last().unwrap().text, MSG_ANSWER_REQUIRED);
    }
}
