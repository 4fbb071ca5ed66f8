//! Second nesting level: the lessons of one course. Owns its own scoped
//! list, its own form, and the questions panel below it.

use crate::api::ApiGateway;
use crate::model::entity::{Lesson, LessonCreatePayload, LessonUpdatePayload};
use crate::notice::Notices;

use super::form::{FieldErrors, FormMode};
use super::nested::NestedList;
use super::question::{MSG_CHECK_INPUT, QuestionPanel};

pub const LESSON_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
}

impl LessonDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.set("title", "Tên bài học không được để trống");
        } else if title.chars().count() < 3 {
            errors.set("title", "Tên bài học phải có ít nhất 3 ký tự");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.set("description", "Mô tả không được để trống");
        } else if description.chars().count() < 10 {
            errors.set("description", "Mô tả phải có ít nhất 10 ký tự");
        }

        errors
    }
}

#[derive(Debug)]
pub struct LessonForm {
    open: bool,
    mode: FormMode,
    draft: LessonDraft,
    errors: FieldErrors,
}

impl LessonForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: LessonDraft::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &LessonDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn open_create(&mut self) {
        self.draft = LessonDraft::default();
        self.errors = FieldErrors::default();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, lesson: &Lesson) {
        self.draft = LessonDraft {
            title: lesson.title().to_string(),
            description: lesson.description().to_string(),
        };
        self.errors = FieldErrors::default();
        self.mode = FormMode::Edit {
            target_id: lesson.lesson_id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = LessonDraft::default();
        self.errors = FieldErrors::default();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.errors.clear("title");
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.clear("description");
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_clean()
    }
}

#[derive(Debug)]
pub struct LessonPanel {
    list: NestedList<Lesson>,
    form: LessonForm,
    questions: QuestionPanel,
    pending_delete: Option<String>,
}

impl LessonPanel {
    pub fn new() -> Self {
        Self {
            list: NestedList::new(LESSON_PAGE_SIZE),
            form: LessonForm::new(),
            questions: QuestionPanel::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &NestedList<Lesson> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut NestedList<Lesson> {
        &mut self.list
    }

    pub fn form(&self) -> &LessonForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LessonForm {
        &mut self.form
    }

    pub fn questions(&self) -> &QuestionPanel {
        &self.questions
    }

    pub fn questions_mut(&mut self) -> &mut QuestionPanel {
        &mut self.questions
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Open the panel for one course's lessons.
    pub async fn open<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        course_id: &str,
    ) -> bool {
        let path = format!("/courses/{course_id}/lessons");
        self.list.open(api, notices, course_id, path).await
    }

    /// Close this level and everything below it; the course list is not
    /// touched.
    pub fn close(&mut self) {
        self.questions.close();
        self.form.close();
        self.list.close();
        self.pending_delete = None;
    }

    pub async fn submit_form<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        if !self.form.validate() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }
        let Some(course_id) = self.list.parent_id().map(str::to_string) else {
            return false;
        };

        let title = self.form.draft.title.trim().to_string();
        let description = self.form.draft.description.trim().to_string();

        match self.form.mode.clone() {
            FormMode::Create => {
                let payload = LessonCreatePayload {
                    course_id,
                    title,
                    description,
                };
                match api.create::<_, serde_json::Value>("/lessons", &payload).await {
                    Ok(reply) => {
                        notices.success(reply.message_or("Thêm bài học thành công"));
                        self.form.close();
                        self.list.reload_first(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể thêm bài học"));
                        }
                        false
                    }
                }
            }
            FormMode::Edit { target_id } => {
                let payload = LessonUpdatePayload { title, description };
                match api
                    .replace::<_, serde_json::Value>(&format!("/lessons/{target_id}"), &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật bài học thành công"));
                        self.form.close();
                        self.list.refresh(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể cập nhật bài học"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, lesson_id: impl Into<String>) {
        self.pending_delete = Some(lesson_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending lesson. The scoped list is always re-fetched so the
    /// panel reflects true server state, whatever the envelope said.
    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(lesson_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/lessons/{lesson_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa bài học thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Bài học đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa bài học, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }

    pub async fn view_questions<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        lesson: &Lesson,
    ) -> bool {
        self.questions.open(api, notices, lesson.lesson_id()).await
    }
}

impl Default for LessonPanel {
    fn default() -> Self {
        Self::new()
    }
}
