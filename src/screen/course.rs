//! Course management: the top-level paginated list, the multipart course
//! form, and the lesson/question drill-down hanging off it.

use crate::api::{ApiGateway, FormPayload, Reply};
use crate::model::entity::{Course, CourseLanguage};
use crate::notice::Notices;

use super::form::{FieldErrors, FormMode, ImageUpload, NumberCheck, check_non_negative};
use super::lesson::LessonPanel;
use super::list::{FilterSet, ListController};
use super::question::MSG_CHECK_INPUT;

pub const COURSE_PAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub title: String,
}

impl FilterSet for CourseFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Vec::new();
        }
        vec![("Title", title.to_string())]
    }
}

/// Course form fields as typed. Price and coin stay strings until validation
/// so a stray keystroke is a field error, not a panic or silent zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub coin: String,
    pub course_language_id: String,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0".to_string(),
            coin: "0".to_string(),
            course_language_id: String::new(),
        }
    }
}

impl CourseDraft {
    /// A course is paid in money or in coins, never both: at most one of the
    /// two may be positive, and both zero is a valid free course.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.set("title", "Tên khóa học không được để trống");
        } else if title.chars().count() < 3 {
            errors.set("title", "Tên khóa học phải có ít nhất 3 ký tự");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.set("description", "Mô tả không được để trống");
        } else if description.chars().count() < 10 {
            errors.set("description", "Mô tả phải có ít nhất 10 ký tự");
        }

        if self.course_language_id.trim().is_empty() {
            errors.set("courseLanguageId", "Vui lòng chọn ngôn ngữ khóa học");
        }

        let price = check_non_negative(&self.price);
        match price {
            NumberCheck::NotANumber => errors.set("price", "Giá phải là số"),
            NumberCheck::Negative => errors.set("price", "Giá không được âm"),
            NumberCheck::Valid(_) => {}
        }

        let coin = check_non_negative(&self.coin);
        match coin {
            NumberCheck::NotANumber => errors.set("coin", "Coin phải là số"),
            NumberCheck::Negative => errors.set("coin", "Coin không được âm"),
            NumberCheck::Valid(_) => {}
        }

        if let (NumberCheck::Valid(p), NumberCheck::Valid(c)) = (price, coin) {
            if p > 0.0 && c > 0.0 {
                errors.set("price", "Chỉ được chọn 1 trong 2: Giá hoặc Coin");
                errors.set("coin", "Chỉ được chọn 1 trong 2: Giá hoặc Coin");
            }
        }

        errors
    }
}

#[derive(Debug)]
pub struct CourseForm {
    open: bool,
    mode: FormMode,
    draft: CourseDraft,
    errors: FieldErrors,
    image: Option<ImageUpload>,
    // existing image shown while editing; the server keeps it if no new file
    // is uploaded
    image_preview: String,
}

impl CourseForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: CourseDraft::default(),
            errors: FieldErrors::default(),
            image: None,
            image_preview: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn image_preview(&self) -> &str {
        &self.image_preview
    }

    pub fn open_create(&mut self) {
        self.draft = CourseDraft::default();
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview.clear();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, course: &Course) {
        self.draft = CourseDraft {
            title: course.title().to_string(),
            description: course.description().to_string(),
            price: course.price().to_string(),
            coin: course.coin().to_string(),
            course_language_id: course.course_language_id().unwrap_or("").to_string(),
        };
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview = course.image_url().to_string();
        self.mode = FormMode::Edit {
            target_id: course.course_id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = CourseDraft::default();
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview.clear();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.errors.clear("title");
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.clear("description");
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
        self.errors.clear("price");
    }

    pub fn set_coin(&mut self, coin: impl Into<String>) {
        self.draft.coin = coin.into();
        self.errors.clear("coin");
    }

    pub fn set_course_language_id(&mut self, id: impl Into<String>) {
        self.draft.course_language_id = id.into();
        self.errors.clear("courseLanguageId");
    }

    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_clean()
    }

    /// The multipart body. Price/coin are sent as the parsed values, so
    /// "0250" goes out as "250".
    fn payload(&self) -> FormPayload {
        let price = match check_non_negative(&self.draft.price) {
            NumberCheck::Valid(p) => p,
            _ => 0.0,
        };
        let coin = match check_non_negative(&self.draft.coin) {
            NumberCheck::Valid(c) => c,
            _ => 0.0,
        };

        let mut payload = FormPayload::new()
            .text("Title", self.draft.title.trim())
            .text("Description", self.draft.description.trim())
            .text("Price", price.to_string())
            .text("Coin", coin.to_string())
            .text("CourseLanguageId", self.draft.course_language_id.clone());

        if let Some(image) = &self.image {
            payload = payload.file(
                "Image",
                image.file_name.clone(),
                image.mime.clone(),
                image.bytes.clone(),
            );
        }
        payload
    }
}

#[derive(Debug)]
pub struct CourseScreen {
    list: ListController<Course, CourseFilter>,
    form: CourseForm,
    languages: Vec<CourseLanguage>,
    loading_languages: bool,
    lessons: LessonPanel,
    pending_delete: Option<String>,
}

impl CourseScreen {
    pub fn new() -> Self {
        Self {
            list: ListController::new("/courses", COURSE_PAGE_SIZE),
            form: CourseForm::new(),
            languages: Vec::new(),
            loading_languages: false,
            lessons: LessonPanel::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListController<Course, CourseFilter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Course, CourseFilter> {
        &mut self.list
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CourseForm {
        &mut self.form
    }

    pub fn languages(&self) -> &[CourseLanguage] {
        &self.languages
    }

    pub fn lessons(&self) -> &LessonPanel {
        &self.lessons
    }

    pub fn lessons_mut(&mut self) -> &mut LessonPanel {
        &mut self.lessons
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub async fn load<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.list.load(api, notices, 1).await
    }

    /// The language dropdown's options; loaded whenever the form opens.
    pub async fn load_languages<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.loading_languages = true;
        let outcome = api
            .fetch::<Vec<CourseLanguage>>("/course-languages", &[])
            .await;
        self.loading_languages = false;

        match outcome.and_then(Reply::require_data) {
            Ok(languages) => {
                self.languages = languages;
                true
            }
            Err(e) => {
                self.languages.clear();
                if !e.is_unauthorized() {
                    notices.error(e.user_message_or("Không thể tải danh sách ngôn ngữ"));
                }
                false
            }
        }
    }

    pub async fn open_create<G: ApiGateway>(&mut self, api: &G, notices: &Notices) {
        self.form.open_create();
        self.load_languages(api, notices).await;
    }

    pub async fn open_edit<G: ApiGateway>(&mut self, api: &G, notices: &Notices, course: &Course) {
        self.form.open_edit(course);
        self.load_languages(api, notices).await;
    }

    pub async fn submit_form<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        if !self.form.validate() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }

        let payload = self.form.payload();
        match self.form.mode.clone() {
            FormMode::Create => match api.create_form("/courses", payload).await {
                Ok(reply) => {
                    notices.success(reply.message_or("Thêm khóa học thành công"));
                    self.form.close();
                    self.list.reload_first(api, notices).await;
                    true
                }
                Err(e) => {
                    if !e.is_unauthorized() {
                        notices.error(e.user_message_or("Không thể thêm khóa học"));
                    }
                    false
                }
            },
            FormMode::Edit { target_id } => {
                match api
                    .replace_form(&format!("/courses/{target_id}"), payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật khóa học thành công"));
                        self.form.close();
                        self.list.reload_current(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể cập nhật khóa học"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, course_id: impl Into<String>) {
        self.pending_delete = Some(course_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(course_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/courses/{course_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa khóa học thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Khóa học đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa khóa học, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }

    /// Drill into a course's lessons. The course list keeps its page and
    /// filters untouched.
    pub async fn view_lessons<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        course: &Course,
    ) -> bool {
        self.lessons.open(api, notices, course.course_id()).await
    }
}

impl Default for CourseScreen {
    fn default() -> Self {
        Self::new()
    }
}
