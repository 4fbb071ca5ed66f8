//! Category management: flat list plus a one-field form.

use crate::api::ApiGateway;
use crate::model::entity::{Category, CategoryPayload};
use crate::notice::Notices;

use super::form::{FieldErrors, FormMode};
use super::list::{FilterSet, ListController};
use super::question::MSG_CHECK_INPUT;

pub const CATEGORY_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub name: String,
}

impl FilterSet for CategoryFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        vec![("Name", name.to_string())]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();
        if name.is_empty() {
            errors.set("name", "Tên danh mục là bắt buộc");
        } else if name.chars().count() < 2 {
            errors.set("name", "Tên danh mục phải có ít nhất 2 ký tự");
        } else if name.chars().count() > 100 {
            errors.set("name", "Tên danh mục không được vượt quá 100 ký tự");
        }
        errors
    }
}

#[derive(Debug)]
pub struct CategoryForm {
    open: bool,
    mode: FormMode,
    draft: CategoryDraft,
    errors: FieldErrors,
}

impl CategoryForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: CategoryDraft::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &CategoryDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn open_create(&mut self) {
        self.draft = CategoryDraft::default();
        self.errors = FieldErrors::default();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, category: &Category) {
        self.draft = CategoryDraft {
            name: category.name().to_string(),
        };
        self.errors = FieldErrors::default();
        self.mode = FormMode::Edit {
            target_id: category.id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = CategoryDraft::default();
        self.errors = FieldErrors::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.clear("name");
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_clean()
    }
}

#[derive(Debug)]
pub struct CategoryScreen {
    list: ListController<Category, CategoryFilter>,
    form: CategoryForm,
    pending_delete: Option<String>,
}

impl CategoryScreen {
    pub fn new() -> Self {
        Self {
            list: ListController::new("/categories", CATEGORY_PAGE_SIZE),
            form: CategoryForm::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListController<Category, CategoryFilter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Category, CategoryFilter> {
        &mut self.list
    }

    pub fn form(&self) -> &CategoryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CategoryForm {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub async fn load<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.list.load(api, notices, 1).await
    }

    pub async fn submit_form<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        if !self.form.validate() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }

        let payload = CategoryPayload {
            name: self.form.draft.name.trim().to_string(),
        };

        match self.form.mode.clone() {
            FormMode::Create => {
                match api
                    .create::<_, serde_json::Value>("/categories", &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Thêm danh mục thành công"));
                        self.form.close();
                        self.list.reload_first(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể thêm danh mục"));
                        }
                        false
                    }
                }
            }
            FormMode::Edit { target_id } => {
                match api
                    .replace::<_, serde_json::Value>(&format!("/categories/{target_id}"), &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật danh mục thành công"));
                        self.form.close();
                        self.list.reload_current(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể cập nhật danh mục"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, category_id: impl Into<String>) {
        self.pending_delete = Some(category_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(category_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/categories/{category_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa danh mục thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Danh mục đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa danh mục, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }
}

impl Default for CategoryScreen {
    fn default() -> Self {
        Self::new()
    }
}
