//! Level range management: experience brackets for the leveling system.

use crate::api::ApiGateway;
use crate::model::entity::{LevelRange, LevelRangePayload};
use crate::notice::Notices;

use super::form::{FieldErrors, FormMode};
use super::list::{FilterSet, ListController};
use super::question::MSG_CHECK_INPUT;

pub const LEVEL_RANGE_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelRangeFilter {
    pub name: String,
}

impl FilterSet for LevelRangeFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        vec![("Name", name.to_string())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRangeDraft {
    pub name: String,
    pub from_exp: String,
    pub to_exp: String,
}

impl Default for LevelRangeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            from_exp: "0".to_string(),
            to_exp: "0".to_string(),
        }
    }
}

fn parse_exp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

impl LevelRangeDraft {
    /// Both `toExp` rules run: positivity first, then the comparison against
    /// `fromExp`, which overwrites the field's message when it fails too.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.set("name", "Tên level range không được để trống");
        }

        let from = parse_exp(&self.from_exp);
        match from {
            None => errors.set("fromExp", "From EXP phải >= 0"),
            Some(f) if f < 0 => errors.set("fromExp", "From EXP phải >= 0"),
            Some(_) => {}
        }

        match parse_exp(&self.to_exp) {
            None => errors.set("toExp", "To EXP phải lớn hơn 0"),
            Some(t) => {
                if t <= 0 {
                    errors.set("toExp", "To EXP phải lớn hơn 0");
                }
                if let Some(f) = from {
                    if t <= f {
                        errors.set("toExp", "To EXP phải lớn hơn From EXP");
                    }
                }
            }
        }

        errors
    }

    fn payload(&self) -> LevelRangePayload {
        LevelRangePayload {
            name: self.name.trim().to_string(),
            from_exp: parse_exp(&self.from_exp).unwrap_or(0),
            to_exp: parse_exp(&self.to_exp).unwrap_or(0),
        }
    }
}

#[derive(Debug)]
pub struct LevelRangeForm {
    open: bool,
    mode: FormMode,
    draft: LevelRangeDraft,
    errors: FieldErrors,
}

impl LevelRangeForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: LevelRangeDraft::default(),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &LevelRangeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn open_create(&mut self) {
        self.draft = LevelRangeDraft::default();
        self.errors = FieldErrors::default();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, range: &LevelRange) {
        self.draft = LevelRangeDraft {
            name: range.name().to_string(),
            from_exp: range.from_exp().to_string(),
            to_exp: range.to_exp().to_string(),
        };
        self.errors = FieldErrors::default();
        self.mode = FormMode::Edit {
            target_id: range.id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = LevelRangeDraft::default();
        self.errors = FieldErrors::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.clear("name");
    }

    pub fn set_from_exp(&mut self, from_exp: impl Into<String>) {
        self.draft.from_exp = from_exp.into();
        self.errors.clear("fromExp");
    }

    pub fn set_to_exp(&mut self, to_exp: impl Into<String>) {
        self.draft.to_exp = to_exp.into();
        self.errors.clear("toExp");
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_clean()
    }
}

#[derive(Debug)]
pub struct LevelRangeScreen {
    list: ListController<LevelRange, LevelRangeFilter>,
    form: LevelRangeForm,
    pending_delete: Option<String>,
}

impl LevelRangeScreen {
    pub fn new() -> Self {
        Self {
            list: ListController::new("/level-ranges", LEVEL_RANGE_PAGE_SIZE),
            form: LevelRangeForm::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListController<LevelRange, LevelRangeFilter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<LevelRange, LevelRangeFilter> {
        &mut self.list
    }

    pub fn form(&self) -> &LevelRangeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LevelRangeForm {
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

        let payload = self.form.draft.payload();
        match self.form.mode.clone() {
            FormMode::Create => {
                match api
                    .create::<_, serde_json::Value>("/level-ranges", &payload)
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Thêm level range thành công"));
                        self.form.close();
                        self.list.reload_first(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể thêm level range"));
                        }
                        false
                    }
                }
            }
            FormMode::Edit { target_id } => {
                match api
                    .replace::<_, serde_json::Value>(
                        &format!("/level-ranges/{target_id}"),
                        &payload,
                    )
                    .await
                {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật level range thành công"));
                        self.form.close();
                        self.list.reload_current(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể cập nhật level range"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, range_id: impl Into<String>) {
        self.pending_delete = Some(range_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(range_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/level-ranges/{range_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa level range thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Level range đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa level range, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }
}

impl Default for LevelRangeScreen {
    fn default() -> Self {
        Self::new()
    }
}
