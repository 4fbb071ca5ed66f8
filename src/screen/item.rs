//! Shop item management: list, multipart form, and the category dropdown the
//! form needs.

use crate::api::{ApiGateway, FormPayload};
use crate::model::entity::{Category, Item};
use crate::notice::Notices;

use super::form::{FieldErrors, FormMode, ImageUpload, NumberCheck, check_non_negative};
use super::list::{FilterSet, ListController};
use super::question::MSG_CHECK_INPUT;

pub const ITEM_PAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: String,
}

impl FilterSet for ItemFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        vec![("Name", name.to_string())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category_id: String,
    pub is_premium: bool,
    pub price: String,
    pub coin: String,
    pub description: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category_id: String::new(),
            is_premium: false,
            price: "0".to_string(),
            coin: "0".to_string(),
            description: String::new(),
        }
    }
}

impl ItemDraft {
    /// Price and coin only matter for premium items; a free item ignores
    /// whatever is left in those fields.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.set("name", "Tên item là bắt buộc");
        } else if name.chars().count() < 2 {
            errors.set("name", "Tên item phải có ít nhất 2 ký tự");
        }

        if self.category_id.trim().is_empty() {
            errors.set("categoryId", "Vui lòng chọn danh mục");
        }

        if self.is_premium {
            if !matches!(check_non_negative(&self.price), NumberCheck::Valid(_)) {
                errors.set("price", "Giá phải lớn hơn hoặc bằng 0");
            }
            if !matches!(check_non_negative(&self.coin), NumberCheck::Valid(_)) {
                errors.set("coin", "Coin phải lớn hơn hoặc bằng 0");
            }
        }

        if self.description.trim().is_empty() {
            errors.set("description", "Mô tả là bắt buộc");
        }

        errors
    }
}

#[derive(Debug)]
pub struct ItemForm {
    open: bool,
    mode: FormMode,
    draft: ItemDraft,
    errors: FieldErrors,
    image: Option<ImageUpload>,
    image_preview: String,
}

impl ItemForm {
    fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: ItemDraft::default(),
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

    pub fn draft(&self) -> &ItemDraft {
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
        self.draft = ItemDraft::default();
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview.clear();
        self.mode = FormMode::Create;
        self.open = true;
    }

    pub fn open_edit(&mut self, item: &Item) {
        self.draft = ItemDraft {
            name: item.name().to_string(),
            category_id: item.category_id().to_string(),
            is_premium: item.is_premium(),
            price: item.price().to_string(),
            coin: item.coin().to_string(),
            description: item.description().to_string(),
        };
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview = item.image_url().to_string();
        self.mode = FormMode::Edit {
            target_id: item.item_id().to_string(),
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = ItemDraft::default();
        self.errors = FieldErrors::default();
        self.image = None;
        self.image_preview.clear();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.clear("name");
    }

    pub fn set_category_id(&mut self, id: impl Into<String>) {
        self.draft.category_id = id.into();
        self.errors.clear("categoryId");
    }

    pub fn set_is_premium(&mut self, is_premium: bool) {
        self.draft.is_premium = is_premium;
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
        self.errors.clear("price");
    }

    pub fn set_coin(&mut self, coin: impl Into<String>) {
        self.draft.coin = coin.into();
        self.errors.clear("coin");
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.clear("description");
    }

    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_clean()
    }

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
            .text("Name", self.draft.name.trim())
            .text("CategoryId", self.draft.category_id.clone())
            .text("IsPremium", if self.draft.is_premium { "true" } else { "false" })
            .text("Price", price.to_string())
            .text("Coin", coin.to_string())
            .text("Description", self.draft.description.trim());

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
pub struct ItemScreen {
    list: ListController<Item, ItemFilter>,
    form: ItemForm,
    categories: Vec<Category>,
    pending_delete: Option<String>,
}

impl ItemScreen {
    pub fn new() -> Self {
        Self {
            list: ListController::new("/items", ITEM_PAGE_SIZE),
            form: ItemForm::new(),
            categories: Vec::new(),
            pending_delete: None,
        }
    }

    pub fn list(&self) -> &ListController<Item, ItemFilter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Item, ItemFilter> {
        &mut self.list
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub async fn load<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.list.load(api, notices, 1).await
    }

    /// Options for the form's category dropdown.
    pub async fn load_categories<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let query = [
            ("Page", "1".to_string()),
            ("PageSize", "100".to_string()),
        ];
        match api.fetch_page::<Category>("/categories", &query).await {
            Ok(page) => {
                self.categories = page.items;
                true
            }
            Err(e) => {
                self.categories.clear();
                if !e.is_unauthorized() {
                    notices.error(e.user_message_or("Không thể tải danh sách danh mục"));
                }
                false
            }
        }
    }

    pub async fn open_create<G: ApiGateway>(&mut self, api: &G, notices: &Notices) {
        self.form.open_create();
        self.load_categories(api, notices).await;
    }

    pub async fn open_edit<G: ApiGateway>(&mut self, api: &G, notices: &Notices, item: &Item) {
        self.form.open_edit(item);
        self.load_categories(api, notices).await;
    }

    pub async fn submit_form<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        if !self.form.validate() {
            notices.error(MSG_CHECK_INPUT);
            return false;
        }
        // the image is required on create only; an edit without a new file
        // keeps the one already stored
        if !self.form.mode.is_edit() && self.form.image.is_none() {
            notices.error("Vui lòng chọn hình ảnh");
            return false;
        }

        let payload = self.form.payload();
        match self.form.mode.clone() {
            FormMode::Create => match api.create_form("/items", payload).await {
                Ok(reply) => {
                    notices.success(reply.message_or("Thêm item thành công"));
                    self.form.close();
                    self.list.reload_first(api, notices).await;
                    true
                }
                Err(e) => {
                    if !e.is_unauthorized() {
                        notices.error(e.user_message_or("Không thể thêm item"));
                    }
                    false
                }
            },
            FormMode::Edit { target_id } => {
                match api.replace_form(&format!("/items/{target_id}"), payload).await {
                    Ok(reply) => {
                        notices.success(reply.message_or("Cập nhật item thành công"));
                        self.form.close();
                        self.list.reload_current(api, notices).await;
                        true
                    }
                    Err(e) => {
                        if !e.is_unauthorized() {
                            notices.error(e.user_message_or("Không thể cập nhật item"));
                        }
                        false
                    }
                }
            }
        }
    }

    pub fn request_delete(&mut self, item_id: impl Into<String>) {
        self.pending_delete = Some(item_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let Some(item_id) = self.pending_delete.take() else {
            return false;
        };

        let outcome = api.remove(&format!("/items/{item_id}")).await;
        self.list.reload_after_delete(api, notices).await;

        match outcome {
            Ok(reply) if reply.confirmed => {
                notices.success(reply.message_or("Xóa item thành công"));
                true
            }
            Ok(_) => {
                notices.warning("Item đã được xóa");
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.warning("Đã xóa item, vui lòng kiểm tra lại");
                }
                false
            }
        }
    }
}

impl Default for ItemScreen {
    fn default() -> Self {
        Self::new()
    }
}
