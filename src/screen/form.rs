//! Shared form machinery: create/edit mode, per-field error map, numeric
//! field checks, and the client-side image constraints.

use std::collections::BTreeMap;

use crate::api::MAX_IMAGE_BYTES;
use crate::notice::Notices;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { target_id: String },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::Edit { target_id } => Some(target_id),
            Self::Create => None,
        }
    }
}

/// Per-field validation messages. Absent field ⇒ empty string ⇒ no error.
/// Setting a field's value clears only that field's message; other fields
/// keep theirs until their own revalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn set(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &'static str) {
        self.fields.remove(field);
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn is_clean(&self) -> bool {
        self.fields.values().all(|m| m.is_empty())
    }
}

/// How a free-typed numeric field reads. Blank counts as zero, the way an
/// empty number input does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    Valid(f64),
    NotANumber,
    Negative,
}

pub fn check_non_negative(raw: &str) -> NumberCheck {
    let raw = raw.trim();
    if raw.is_empty() {
        return NumberCheck::Valid(0.0);
    }
    match raw.parse::<f64>() {
        Err(_) => NumberCheck::NotANumber,
        Ok(n) if n < 0.0 => NumberCheck::Negative,
        Ok(n) => NumberCheck::Valid(n),
    }
}

/// An image the user picked for a course or item form. Files over 5 MB or
/// with a non-image mime type are refused at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn accept(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
        notices: &Notices,
    ) -> Option<Self> {
        let mime = mime.into();
        if bytes.len() > MAX_IMAGE_BYTES {
            notices.error("Kích thước ảnh không được vượt quá 5MB");
            return None;
        }
        if !mime.starts_with("image/") {
            notices.error("Vui lòng chọn file ảnh");
            return None;
        }
        Some(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::notice::NoticeLevel;

    use super::*;

    #[test]
    fn setting_a_value_clears_only_its_own_error() {
        let mut errors = FieldErrors::default();
        errors.set("title", "bad");
        errors.set("description", "also bad");

        errors.clear("title");
        assert_eq!(errors.get("title"), "");
        assert_eq!(errors.get("description"), "also bad");
        assert!(!errors.is_clean());
    }

    #[test]
    fn numeric_checks() {
        assert_eq!(check_non_negative(""), NumberCheck::Valid(0.0));
        assert_eq!(check_non_negative(" 12.5 "), NumberCheck::Valid(12.5));
        assert_eq!(check_non_negative("-3"), NumberCheck::Negative);
        assert_eq!(check_non_negative("abc"), NumberCheck::NotANumber);
    }

    #[test]
    fn image_limits_are_enforced() {
        let notices = Notices::new();
        assert!(ImageUpload::accept("a.png", "image/png", vec![0; 16], &notices).is_some());

        assert!(ImageUpload::accept("a.pdf", "application/pdf", vec![0; 16], &notices).is_none());
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Error);

        let too_big = vec![0; MAX_IMAGE_BYTES + 1];
        assert!(ImageUpload::accept("a.png", "image/png", too_big, &notices).is_none());
        assert_eq!(
            notices.last().unwrap().text,
            "Kích thước ảnh không được vượt quá 5MB"
        );
    }
}
