//! Multipart request bodies, kept abstract so controllers and tests never
//! touch reqwest types directly.

use super::error::ApiResult;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.file = Some(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }

    pub(crate) fn into_multipart(self) -> ApiResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        if let Some(file) = self.file {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_keeps_field_order() {
        let form = FormPayload::new()
            .text("Title", "Kanji N5")
            .text("Price", "0")
            .file("Image", "cover.png", "image/png", vec![1, 2, 3]);

        assert_eq!(form.fields()[0].0, "Title");
        assert_eq!(form.fields()[1].1, "0");
        let file = form.file_part().unwrap();
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes.len(), 3);
    }
}
