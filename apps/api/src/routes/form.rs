//! Buffered multipart form shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::wire::RecordId;

/// Upper bound for a single uploaded file.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// All fields of a multipart request. Parts that carry a file name are files,
/// everything else is text.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if bytes.len() > MAX_UPLOAD_BYTES {
                        return Err(AppError::InvalidRequest(format!(
                            "{name} is larger than {} MB",
                            MAX_UPLOAD_BYTES / (1024 * 1024)
                        )));
                    }
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Non-blank text field, trimmed.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require_text(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::InvalidRequest(format!("Missing required field '{name}'")))
    }

    pub fn require_id(&self, name: &str) -> Result<i64, AppError> {
        self.require_text(name)?
            .parse::<RecordId>()
            .map(|id| id.0)
            .map_err(|_| AppError::InvalidRequest(format!("'{name}' must be a numeric id")))
    }

    /// Non-empty file part.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).filter(|f| !f.bytes.is_empty())
    }

    pub fn require_file(&self, name: &str) -> Result<&UploadedFile, AppError> {
        self.file(name)
            .ok_or_else(|| AppError::InvalidRequest(format!("Missing required file '{name}'")))
    }
}

#[cfg(test)]
impl UploadForm {
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}
