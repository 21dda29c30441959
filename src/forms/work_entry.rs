use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::types::{ClientId, DayKey};
use crate::domain::work_entry::SaveWorkEntry;
use crate::forms::FormError;

/// Public prefix under which stored uploads are served.
pub const UPLOADS_PATH: &str = "/uploads";

#[derive(MultipartForm)]
/// Multipart body of `POST /api/v1/work-entries`.
pub struct SaveWorkEntryForm {
    pub date: Text<String>,
    pub client_id: Text<i32>,
    pub description: Option<Text<String>>,
    pub content_description: Option<Text<String>>,
    pub notes: Option<Text<String>>,
    pub is_special_day: Option<Text<String>>,
    #[multipart(limit = "20MB")]
    pub content_file: Option<TempFile>,
}

#[derive(Debug, Deserialize, Validate)]
/// Text fields of [`SaveWorkEntryForm`] after extraction.
pub struct SaveWorkEntryPayload {
    /// `YYYY-MM-DD`.
    #[validate(length(equal = 10))]
    pub date: String,
    #[validate(range(min = 1))]
    pub client_id: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_special_day: bool,
}

/// Checkbox-style truthiness: `true`, `1`, `on` and `yes`.
fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}

impl SaveWorkEntryForm {
    /// Splits the form into its text payload and the optional upload.
    pub fn into_parts(self) -> (SaveWorkEntryPayload, Option<TempFile>) {
        let payload = SaveWorkEntryPayload {
            date: self.date.into_inner(),
            client_id: self.client_id.into_inner(),
            description: self.description.map(Text::into_inner).unwrap_or_default(),
            content_description: self
                .content_description
                .map(Text::into_inner)
                .unwrap_or_default(),
            notes: self.notes.map(Text::into_inner).unwrap_or_default(),
            is_special_day: self
                .is_special_day
                .is_some_and(|value| is_truthy(value.as_str())),
        };
        // Browsers send an empty part when no file was picked.
        let file = self.content_file.filter(|file| file.size > 0);
        (payload, file)
    }
}

impl SaveWorkEntryPayload {
    /// Validates the payload and builds the save request. `content_file` is
    /// the public path of an already stored upload.
    pub fn into_request(self, content_file: Option<String>) -> Result<SaveWorkEntry, FormError> {
        self.validate()?;

        let date = DayKey::parse(&self.date).map_err(|_| FormError::InvalidDate)?;
        let client_id = ClientId::new(self.client_id).map_err(|_| FormError::InvalidClientId)?;

        Ok(SaveWorkEntry {
            date,
            client_id,
            description: self.description,
            content_description: self.content_description,
            notes: self.notes,
            content_file,
            is_special_day: self.is_special_day,
        })
    }
}

/// Copies an upload into `upload_dir` under a random name and returns the
/// path it is served at.
pub fn store_upload(file: &TempFile, upload_dir: &Path) -> Result<String, FormError> {
    let extension = file
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    let file_name = match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };

    std::fs::create_dir_all(upload_dir).map_err(|e| FormError::Upload(e.to_string()))?;
    std::fs::copy(file.file.path(), upload_dir.join(&file_name))
        .map_err(|e| FormError::Upload(e.to_string()))?;

    Ok(format!("{UPLOADS_PATH}/{file_name}"))
}
