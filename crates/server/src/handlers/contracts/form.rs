use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use common::{
    config::Limits,
    storage::{FileStorage, StorageError},
};
use derive_more::{Display, Error, From};

use crate::error::ResponseError;

/// Newly uploaded listing images.
const IMAGES_FIELD: &str = "images";

/// Listing images kept during an update.
///
/// Text values reference already stored images, while files are stored as new ones.
const EXISTING_IMAGES_FIELD: &str = "existingImages";

const ID_PROOF_FIELD: &str = "idProof";

const LAND_PROOF_FIELD: &str = "landProof";

/// Errors that may occur while reading a listing form.
#[derive(Debug, Display, From, Error)]
pub(crate) enum UploadError {
    #[display(fmt = "Upload error: {}", _0)]
    MultipartError(MultipartError),

    StorageError(StorageError),

    #[display(fmt = "Upload error: File too large")]
    FileTooLarge,

    #[from(ignore)]
    #[display(fmt = "Upload error: Unexpected field {}", field)]
    UnexpectedField { field: String },

    #[display(fmt = "Not an accepted file type")]
    NotAcceptedFileType,
}

impl ResponseError for UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::MultipartError(err) => err.status(),
            UploadError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Listing form submitted as `multipart/form-data`.
///
/// Uploaded files are stored while the form is being read, so the form only
/// carries their public paths.
#[derive(Debug, Default)]
pub(crate) struct ContractForm {
    /// Text fields by their name.
    pub fields: HashMap<String, String>,

    pub images: Vec<String>,

    /// Kept image paths followed by files uploaded in their place.
    pub existing_images: Vec<String>,

    pub id_proof: Option<String>,

    pub land_proof: Option<String>,

    /// Every file stored while reading the form.
    pub stored: Vec<String>,
}

impl ContractForm {
    /// Read a listing form, storing uploaded files.
    ///
    /// Files stored before an error occurred are removed in background.
    pub async fn read(
        multipart: &mut Multipart,
        storage: &FileStorage,
        limits: &Limits,
    ) -> Result<ContractForm, UploadError> {
        let mut form = ContractForm::default();

        match form.read_fields(multipart, storage, limits).await {
            Ok(()) => Ok(form),
            Err(err) => {
                storage.spawn_cleanup(form.stored);
                Err(err)
            }
        }
    }

    async fn read_fields(
        &mut self,
        multipart: &mut Multipart,
        storage: &FileStorage,
        limits: &Limits,
    ) -> Result<(), UploadError> {
        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default();
            let name = name.strip_suffix("[]").unwrap_or(name).to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await?;

                if name == EXISTING_IMAGES_FIELD {
                    if !value.is_empty() {
                        self.existing_images.push(value);
                    }
                } else {
                    self.fields.insert(name, value);
                }

                continue;
            };

            // Browsers submit empty file inputs as parts without a file name.
            if file_name.is_empty() {
                continue;
            }

            let count = match name.as_str() {
                IMAGES_FIELD => self.images.len(),
                EXISTING_IMAGES_FIELD => self.existing_images.len(),
                ID_PROOF_FIELD => usize::from(self.id_proof.is_some()),
                LAND_PROOF_FIELD => usize::from(self.land_proof.is_some()),
                _ => return Err(UploadError::UnexpectedField { field: name }),
            };

            let max_count = match name.as_str() {
                IMAGES_FIELD | EXISTING_IMAGES_FIELD => limits.max_images,
                _ => 1,
            };

            if count >= max_count {
                return Err(UploadError::UnexpectedField { field: name });
            }

            let content_type = field.content_type().unwrap_or_default().to_string();

            if !is_accepted_file_type(&content_type) {
                return Err(UploadError::NotAcceptedFileType);
            }

            let mut contents = Vec::new();

            while let Some(chunk) = field.chunk().await? {
                if contents.len() + chunk.len() > limits.file_size {
                    return Err(UploadError::FileTooLarge);
                }

                contents.extend_from_slice(&chunk);
            }

            let path = storage
                .store(&file_name, &content_type, contents.into())
                .await?;

            self.stored.push(path.clone());

            match name.as_str() {
                IMAGES_FIELD => self.images.push(path),
                EXISTING_IMAGES_FIELD => self.existing_images.push(path),
                ID_PROOF_FIELD => self.id_proof = Some(path),
                _ => self.land_proof = Some(path),
            }
        }

        Ok(())
    }
}

/// Images of any kind and PDF documents are accepted.
fn is_accepted_file_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type == "application/pdf"
}

#[cfg(test)]
mod tests {
    use super::is_accepted_file_type;

    #[test]
    fn file_types() {
        assert!(is_accepted_file_type("image/png"));
        assert!(is_accepted_file_type("image/jpeg"));
        assert!(is_accepted_file_type("application/pdf"));
        assert!(!is_accepted_file_type("text/plain"));
        assert!(!is_accepted_file_type("application/zip"));
        assert!(!is_accepted_file_type(""));
    }
}
