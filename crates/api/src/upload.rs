//! Image upload extraction and persistence.
//!
//! [`ImageForm`] accepts either a JSON body or a `multipart/form-data` body
//! with at most one image under the `imagem` field. The image is checked
//! against the allow-list and the size cap while it is read, before any row
//! is written. [`UploadStore`] writes accepted images below the upload root
//! and turns stored references back into inline base64 payloads.

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, OriginalUri, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use petshop_core::image_data;
use petshop_core::upload::{self, UploadTarget, IMAGE_FIELD, MAX_IMAGE_BYTES};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::extract::JsonBody;

/// Request body limit for routes that accept an image. Leaves room for the
/// text fields and multipart framing around a maximum-size file.
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Attempts at finding an unused file name before giving up.
const MAX_NAME_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File too large. Maximum size: 5MB")]
    TooLarge,

    #[error("Only image files are allowed (got '{file_name}' as '{content_type}')")]
    DisallowedType {
        file_name: String,
        content_type: String,
    },

    #[error("Unexpected file field '{0}'")]
    UnexpectedField(String),

    #[error("Only one file may be uploaded per request")]
    TooManyFiles,

    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Malformed(err.body_text())
        }
    }
}

/// A validated image held in memory until the handler stores it.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Destination chosen from the request path.
    pub target: UploadTarget,
    /// Form field the file arrived under.
    pub field: String,
    /// Client-supplied file name.
    pub original_name: String,
    pub bytes: Bytes,
}

/// Request body for create/update endpoints of image-bearing resources.
///
/// Text fields are deserialized into `T`. Multipart text values are strings,
/// so numeric fields in `T` must accept numeric strings.
pub struct ImageForm<T> {
    pub fields: T,
    pub image: Option<ImageUpload>,
}

impl<S, T> FromRequest<S> for ImageForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let base_path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_owned())
            .unwrap_or_else(|| req.uri().path().to_owned());

        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let JsonBody(fields) = JsonBody::<T>::from_request(req, state).await?;
            return Ok(Self {
                fields,
                image: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let target = UploadTarget::from_base_path(&base_path);

        let mut text = Map::new();
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(UploadError::from)? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_owned);

            match file_name.as_deref() {
                None => {
                    let value = field.text().await.map_err(UploadError::from)?;
                    text.insert(name, Value::String(value));
                }
                // Browsers send an empty file part when no file was chosen.
                Some("") => {}
                Some(_) => {
                    if name != IMAGE_FIELD {
                        return Err(UploadError::UnexpectedField(name).into());
                    }
                    if image.is_some() {
                        return Err(UploadError::TooManyFiles.into());
                    }
                    image = Some(read_image(field, target).await?);
                }
            }
        }

        let fields = serde_json::from_value(Value::Object(text))
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self { fields, image })
    }
}

/// Check the allow-list, then buffer the file while enforcing the size cap.
async fn read_image(mut field: Field<'_>, target: UploadTarget) -> Result<ImageUpload, UploadError> {
    let field_name = field.name().unwrap_or(IMAGE_FIELD).to_string();
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();

    if !upload::is_allowed_image(&original_name, &content_type) {
        return Err(UploadError::DisallowedType {
            file_name: original_name,
            content_type,
        });
    }

    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(ImageUpload {
        target,
        field: field_name,
        original_name,
        bytes: Bytes::from(buf),
    })
}

/// Upload directories rooted at a single base path.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dir_for(&self, target: UploadTarget) -> PathBuf {
        match target.subdir() {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }

    /// Create the upload root and every per-resource subdirectory.
    /// Safe to call repeatedly.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        for target in UploadTarget::SUBDIRECTORIES {
            tokio::fs::create_dir_all(self.dir_for(target)).await?;
        }
        Ok(())
    }

    /// Write `image` under a fresh name and return its path reference.
    pub async fn save(&self, image: &ImageUpload) -> Result<String, UploadError> {
        let dir = self.dir_for(image.target);

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = upload::generate_file_name(&image.field, &image.original_name);
            let path = dir.join(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(&image.bytes).await?;
            file.flush().await?;

            let reference = upload::reference_for(image.target, &file_name);
            tracing::debug!(%reference, size = image.bytes.len(), "Stored uploaded image");
            return Ok(reference);
        }

        Err(UploadError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "could not find an unused upload file name",
        )))
    }

    /// Store the image if there is one.
    pub async fn save_if_present(
        &self,
        image: Option<&ImageUpload>,
    ) -> Result<Option<String>, UploadError> {
        match image {
            Some(image) => self.save(image).await.map(Some),
            None => Ok(None),
        }
    }

    /// Remove a stored file whose row was never written. Best-effort.
    pub async fn discard(&self, reference: Option<&str>) {
        let Some(reference) = reference else {
            return;
        };
        let path = image_data::resolve_reference(&self.root, reference);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(error = %e, path = %path.display(), "Failed to discard upload");
        }
    }

    /// Replace a stored path reference with the file's base64 contents.
    pub async fn inline(&self, reference: &mut Option<String>) -> Result<(), UploadError> {
        *reference = image_data::encode_reference(&self.root, reference.as_deref()).await?;
        Ok(())
    }
}
