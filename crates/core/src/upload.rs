//! Image upload rules.
//!
//! Covers the allow-list, the size cap, the choice of destination directory
//! and the collision-resistant naming scheme. Persisting the bytes is the
//! API crate's job; everything here is pure.

use std::path::Path;

use rand::Rng;

/// Multipart field name that carries the image.
pub const IMAGE_FIELD: &str = "imagem";

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image formats, matched against both extension and content type.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// URL prefix under which uploaded files are served and referenced.
pub const URL_PREFIX: &str = "/uploads";

/// Destination directory for an upload, derived from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Categories,
    Products,
    /// Requests outside the two image-bearing resources land in the root.
    Root,
}

impl UploadTarget {
    /// Every target that owns a subdirectory. Created at startup.
    pub const SUBDIRECTORIES: [UploadTarget; 2] = [UploadTarget::Categories, UploadTarget::Products];

    /// Pick the destination by inspecting the request's base path.
    pub fn from_base_path(path: &str) -> Self {
        if path.contains("categories") {
            UploadTarget::Categories
        } else if path.contains("products") {
            UploadTarget::Products
        } else {
            UploadTarget::Root
        }
    }

    /// Subdirectory name below the upload root, if any.
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            UploadTarget::Categories => Some("categories"),
            UploadTarget::Products => Some("products"),
            UploadTarget::Root => None,
        }
    }
}

/// Extension of `file_name` including the leading dot, or `""`.
///
/// The original casing is kept so the stored file mirrors the client's name.
/// Trailing separators are ignored, so the result never contains a `/`.
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Whether both the extension and the declared content type are on the
/// image allow-list. Comparison is case-insensitive.
pub fn is_allowed_image(file_name: &str, content_type: &str) -> bool {
    let ext = file_extension(file_name).trim_start_matches('.').to_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&ext.as_str()) {
        return false;
    }

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    match mime.split_once('/') {
        Some(("image", subtype)) => ALLOWED_IMAGE_TYPES.contains(&subtype),
        _ => false,
    }
}

/// Build `<field>-<millis>-<random><ext>` from explicit inputs.
pub fn unique_file_name(field: &str, original_name: &str, millis: i64, random: u32) -> String {
    format!("{field}-{millis}-{random}{}", file_extension(original_name))
}

/// Generate a fresh file name from the current time and a random suffix.
pub fn generate_file_name(field: &str, original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = rand::rng().random_range(0..1_000_000_000);
    unique_file_name(field, original_name, millis, random)
}

/// Path reference stored on the entity, e.g. `/uploads/products/imagem-1-2.png`.
pub fn reference_for(target: UploadTarget, file_name: &str) -> String {
    match target.subdir() {
        Some(dir) => format!("{URL_PREFIX}/{dir}/{file_name}"),
        None => format!("{URL_PREFIX}/{file_name}"),
    }
}
