//! Inline image codec.
//!
//! Entities store a path reference (`/uploads/...`). Responses carry the
//! referenced file's bytes as standard base64 instead.

use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::upload::URL_PREFIX;

/// Map a stored reference onto a file below `upload_root`.
pub fn resolve_reference(upload_root: &Path, reference: &str) -> PathBuf {
    let relative = reference
        .strip_prefix(URL_PREFIX)
        .unwrap_or(reference)
        .trim_start_matches('/');
    upload_root.join(relative)
}

/// Read the referenced file and return it base64-encoded.
///
/// `None` or an empty reference yields `Ok(None)`. A reference whose file is
/// missing is an error.
pub async fn encode_reference(
    upload_root: &Path,
    reference: Option<&str>,
) -> io::Result<Option<String>> {
    let Some(reference) = reference.filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(resolve_reference(upload_root, reference)).await?;
    Ok(Some(STANDARD.encode(bytes)))
}
