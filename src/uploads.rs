//! Product image uploads.
//!
//! Files are vetted by filename extension only, written under a fixed
//! directory, and referenced by site-relative path. A later upload with
//! the same name silently overwrites the earlier file.

use std::path::Path;

use crate::error::AppResult;

pub const UPLOAD_DIR: &str = "static/images";

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Extension allow-list check, case-insensitive on the final extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory: last path segment only, whitespace collapsed to
/// underscores, anything outside [A-Za-z0-9._-] dropped, leading dots
/// stripped.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Write the upload under [`UPLOAD_DIR`] and return its site-relative
/// path, or `None` when sanitizing leaves nothing usable.
pub async fn save_image(filename: &str, data: &[u8]) -> AppResult<Option<String>> {
    let safe = sanitize_filename(filename);
    if safe.is_empty() {
        return Ok(None);
    }
    tokio::fs::create_dir_all(UPLOAD_DIR).await?;
    let path = Path::new(UPLOAD_DIR).join(&safe);
    tokio::fs::write(&path, data).await?;
    Ok(Some(format!("/{UPLOAD_DIR}/{safe}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.JPG"));
        assert!(allowed_file("photo.Gif"));
        assert!(!allowed_file("photo.exe"));
        assert!(!allowed_file("photo"));
        assert!(!allowed_file("photo.png.sh"));
    }

    #[test]
    fn sanitize_strips_paths_and_oddities() {
        assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("my photo.jpg"), "my_photo.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\shots\\cap.png"), "cap.png");
        assert_eq!(sanitize_filename("snéaky.gif"), "snaky.gif");
        assert_eq!(sanitize_filename("..hidden.png"), "hidden.png");
    }
}
