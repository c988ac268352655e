use base64::Engine as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::error::{AppError, Result};

/// Page background read once at startup and inlined as a data URL
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub mime: &'static str,
    pub data: String,
}

impl BackgroundImage {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to read background image {}: {}",
                path.display(),
                e
            ))
        })?;

        let mime = mime_for(path);
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
        info!(path = %path.display(), mime, bytes = bytes.len(), "Background image loaded");

        Ok(Self { mime, data })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }

    /// CSS rule applied to the page body
    pub fn css(&self) -> String {
        format!(
            "body {{ background-image: url(\"{}\"); background-size: cover; background-attachment: fixed; }}",
            self.data_url()
        )
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_encodes_and_detects_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mall.JPG");
        fs::write(&path, b"abc").unwrap();

        let image = BackgroundImage::load(&path).unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.data, "YWJj");
        assert_eq!(image.data_url(), "data:image/jpeg;base64,YWJj");
        assert!(image.css().contains("background-size: cover"));
    }

    #[test]
    fn test_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = BackgroundImage::load(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(AppError::IoError(_))));
    }
}
