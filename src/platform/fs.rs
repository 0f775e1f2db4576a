// AgroCast - platform/fs.rs
//
// Leaf image access: validation, metadata for the classifier, and preview
// decoding. The classifier never reads pixel data; only name and size.

use crate::core::model::ClassificationInput;
use crate::util::constants::{MAX_PREVIEW_FILE_SIZE, PREVIEW_MAX_EDGE, SUPPORTED_IMAGE_EXTENSIONS};
use crate::util::error::ImageError;
use std::path::{Path, PathBuf};

/// A validated leaf image on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafImage {
    pub path: PathBuf,
    pub file_name: String,
    pub byte_size: u64,
}

impl LeafImage {
    /// Classifier input for this image analysed at `timestamp_millis`.
    pub fn classification_input(&self, timestamp_millis: u64) -> ClassificationInput {
        ClassificationInput::from_file_name(&self.file_name, self.byte_size, timestamp_millis)
    }
}

/// Lower-cased extension of `path`, if any.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// True if `path` has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Validate that `path` is an existing image file and read its metadata.
pub fn inspect_image(path: &Path) -> Result<LeafImage, ImageError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImageError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ImageError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if !metadata.is_file() {
        return Err(ImageError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if !is_supported_image(path) {
        return Err(ImageError::UnsupportedType {
            path: path.to_path_buf(),
            extension: extension_of(path),
        });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ImageError::MissingFileName {
            path: path.to_path_buf(),
        })?;

    Ok(LeafImage {
        path: path.to_path_buf(),
        file_name,
        byte_size: metadata.len(),
    })
}

/// Current wall-clock time in milliseconds since the Unix epoch.
/// Clocks set before 1970 read as zero.
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Decoded RGBA preview, downscaled so the longest edge fits the preview box.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode `path` for on-screen preview.
///
/// Returns `None` (after logging) for files that are too large or that the
/// `image` crate cannot decode; classification does not depend on this.
pub fn load_preview(path: &Path) -> Option<PreviewImage> {
    match std::fs::metadata(path) {
        Ok(m) if m.len() > MAX_PREVIEW_FILE_SIZE => {
            tracing::debug!(path = %path.display(), size = m.len(), "Image too large to preview");
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot stat image for preview");
            return None;
        }
    }

    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to decode image preview");
            return None;
        }
    };

    let img = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
        img.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
    } else {
        img
    };
    let rgba = img.into_rgba8();
    Some(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(is_supported_image(Path::new("leaf.JPG")));
        assert!(is_supported_image(Path::new("a/b/leaf.webp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn test_inspect_image_reads_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomato_leaf.jpg");
        std::fs::write(&path, vec![0u8; 2000]).unwrap();

        let img = inspect_image(&path).unwrap();
        assert_eq!(img.file_name, "tomato_leaf.jpg");
        assert_eq!(img.byte_size, 2000);

        let input = img.classification_input(42);
        assert_eq!(input.name_length, 15);
        assert_eq!(input.byte_size, 2000);
        assert_eq!(input.timestamp_millis, 42);
    }

    #[test]
    fn test_inspect_image_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.png");
        assert!(matches!(inspect_image(&missing), Err(ImageError::NotFound { .. })));

        assert!(matches!(inspect_image(dir.path()), Err(ImageError::NotAFile { .. })));

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hello").unwrap();
        match inspect_image(&text) {
            Err(ImageError::UnsupportedType { extension, .. }) => {
                assert_eq!(extension.as_deref(), Some("txt"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_of_undecodable_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_preview(&path).is_none());
    }

    #[test]
    fn test_preview_of_real_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("green.png");
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([34, 139, 34, 255]));
        img.save(&path).unwrap();

        let preview = load_preview(&path).unwrap();
        assert_eq!((preview.width, preview.height), (4, 3));
        assert_eq!(preview.rgba.len(), 4 * 3 * 4);
    }
}
