//! Gallery discovery and image decoding.
//! Supports JPG, PNG, WEBP, GIF (first frame), BMP, ICO and TIFF files.

use std::path::{Path, PathBuf};

use image::GenericImageView;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Supported image extensions
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "gif", "bmp", "ico", "tiff", "tif"];

/// Check if a file is a supported image
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get all images directly inside `dir`, in natural filename order.
/// An unreadable or empty directory yields an empty list.
pub fn scan_gallery(dir: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();

    images.sort_by(|a, b| {
        natord::compare(
            a.file_name().unwrap_or_default().to_str().unwrap_or(""),
            b.file_name().unwrap_or_default().to_str().unwrap_or(""),
        )
    });

    images
}

/// Human-readable caption for an image: the final path component,
/// percent-decoded (gallery files often come from URL-encoded uploads).
pub fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    percent_decode_str(name).decode_utf8_lossy().into_owned()
}

/// Errors surfaced by the decode worker. They are logged and rendered as a
/// placeholder; they never abort navigation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA pixels, ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decode an image from disk. With `max_side` set, the result is
    /// downscaled (aspect preserved) so neither side exceeds it, as used
    /// for grid thumbnails.
    pub fn load(path: &Path, max_side: Option<u32>) -> Result<Self, LoadError> {
        let mut img = image::open(path).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(max_side) = max_side {
            let (w, h) = img.dimensions();
            if w > max_side || h > max_side {
                img = img.thumbnail(max_side, max_side);
            }
        }

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width: width as usize,
            height: height as usize,
            rgba: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Writes a real `width` x `height` PNG so decoding exercises the actual
    /// codec path.
    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 40, 200, 255]));
        img.save(&path).expect("failed to write test png");
        path
    }

    #[test]
    fn extension_filter_accepts_images_case_insensitively() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("b.PNG")));
        assert!(is_supported_image(Path::new("c.WebP")));
        assert!(!is_supported_image(Path::new("d.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn scan_orders_naturally_and_skips_non_images() {
        let dir = tempdir().expect("failed to create temp dir");
        write_png(dir.path(), "img_10.png", 2, 2);
        write_png(dir.path(), "img_2.png", 2, 2);
        write_png(dir.path(), "img_1.png", 2, 2);
        fs::write(dir.path().join("notes.txt"), b"not an image").expect("write failed");

        let found = scan_gallery(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["img_1.png", "img_2.png", "img_10.png"]);
    }

    #[test]
    fn scan_of_missing_directory_is_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("nope");
        assert!(scan_gallery(&missing).is_empty());
    }

    #[test]
    fn display_name_percent_decodes_the_filename() {
        assert_eq!(
            display_name(Path::new("/gallery/summer%20trip%20%231.jpg")),
            "summer trip #1.jpg"
        );
        assert_eq!(display_name(Path::new("plain.png")), "plain.png");
    }

    #[test]
    fn decode_roundtrips_dimensions() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_png(dir.path(), "small.png", 5, 3);

        let decoded = DecodedImage::load(&path, None).expect("decode failed");
        assert_eq!((decoded.width, decoded.height), (5, 3));
        assert_eq!(decoded.rgba.len(), 5 * 3 * 4);
    }

    #[test]
    fn decode_downscales_to_max_side() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_png(dir.path(), "wide.png", 64, 16);

        let decoded = DecodedImage::load(&path, Some(32)).expect("decode failed");
        assert!(decoded.width <= 32 && decoded.height <= 32);
        // Aspect ratio survives the downscale.
        assert_eq!(decoded.width, 32);
        assert_eq!(decoded.height, 8);
    }

    #[test]
    fn decode_of_garbage_is_an_error_not_a_panic() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").expect("write failed");

        let err = DecodedImage::load(&path, None).expect_err("expected decode error");
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
