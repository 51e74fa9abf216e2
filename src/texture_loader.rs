use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::FetchError;
use crate::source::is_remote;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Encoded image plus the lowercase extension raylib needs to decode it.
pub struct ImageBytes {
    pub bytes: Vec<u8>,
    pub extension: String,
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() {
            if let Some(ext) = extension_of(&path.to_string_lossy()) {
                if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                    paths.push(path);
                }
            }
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Read an image from disk or over HTTP. Runs on a worker thread.
pub fn read_image_bytes(location: &str, client: &ApiClient) -> Result<ImageBytes, FetchError> {
    if is_remote(location) {
        let (bytes, content_type) = client.get_bytes(location)?;
        let extension = content_type
            .as_deref()
            .and_then(extension_for_content_type)
            .map(str::to_string)
            .or_else(|| extension_of(location))
            .unwrap_or_else(|| "png".to_string());
        Ok(ImageBytes { bytes, extension })
    } else {
        let bytes = fs::read(location)?;
        let extension = extension_of(location).unwrap_or_else(|| "png".to_string());
        Ok(ImageBytes { bytes, extension })
    }
}

/// Lowercase extension of a path or URL, ignoring any query or fragment.
pub fn extension_of(location: &str) -> Option<String> {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    let file = path.rsplit('/').next().unwrap_or(path);
    Path::new(file)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}

fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/bmp" => Some("bmp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// EXIF orientation tag, or 1 (normal) when absent or unreadable.
pub fn exif_orientation(image: &ImageBytes) -> u16 {
    // Only JPEG carries EXIF reliably
    if image.extension != "jpg" && image.extension != "jpeg" {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(&image.bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Non-critical: proceed without rotation
            debug!("Could not read EXIF data: {}", e);
            1
        }
    }
}

// --- Decode Image, Apply EXIF Rotation ---
pub fn decode_image(image_bytes: &ImageBytes) -> Result<Image, String> {
    let orientation = exif_orientation(image_bytes);

    let mut image = Image::load_image_from_mem(&format!(".{}", image_bytes.extension), &image_bytes.bytes)
        .map_err(|e| format!("Failed to decode {} image: {}", image_bytes.extension, e))?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        1 => {}
        other => warn!("Ignoring unsupported EXIF orientation {}", other),
    }

    // Fixed pixel layout so the contrast sampler can read raw bytes
    image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8);
    Ok(image)
}

/// Solid slate image drawn when a slide's artwork is missing or broken.
pub fn placeholder_image() -> Image {
    Image::gen_image_color(64, 36, Color::new(71, 85, 105, 255))
}

/// RGBA bytes of an image previously normalised by `decode_image`.
pub fn rgba_pixels(image: &Image) -> &[u8] {
    let len = image.width().max(0) as usize * image.height().max(0) as usize * 4; // 4 bytes per pixel (RGBA)
    // SAFETY: the pointer is owned by `image` and the R8G8B8A8 buffer holds `len` bytes
    unsafe {
        let data = image.data() as *const u8;
        if len == 0 || data.is_null() {
            return &[];
        }
        std::slice::from_raw_parts(data, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extension_ignores_query_and_case() {
        assert_eq!(extension_of("https://cdn.example.com/a/b/Photo.JPG?w=2000&q=85").as_deref(), Some("jpg"));
        assert_eq!(extension_of("/tmp/banner.png").as_deref(), Some("png"));
        assert_eq!(extension_of("https://cdn.example.com/photo-1521737604893"), None);
    }

    #[test]
    fn content_type_beats_url_guess() {
        assert_eq!(extension_for_content_type("image/jpeg; charset=binary"), Some("jpg"));
        assert_eq!(extension_for_content_type("text/html"), None);
    }

    #[test]
    fn sorted_paths_skip_non_images() {
        let dir = tempdir().expect("failed to create temp dir");
        for name in ["z.bmp", "a.jpeg", "readme.md"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<_> = load_sorted_image_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpeg", "z.bmp"]);
    }

    #[test]
    fn empty_directory_has_no_images() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(load_sorted_image_paths(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn non_jpeg_has_normal_orientation() {
        let image = ImageBytes { bytes: vec![0; 16], extension: "png".to_string() };
        assert_eq!(exif_orientation(&image), 1);
    }

    #[test]
    fn garbage_jpeg_has_normal_orientation() {
        let image = ImageBytes { bytes: b"not a jpeg".to_vec(), extension: "jpg".to_string() };
        assert_eq!(exif_orientation(&image), 1);
    }

    #[test]
    fn missing_local_image_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let client = ApiClient::new(None).unwrap();
        let missing = dir.path().join("missing.jpg");

        let err = read_image_bytes(&missing.to_string_lossy(), &client).err().unwrap();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        let garbage = ImageBytes { bytes: b"definitely not a png".to_vec(), extension: "png".to_string() };
        assert!(decode_image(&garbage).is_err());

        let empty = ImageBytes { bytes: Vec::new(), extension: "jpg".to_string() };
        assert!(decode_image(&empty).is_err());
    }

    #[test]
    fn pixel_slice_covers_every_rgba_pixel() {
        let image = placeholder_image();
        assert_eq!(rgba_pixels(&image).len(), 64 * 36 * 4);
    }

    #[test]
    fn local_bytes_carry_path_extension() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("hero.GIF");
        fs::write(&path, b"GIF89a").unwrap();
        let client = ApiClient::new(None).unwrap();

        let image = read_image_bytes(&path.to_string_lossy(), &client).unwrap();
        assert_eq!(image.extension, "gif");
        assert_eq!(image.bytes, b"GIF89a");
    }
}
