use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::api::{ApiClient, HttpSource, normalize_slides};
use crate::error::FetchError;
use crate::slide::Slide;
use crate::texture_loader::load_sorted_image_paths;

/// Where slides come from. The rotator calls `fetch` once per mount on a
/// worker thread and knows nothing else about the origin.
pub trait SlideSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Slide>, FetchError>;

    fn describe(&self) -> String {
        "custom source".to_string()
    }
}

impl<F> SlideSource for F
where
    F: Fn() -> Result<Vec<Slide>, FetchError> + Send + Sync,
{
    fn fetch(&self) -> Result<Vec<Slide>, FetchError> {
        self()
    }
}

/// A JSON file holding slides in any envelope `normalize_slides` accepts.
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SlideSource for ManifestSource {
    fn fetch(&self) -> Result<Vec<Slide>, FetchError> {
        let json = std::fs::read_to_string(&self.path)?;
        let payload = serde_json::from_str(&json)?;
        let mut slides = normalize_slides(payload)?;

        // Relative image paths are relative to the manifest.
        if let Some(base) = self.path.parent() {
            for slide in slides.iter_mut() {
                if slide.has_image() && !is_remote(&slide.image_url) {
                    let image = Path::new(&slide.image_url);
                    if image.is_relative() {
                        slide.image_url = base.join(image).to_string_lossy().into_owned();
                    }
                }
            }
        }
        Ok(slides)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Every image in a directory, sorted by file name, titled by file stem.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SlideSource for DirectorySource {
    fn fetch(&self) -> Result<Vec<Slide>, FetchError> {
        let slides = load_sorted_image_paths(&self.dir)?
            .into_iter()
            .map(|path| {
                let title = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().replace(['_', '-'], " "));
                Slide {
                    title,
                    subtitle: None,
                    image_url: path.to_string_lossy().into_owned(),
                }
            })
            .collect();
        Ok(slides)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Pick a source for a location string: http(s) endpoint, image directory,
/// or JSON manifest. `None` gives a source with no slides.
pub fn source_for_location(
    location: Option<&str>,
    client: &ApiClient,
) -> Arc<dyn SlideSource> {
    match location {
        None => {
            info!("No slide source configured, showing fallback banner");
            Arc::new(|| -> Result<Vec<Slide>, FetchError> { Ok(Vec::new()) })
        }
        Some(loc) if is_remote(loc) => Arc::new(HttpSource::new(client.clone(), loc)),
        Some(loc) if Path::new(loc).is_dir() => Arc::new(DirectorySource::new(loc)),
        Some(loc) => Arc::new(ManifestSource::new(loc)),
    }
}
