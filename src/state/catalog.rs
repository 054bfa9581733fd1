/// Gallery catalogs
///
/// A catalog is everything needed to show one gallery: the header text
/// and the photo list. Catalogs come from three places:
/// - the built-in sample gallery, embedded at compile time
/// - a JSON manifest listing photos explicitly
/// - a folder of local images, scanned recursively
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use super::data::{Photo, PhotoId, PhotoList};
use crate::error::{Error, Result};

/// The sample gallery shipped with the application
const BUILTIN_MANIFEST: &str = include_str!("../../assets/default_gallery.json");

/// Image file extensions picked up when scanning a folder (lowercase)
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// On-disk manifest format
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    photos: Vec<Photo>,
}

/// A loaded gallery: header plus photos
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub title: String,
    pub subtitle: String,
    pub photos: PhotoList,
}

impl Catalog {
    /// The built-in sample gallery
    pub fn builtin() -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(BUILTIN_MANIFEST).map_err(|source| Error::Manifest {
                path: PathBuf::from("<builtin>"),
                source,
            })?;
        Self::from_parsed(manifest, "Photo Gallery".to_string())
    }

    /// Load a folder or a manifest file, depending on what `path` is
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::from_folder(path)
        } else {
            Self::from_manifest(path)
        }
    }

    /// Read a JSON manifest.
    ///
    /// Relative local image paths are resolved against the directory the
    /// manifest lives in, so a manifest can be moved together with its photos.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut manifest: Manifest =
            serde_json::from_str(&contents).map_err(|source| Error::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for photo in &mut manifest.photos {
            if let Some(resolved) = resolve_relative(&photo.url, base) {
                photo.url = resolved;
            }
        }

        let fallback_title = file_label(path);
        let catalog = Self::from_parsed(manifest, fallback_title)?;
        tracing::info!(
            path = %path.display(),
            photos = catalog.photos.len(),
            "loaded gallery manifest"
        );
        Ok(catalog)
    }

    /// Scan a folder recursively for images.
    ///
    /// Photos are ordered by path and numbered from 1 in that order.
    pub fn from_folder(folder: &Path) -> Result<Self> {
        tracing::info!(folder = %folder.display(), "scanning folder");

        let mut paths: Vec<PathBuf> = WalkDir::new(folder)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_image(path))
            .collect();
        paths.sort();

        let photos = paths
            .iter()
            .zip(1u32..)
            .map(|(path, id)| Photo {
                id: PhotoId(id),
                url: path.to_string_lossy().into_owned(),
                title: path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
                description: path
                    .parent()
                    .and_then(|parent| parent.strip_prefix(folder).ok())
                    .map(|relative| relative.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })
            .collect();

        let photos = PhotoList::new(photos)?;
        tracing::info!(folder = %folder.display(), photos = photos.len(), "scan complete");

        Ok(Catalog {
            title: file_label(folder),
            subtitle: format!("{} photos", photos.len()),
            photos,
        })
    }

    fn from_parsed(manifest: Manifest, fallback_title: String) -> Result<Self> {
        Ok(Catalog {
            title: manifest.title.unwrap_or(fallback_title),
            subtitle: manifest.subtitle.unwrap_or_default(),
            photos: PhotoList::new(manifest.photos)?,
        })
    }
}

/// Load a catalog on the blocking pool
pub async fn load_async(path: PathBuf) -> Result<Catalog> {
    tokio::task::spawn_blocking(move || Catalog::load(&path)).await?
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Resolve a plain relative path against `base`; URLs and absolute paths stay as they are
fn resolve_relative(url: &str, base: &Path) -> Option<String> {
    if url.contains("://") {
        return None;
    }

    let path = Path::new(url);
    if path.is_absolute() || url.trim().is_empty() {
        return None;
    }

    Some(base.join(path).to_string_lossy().into_owned())
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.photos.len(), 6);
        assert_eq!(catalog.title, "Галерея воспоминаний");
        assert!(!catalog.subtitle.is_empty());

        let ids: Vec<u32> = catalog.photos.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(catalog.photos.iter().all(|p| p.is_remote()));
    }

    #[test]
    fn test_manifest_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("trip.json");
        fs::write(
            &manifest,
            r#"{
                "subtitle": "Summer",
                "photos": [
                    { "id": 3, "url": "images/beach.jpg", "title": "Beach" },
                    { "id": 1, "url": "/abs/mountain.jpg", "title": "Mountain", "description": "High" },
                    { "id": 2, "url": "https://example.com/sea.jpg", "title": "Sea" }
                ]
            }"#,
        )
        .unwrap();

        let catalog = Catalog::load(&manifest).unwrap();
        assert_eq!(catalog.title, "trip");
        assert_eq!(catalog.subtitle, "Summer");

        let photos: Vec<&Photo> = catalog.photos.iter().collect();
        assert_eq!(
            photos[0].local_path(),
            Some(dir.path().join("images/beach.jpg"))
        );
        assert_eq!(photos[1].url, "/abs/mountain.jpg");
        assert_eq!(photos[2].url, "https://example.com/sea.jpg");
        // Manifest order is navigation order, not id order
        assert_eq!(photos[0].id, PhotoId(3));
    }

    #[test]
    fn test_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(Catalog::from_manifest(&missing), Err(Error::Io { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Catalog::from_manifest(&broken), Err(Error::Manifest { .. })));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{ "photos": [] }"#).unwrap();
        assert!(matches!(Catalog::from_manifest(&empty), Err(Error::EmptyGallery)));

        let duplicate = dir.path().join("duplicate.json");
        fs::write(
            &duplicate,
            r#"{ "photos": [
                { "id": 1, "url": "a.jpg", "title": "A" },
                { "id": 1, "url": "b.jpg", "title": "B" }
            ] }"#,
        )
        .unwrap();
        assert!(matches!(
            Catalog::from_manifest(&duplicate),
            Err(Error::DuplicatePhotoId(PhotoId(1)))
        ));
    }

    #[test]
    fn test_folder_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("trip")).unwrap();
        fs::write(dir.path().join("b.PNG"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("trip").join("c.webp"), b"").unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        let photos: Vec<&Photo> = catalog.photos.iter().collect();

        assert_eq!(photos.len(), 3);
        assert_eq!(photos[0].title, "a");
        assert_eq!(photos[1].title, "b");
        assert_eq!(photos[2].title, "c");
        assert_eq!(photos[2].description, "trip");
        assert_eq!(photos[0].description, "");

        let ids: Vec<u32> = photos.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.subtitle, "3 photos");
    }

    #[test]
    fn test_folder_without_images_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();
        assert!(matches!(Catalog::from_folder(dir.path()), Err(Error::EmptyGallery)));
    }

    #[tokio::test]
    async fn test_load_async_missing_path() {
        let result = load_async(PathBuf::from("/nonexistent/gallery.json")).await;
        assert!(result.is_err());
    }
}
