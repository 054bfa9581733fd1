use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use image::imageops::FilterType;
use image::ImageFormat;

use crate::error::{Error, Result};

/// Default edge length of generated thumbnails (square bound)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Get the thumbnail cache directory, creating it if needed.
/// Returns ~/.cache/photo-gallery/thumbnails on Linux
pub fn cache_dir() -> Result<PathBuf> {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);

    path.push("photo-gallery");
    path.push("thumbnails");

    fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

/// Cache file name for a source image.
///
/// The key changes whenever the source file is replaced or edited, so stale
/// thumbnails are never served. blake3 keeps keys identical across builds;
/// the cache has no eviction.
fn cache_key(source: &Path, size: u32) -> Result<String> {
    let metadata = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|since| since.as_nanos())
        .unwrap_or_default();

    let mut hasher = blake3::Hasher::new();
    hasher.update(source.to_string_lossy().as_bytes());
    hasher.update(&metadata.len().to_le_bytes());
    hasher.update(&modified.to_le_bytes());
    hasher.update(&size.to_le_bytes());

    let hash = hasher.finalize().to_hex();
    Ok(format!("{}.jpg", &hash.as_str()[..16]))
}

/// Generate (or reuse) the thumbnail for a local image.
/// Returns the path to the cached JPEG
pub fn generate(source: &Path, size: u32, cache_dir: &Path) -> Result<PathBuf> {
    let thumbnail_path = cache_dir.join(cache_key(source, size)?);

    if thumbnail_path.exists() {
        if image::image_dimensions(&thumbnail_path).is_ok() {
            tracing::debug!(path = %thumbnail_path.display(), "thumbnail cache hit");
            return Ok(thumbnail_path);
        }

        tracing::warn!(path = %thumbnail_path.display(), "discarding unreadable cached thumbnail");
        fs::remove_file(&thumbnail_path).map_err(|e| Error::io(&thumbnail_path, e))?;
    }

    let img = image::open(source)?;
    let thumbnail = img.resize(size, size, FilterType::Lanczos3);

    // Encode into a staging file next to the cache entry, then move it into
    // place; a failed write never leaves a partial file under the key.
    // The staging file is deleted on drop if anything below fails.
    let mut staging = tempfile::Builder::new()
        .suffix(".tmp")
        .tempfile_in(cache_dir)
        .map_err(|e| Error::io(cache_dir, e))?;
    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        // JPEG has no alpha channel
        thumbnail.to_rgb8().write_to(&mut writer, ImageFormat::Jpeg)?;
        writer.flush().map_err(|e| Error::io(&thumbnail_path, e))?;
    }
    staging
        .persist(&thumbnail_path)
        .map_err(|e| Error::io(&thumbnail_path, e.error))?;

    tracing::debug!(
        source = %source.display(),
        path = %thumbnail_path.display(),
        "generated thumbnail"
    );
    Ok(thumbnail_path)
}

/// Generate a thumbnail on the blocking pool, image decoding is CPU-bound
pub async fn generate_async(source: PathBuf, size: u32, cache_dir: PathBuf) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || generate(&source, size, &cache_dir)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn write_sample(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_generate_keeps_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "wide.png", 64, 32);

        let thumbnail = generate(&source, 16, dir.path()).unwrap();
        let (width, height) = image::open(&thumbnail).unwrap().dimensions();

        assert_eq!(width, 16);
        assert_eq!(height, 8);
    }

    #[test]
    fn test_generate_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "photo.png", 20, 20);

        let first = generate(&source, 8, dir.path()).unwrap();
        let second = generate(&source, 8, dir.path()).unwrap();
        assert_eq!(first, second);

        // A different size is a different cache entry
        let other = generate(&source, 4, dir.path()).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_generate_replaces_broken_cache_entry() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "photo.png", 20, 20);

        let first = generate(&source, 8, dir.path()).unwrap();
        fs::write(&first, b"\xFF\xD8trunc").unwrap();

        let second = generate(&source, 8, dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(image::open(&second).is_ok());
    }

    #[test]
    fn test_generate_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "photo.png", 20, 20);
        generate(&source, 8, dir.path()).unwrap();

        let garbage = dir.path().join("garbage.jpg");
        fs::write(&garbage, b"definitely not a jpeg").unwrap();
        assert!(generate(&garbage, 8, dir.path()).is_err());

        let staging = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(staging, 0);
    }

    #[test]
    fn test_cache_key_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "photo.png", 4, 4);

        let key = cache_key(&source, 8).unwrap();
        assert_eq!(key, cache_key(&source, 8).unwrap());
        assert_eq!(key.len(), "0123456789abcdef.jpg".len());
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_generate_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.jpg");
        assert!(matches!(generate(&missing, 8, dir.path()), Err(Error::Io { .. })));

        let garbage = dir.path().join("garbage.jpg");
        fs::write(&garbage, b"definitely not a jpeg").unwrap();
        assert!(matches!(generate(&garbage, 8, dir.path()), Err(Error::Image(_))));
    }

    #[tokio::test]
    async fn test_generate_async() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path(), "async.png", 10, 10);

        let result = generate_async(source, 8, dir.path().to_path_buf()).await;
        assert!(result.unwrap().exists());
    }
}
