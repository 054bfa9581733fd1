/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog loader, the navigation core and the UI layer.
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Stable identity of a photo within one gallery
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PhotoId(pub u32);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single photo in the gallery
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    /// Location of the image: a local path, a `file://` URL or a remote URL
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Photo {
    /// Whether the image lives behind a network URL
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim();
        has_scheme(url, "http://") || has_scheme(url, "https://")
    }

    /// Filesystem location of the image, `None` for remote photos
    pub fn local_path(&self) -> Option<PathBuf> {
        if self.is_remote() {
            return None;
        }

        let url = self.url.trim();
        let path = if has_scheme(url, "file://") {
            &url["file://".len()..]
        } else {
            url
        };

        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

fn has_scheme(url: &str, scheme: &str) -> bool {
    url.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

/// Non-empty, ordered list of photos with unique ids.
///
/// The order is the navigation order of the lightbox. The list is never
/// mutated once built, so any id taken from it stays valid for the
/// lifetime of the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoList(Vec<Photo>);

#[allow(clippy::len_without_is_empty)]
impl PhotoList {
    /// Build a photo list, rejecting empty lists and duplicate ids
    pub fn new(photos: Vec<Photo>) -> Result<Self> {
        if photos.is_empty() {
            return Err(Error::EmptyGallery);
        }

        let mut seen = HashSet::with_capacity(photos.len());
        for photo in &photos {
            if !seen.insert(photo.id) {
                return Err(Error::DuplicatePhotoId(photo.id));
            }
        }

        Ok(PhotoList(photos))
    }

    /// Number of photos, always at least one
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.0.get(index)
    }

    /// Position of the photo with the given id
    pub fn index_of(&self, id: PhotoId) -> Option<usize> {
        self.0.iter().position(|photo| photo.id == id)
    }

    pub fn find(&self, id: PhotoId) -> Option<&Photo> {
        self.0.iter().find(|photo| photo.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Photo> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: u32, url: &str) -> Photo {
        Photo {
            id: PhotoId(id),
            url: url.to_string(),
            title: format!("Photo {}", id),
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(matches!(PhotoList::new(vec![]), Err(Error::EmptyGallery)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = PhotoList::new(vec![photo(1, "a.jpg"), photo(2, "b.jpg"), photo(1, "c.jpg")]);
        assert!(matches!(result, Err(Error::DuplicatePhotoId(PhotoId(1)))));
    }

    #[test]
    fn test_index_lookup() {
        let list = PhotoList::new(vec![photo(10, "a.jpg"), photo(20, "b.jpg")]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of(PhotoId(20)), Some(1));
        assert_eq!(list.index_of(PhotoId(30)), None);
        assert_eq!(list.find(PhotoId(10)).map(|p| p.url.as_str()), Some("a.jpg"));
    }

    #[test]
    fn test_local_path() {
        assert_eq!(
            photo(1, "/photos/a.jpg").local_path(),
            Some(PathBuf::from("/photos/a.jpg"))
        );
        assert_eq!(
            photo(1, "file:///photos/b.png").local_path(),
            Some(PathBuf::from("/photos/b.png"))
        );
        assert_eq!(photo(1, "https://example.com/c.jpg").local_path(), None);
        assert_eq!(photo(1, "HTTP://example.com/c.jpg").local_path(), None);
        assert_eq!(photo(1, "   ").local_path(), None);
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let json = r#"{ "id": 7, "url": "x.jpg", "title": "X" }"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, PhotoId(7));
        assert!(photo.description.is_empty());
    }
}
