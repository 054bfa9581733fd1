/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The lightbox navigation core (gallery.rs)
/// - Loading galleries from manifests and folders (catalog.rs)

pub mod catalog;
pub mod data;
pub mod gallery;
