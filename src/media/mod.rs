/// Image handling for the presentation layer
///
/// This module handles:
/// - Generating thumbnails for local photos
/// - Caching thumbnails to disk

pub mod thumbnail;
