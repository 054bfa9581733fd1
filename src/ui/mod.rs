/// User interface components
///
/// - `grid.rs` - header and thumbnail grid
/// - `lightbox.rs` - full-screen overlay for the selected photo
/// - `keys.rs` - raw keyboard input to navigation keys

pub mod grid;
pub mod keys;
pub mod lightbox;
