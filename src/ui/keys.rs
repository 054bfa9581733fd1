use iced::keyboard::{key::Named, Key, Modifiers};

use crate::state::gallery::NavKey;
use crate::Message;

/// Map a raw key to a lightbox navigation key.
/// Keys without a binding return `None` and never reach the gallery.
pub fn nav_key(key: &Key) -> Option<NavKey> {
    match key {
        Key::Named(Named::ArrowRight) => Some(NavKey::Advance),
        Key::Named(Named::ArrowLeft) => Some(NavKey::Retreat),
        Key::Named(Named::Escape) => Some(NavKey::Dismiss),
        _ => None,
    }
}

/// Key press handler for `iced::keyboard::on_key_press`
pub fn on_key_press(key: Key, _modifiers: Modifiers) -> Option<Message> {
    nav_key(&key).map(Message::Key)
}
