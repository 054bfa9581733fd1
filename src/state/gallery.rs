/// Lightbox navigation state
///
/// The gallery owns the photo list and the current selection. All
/// transitions go through `reduce`, a pure function of the photo list,
/// the current selection and an action, so the navigation rules can be
/// tested without any UI toolkit.
use super::data::{Photo, PhotoId, PhotoList};

/// Which photo, if any, is shown full-screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Closed,
    Open(PhotoId),
}

/// Logical navigation keys, mapped from raw keyboard input by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Advance,
    Retreat,
    Dismiss,
}

/// Input to the navigation reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(PhotoId),
    Next,
    Prev,
    Close,
    Key(NavKey),
}

/// Compute the selection that follows `selection` after `action`
pub fn reduce(photos: &PhotoList, selection: Selection, action: Action) -> Selection {
    match action {
        Action::Select(id) => {
            if photos.index_of(id).is_some() {
                Selection::Open(id)
            } else {
                tracing::warn!(%id, "ignoring selection of unknown photo");
                selection
            }
        }
        Action::Next => step(photos, selection, 1),
        Action::Prev => step(photos, selection, photos.len() - 1),
        Action::Close => Selection::Closed,
        Action::Key(NavKey::Advance) => reduce(photos, selection, Action::Next),
        Action::Key(NavKey::Retreat) => reduce(photos, selection, Action::Prev),
        Action::Key(NavKey::Dismiss) => reduce(photos, selection, Action::Close),
    }
}

/// Move `offset` positions forward, modulo the list length
fn step(photos: &PhotoList, selection: Selection, offset: usize) -> Selection {
    let Selection::Open(current) = selection else {
        return Selection::Closed;
    };

    let Some(index) = photos.index_of(current) else {
        return Selection::Closed;
    };

    let next = (index + offset) % photos.len();
    match photos.get(next) {
        Some(photo) => Selection::Open(photo.id),
        None => selection,
    }
}

/// The gallery view: a fixed photo list plus the lightbox selection
#[derive(Debug, Clone)]
pub struct Gallery {
    photos: PhotoList,
    selection: Selection,
}

impl Gallery {
    /// Create a gallery with the lightbox closed
    pub fn new(photos: PhotoList) -> Self {
        Self {
            photos,
            selection: Selection::Closed,
        }
    }

    pub fn photos(&self) -> &PhotoList {
        &self.photos
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The photo shown in the lightbox
    pub fn current(&self) -> Option<&Photo> {
        match self.selection {
            Selection::Closed => None,
            Selection::Open(id) => self.photos.find(id),
        }
    }

    /// 1-based position of the current photo and the list length
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.selection {
            Selection::Closed => None,
            Selection::Open(id) => self
                .photos
                .index_of(id)
                .map(|index| (index + 1, self.photos.len())),
        }
    }

    pub fn is_open(&self) -> bool {
        self.selection() != Selection::Closed
    }

    pub fn apply(&mut self, action: Action) {
        self.selection = reduce(&self.photos, self.selection, action);
    }

    pub fn select(&mut self, id: PhotoId) {
        self.apply(Action::Select(id));
    }

    pub fn next(&mut self) {
        self.apply(Action::Next);
    }

    pub fn prev(&mut self) {
        self.apply(Action::Prev);
    }

    pub fn close(&mut self) {
        self.apply(Action::Close);
    }

    pub fn on_key(&mut self, key: NavKey) {
        self.apply(Action::Key(key));
    }
}
