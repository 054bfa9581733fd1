use iced::widget::stack;
use iced::{keyboard, Element, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod logging;
mod media;
mod state;
mod ui;

use config::{Settings, ThemePreference};
use media::thumbnail;
use state::catalog::{self, Catalog};
use state::data::PhotoId;
use state::gallery::{Gallery, NavKey};

/// Main application state
struct PhotoGallery {
    /// Photo list and lightbox selection
    gallery: Gallery,
    title: String,
    subtitle: String,
    settings: Settings,
    /// Where generated thumbnails are cached, `None` disables thumbnails
    thumbnail_dir: Option<PathBuf>,
    thumbnails: HashMap<PhotoId, PathBuf>,
    /// Bumped whenever a new catalog is shown; results for older catalogs are dropped
    generation: u64,
    /// Bumped per background load; only the latest request may replace the gallery
    load_request: u64,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked a thumbnail
    PhotoPressed(PhotoId),
    Next,
    Prev,
    Close,
    /// A bound key was pressed while the lightbox is open
    Key(NavKey),
    /// Click on the photo inside the lightbox, swallowed so the backdrop stays open
    LightboxContentPressed,
    OpenFolder,
    OpenManifest,
    /// Background catalog load finished
    GalleryLoaded(u64, PathBuf, Result<Catalog, String>),
    /// Background thumbnail generation finished
    ThumbnailReady(u64, PhotoId, Result<PathBuf, String>),
}

impl PhotoGallery {
    /// Create a new instance of the application
    fn new(settings: Settings, catalog: Catalog, status: String) -> (Self, Task<Message>) {
        let thumbnail_dir = match thumbnail::cache_dir() {
            Ok(dir) => Some(dir),
            Err(err) => {
                tracing::warn!(error = %err, "thumbnail cache unavailable, using full images");
                None
            }
        };

        tracing::info!(title = %catalog.title, photos = catalog.photos.len(), "showing gallery");

        let Catalog {
            title,
            subtitle,
            photos,
        } = catalog;

        let app = PhotoGallery {
            gallery: Gallery::new(photos),
            title,
            subtitle,
            settings,
            thumbnail_dir,
            thumbnails: HashMap::new(),
            generation: 1,
            load_request: 0,
            status,
        };

        let task = app.thumbnail_tasks();
        (app, task)
    }

    /// Replace the gallery with a freshly loaded catalog.
    /// The lightbox starts closed for the new photo list.
    fn show_catalog(&mut self, catalog: Catalog) -> Task<Message> {
        tracing::info!(title = %catalog.title, photos = catalog.photos.len(), "showing gallery");

        self.generation += 1;
        self.title = catalog.title;
        self.subtitle = catalog.subtitle;
        self.gallery = Gallery::new(catalog.photos);
        self.thumbnails.clear();

        self.thumbnail_tasks()
    }

    /// One background task per local photo
    fn thumbnail_tasks(&self) -> Task<Message> {
        let Some(cache_dir) = self.thumbnail_dir.clone() else {
            return Task::none();
        };

        let size = self.settings.thumbnail_size;
        let generation = self.generation;

        Task::batch(self.gallery.photos().iter().filter_map(|photo| {
            let source = photo.local_path()?;
            let id = photo.id;
            Some(Task::perform(
                thumbnail::generate_async(source, size, cache_dir.clone()),
                move |result| {
                    Message::ThumbnailReady(generation, id, result.map_err(|e| e.to_string()))
                },
            ))
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Lightbox navigation goes straight to the gallery state machine
            Message::PhotoPressed(id) => self.gallery.select(id),
            Message::Next => self.gallery.next(),
            Message::Prev => self.gallery.prev(),
            Message::Close => self.gallery.close(),
            Message::Key(key) => self.gallery.on_key(key),
            Message::LightboxContentPressed => {}
            Message::OpenFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Folder with Photos")
                    .pick_folder();

                if let Some(folder) = folder {
                    return self.load(folder);
                }
            }
            Message::OpenManifest => {
                // Only JSON manifests are offered
                let file = FileDialog::new()
                    .set_title("Select Gallery Manifest")
                    .add_filter("Gallery manifest", &["json"])
                    .pick_file();

                if let Some(file) = file {
                    return self.load(file);
                }
            }
            Message::GalleryLoaded(request, path, _) if request != self.load_request => {
                // A newer load was started after this one; its result wins
                tracing::debug!(path = %path.display(), request, "dropping superseded gallery load");
            }
            Message::GalleryLoaded(_, path, Ok(catalog)) => {
                self.status = format!("Opened {}", path.display());
                return self.show_catalog(catalog);
            }
            Message::GalleryLoaded(_, path, Err(err)) => {
                // Keep showing the current gallery
                tracing::error!(path = %path.display(), error = %err, "failed to open gallery");
                self.status = format!("Could not open {}: {}", path.display(), err);
            }
            Message::ThumbnailReady(generation, id, result) => {
                // Results for a replaced gallery are ignored
                if generation != self.generation {
                    return Task::none();
                }
                match result {
                    Ok(path) => {
                        self.thumbnails.insert(id, path);
                    }
                    Err(err) => {
                        // The tile keeps showing the full image
                        tracing::warn!(%id, error = %err, "thumbnail generation failed");
                    }
                }
            }
        }

        Task::none()
    }

    /// Start loading a gallery in the background
    fn load(&mut self, path: PathBuf) -> Task<Message> {
        self.load_request += 1;
        let request = self.load_request;
        self.status = format!("Opening {}...", path.display());

        Task::perform(catalog::load_async(path.clone()), move |result| {
            Message::GalleryLoaded(request, path.clone(), result.map_err(|e| e.to_string()))
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        // Thumbnail grid is always rendered underneath
        let grid = ui::grid::GridView {
            title: &self.title,
            subtitle: &self.subtitle,
            status: &self.status,
            photos: self.gallery.photos(),
            thumbnails: &self.thumbnails,
            tile_size: self.settings.thumbnail_size as f32,
            spacing: self.settings.grid_spacing,
        }
        .view();

        // Layer the lightbox over the grid while a photo is open
        match (self.gallery.current(), self.gallery.position()) {
            (Some(photo), Some(position)) => stack![grid, ui::lightbox::view(photo, position)].into(),
            _ => grid,
        }
    }

    /// Keyboard navigation is only live while the lightbox is open
    fn subscription(&self) -> Subscription<Message> {
        if self.gallery.is_open() {
            keyboard::on_key_press(ui::keys::on_key_press)
        } else {
            Subscription::none()
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.settings.theme {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }
}

/// Pick the catalog shown at startup.
///
/// A gallery that fails to load is reported and replaced by the built-in one.
fn startup_catalog(requested: Option<PathBuf>) -> error::Result<(Catalog, String)> {
    let Some(path) = requested else {
        return Ok((Catalog::builtin()?, "Showing the sample gallery.".to_string()));
    };

    match Catalog::load(&path) {
        Ok(catalog) => Ok((catalog, format!("Opened {}", path.display()))),
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "failed to open gallery");
            Ok((
                Catalog::builtin()?,
                format!(
                    "Could not open {}: {}. Showing the sample gallery.",
                    path.display(),
                    err
                ),
            ))
        }
    }
}

fn main() -> ExitCode {
    logging::init();

    let args = match cli::Args::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n\n{}", err, cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        print!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    }

    let mut settings = Settings::load();
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }

    let requested = args.gallery.or_else(|| settings.gallery.clone());
    let (catalog, status) = match startup_catalog(requested) {
        Ok(startup) => startup,
        Err(err) => {
            tracing::error!(error = %err, "no gallery to show");
            return ExitCode::FAILURE;
        }
    };

    let result = iced::application(PhotoGallery::title, PhotoGallery::update, PhotoGallery::view)
        .subscription(PhotoGallery::subscription)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(move || PhotoGallery::new(settings, catalog, status));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application error");
            ExitCode::FAILURE
        }
    }
}
