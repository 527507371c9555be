//! Image galleries
//!
//! One gallery per panel. Items are keyed by the server-assigned filename and kept
//! in insertion order; the fronts render straight from this list, so a removed
//! filename can never leave a node behind.

use crate::api::UPLOADS_URL_PREFIX;
use crate::types::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryId {
    Pdf,
    Manual,
}

impl GalleryId {
    /// DOM id of the gallery container
    pub fn dom_id(&self) -> &'static str {
        match self {
            GalleryId::Pdf => "imageGalleryPDF",
            GalleryId::Manual => "imageGalleryManual",
        }
    }
}

impl From<Mode> for GalleryId {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pdf => GalleryId::Pdf,
            Mode::Manual => GalleryId::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub filename: String,
}

impl GalleryItem {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into() }
    }

    /// Path the backend serves the image from
    pub fn url(&self) -> String {
        format!("{}{}", UPLOADS_URL_PREFIX, self.filename)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn push(&mut self, filename: impl Into<String>) {
        self.items.push(GalleryItem::new(filename));
    }

    /// Swap the whole list, e.g. for the images of an already persisted listing
    pub fn replace_all(&mut self, filenames: impl IntoIterator<Item = String>) {
        self.items = filenames.into_iter().map(GalleryItem::new).collect();
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.items.iter().any(|item| item.filename == filename)
    }

    /// Remove the item with this filename. Returns `false` if there was none.
    pub fn remove(&mut self, filename: &str) -> bool {
        match self.items.iter().position(|item| item.filename == filename) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
