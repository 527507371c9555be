//! Villa Admin Common Library
//!
//! Shared by the terminal front and the browser (WASM) front: the listing model,
//! the admin endpoint contracts and the intake controller that drives them.
//!
//! Docs and logs are in English; everything shown to the user is French, as the
//! backend's own messages are (see [`messages`]).

pub mod types;
pub mod error;
pub mod messages;
pub mod api;
pub mod extraction;
pub mod gallery;
pub mod reset;
pub mod surface;
pub mod controller;

#[cfg(test)]
mod mock;

pub use types::{ExtractedFields, FieldName, Listing, Mode};
pub use error::{Error, Result};
pub use api::{FormPart, Reply, Transport, CONFIRMATION_PHRASE};
pub use extraction::{ExtractionCache, Hydration};
pub use gallery::{Gallery, GalleryId, GalleryItem};
pub use reset::{phrase_matches, ModalState, ResetModal};
pub use surface::{Control, FileInput, PdfStatus, Surface};
pub use controller::{IntakeController, Outcome, Rejection, UploadReport};
