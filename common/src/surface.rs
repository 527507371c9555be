//! Presentation seam
//!
//! Everything the controller shows or asks goes through [`Surface`]. The browser
//! front backs it with signals and `window.alert`/`window.confirm`; the terminal
//! front with stdout and dialoguer prompts.

use crate::gallery::{GalleryId, GalleryItem};
use crate::messages;
use crate::types::Mode;

/// A control that goes busy while its request is in flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    SavePdf,
    SaveForm,
    /// AI button of the named field
    Enhance(String),
    ConfirmReset,
}

impl Control {
    pub fn label(&self, busy: bool) -> &'static str {
        match (self, busy) {
            (Control::SavePdf | Control::SaveForm, false) => messages::SAVE_LABEL,
            (Control::SavePdf | Control::SaveForm, true) => messages::SAVE_BUSY_LABEL,
            (Control::Enhance(_), false) => messages::ENHANCE_LABEL,
            (Control::Enhance(_), true) => messages::ENHANCE_BUSY_LABEL,
            (Control::ConfirmReset, false) => messages::RESET_LABEL,
            (Control::ConfirmReset, true) => messages::RESET_BUSY_LABEL,
        }
    }
}

/// A file input the controller clears after use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileInput {
    Pdf,
    Images(GalleryId),
}

/// Status line of the PDF panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfStatus {
    Analyzing,
    /// Stored for a later save
    Extracted,
    /// Written into the form
    Hydrated,
    /// Server-reported failure
    Failed(String),
    NetworkError(String),
}

impl PdfStatus {
    pub fn text(&self) -> String {
        match self {
            PdfStatus::Analyzing => messages::PDF_ANALYZING.to_string(),
            PdfStatus::Extracted => messages::PDF_EXTRACTED.to_string(),
            PdfStatus::Hydrated => messages::PDF_HYDRATED.to_string(),
            PdfStatus::Failed(error) => messages::failure(error),
            PdfStatus::NetworkError(error) => messages::network_failure(error),
        }
    }

    /// CSS class of the status block
    pub fn css_class(&self) -> &'static str {
        match self {
            PdfStatus::Analyzing => "pdf-loading",
            PdfStatus::Extracted | PdfStatus::Hydrated => "pdf-success",
            PdfStatus::Failed(_) | PdfStatus::NetworkError(_) => "pdf-error",
        }
    }
}

pub trait Surface {
    /// Mark `mode`'s panel and selector active, the other pair inactive
    fn show_mode(&self, mode: Mode);

    fn pdf_status(&self, status: PdfStatus);

    fn clear_file_input(&self, input: FileInput);

    /// Blocking notice
    fn alert(&self, message: &str);

    /// Blocking yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Disable the control and swap its label, or restore both
    fn set_busy(&self, control: &Control, busy: bool);

    fn render_gallery(&self, gallery: GalleryId, items: &[GalleryItem]);

    /// Current value of the input with this id, empty if there is none
    fn field_value(&self, field: &str) -> String;

    fn set_field_value(&self, field: &str, value: &str);

    /// Show or hide the reset modal. Opening clears and focuses its input.
    fn show_reset_modal(&self, open: bool);

    /// Text typed into the reset modal
    fn reset_phrase(&self) -> String;

    /// Reload the page so it reflects what was just persisted
    fn reload(&self);
}

/// Restores a control when dropped, whatever path the operation took
pub(crate) struct BusyGuard<'a, S: Surface> {
    surface: &'a S,
    control: Control,
}

impl<'a, S: Surface> BusyGuard<'a, S> {
    pub(crate) fn engage(surface: &'a S, control: Control) -> Self {
        surface.set_busy(&control, true);
        Self { surface, control }
    }
}

impl<S: Surface> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_busy(&self.control, false);
    }
}

/// Clears a file input when dropped
pub(crate) struct InputReset<'a, S: Surface> {
    surface: &'a S,
    input: FileInput,
}

impl<'a, S: Surface> InputReset<'a, S> {
    pub(crate) fn new(surface: &'a S, input: FileInput) -> Self {
        Self { surface, input }
    }
}

impl<S: Surface> Drop for InputReset<'_, S> {
    fn drop(&mut self) {
        self.surface.clear_file_input(self.input);
    }
}
