//! Intake controller
//!
//! Single implementation of every panel action (mode switch, PDF extraction and
//! save, form save, gallery upload/delete, field enhancement, reset), parameterized
//! by the front's [`Transport`] and [`Surface`].
//!
//! All state lives in `Cell`/`RefCell`s so handlers can share the controller
//! behind an `Rc`; no borrow is held across an `.await`.

use crate::api::{self, FormPart, Reply, Transport, CONFIRMATION_PHRASE};
use crate::extraction::{ExtractionCache, Hydration};
use crate::gallery::{Gallery, GalleryId, GalleryItem};
use crate::messages;
use crate::reset::{phrase_matches, ModalState, ResetModal};
use crate::surface::{BusyGuard, Control, FileInput, InputReset, PdfStatus, Surface};
use crate::types::{ExtractedFields, FieldName, Listing, Mode};
use std::cell::{Cell, RefCell};
use tracing::{debug, info, warn};

/// Client-side precondition that stopped an action before any request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoFile,
    EmptyExtraction,
    EmptyText,
    PhraseMismatch,
}

/// How an action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user answered no to a confirmation
    Declined,
    /// Completed without anything to apply
    NoChange,
    Rejected(Rejection),
    /// Server reported `success: false`; carries its error text
    Failed(String),
    /// No usable response
    NetworkError(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    /// Whether a request reached the server and came back with a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::NetworkError(_))
    }
}

/// Result of a multi-file upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Server filenames, in upload order
    pub uploaded: Vec<String>,
    /// One entry per file, in selection order
    pub outcomes: Vec<Outcome>,
}

impl UploadReport {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            uploaded: Vec::new(),
            outcomes: vec![Outcome::Rejected(rejection)],
        }
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

pub struct IntakeController<T: Transport, S: Surface> {
    transport: T,
    surface: S,
    hydration: Hydration,
    mode: Cell<Mode>,
    extraction: RefCell<ExtractionCache>,
    pdf_gallery: RefCell<Gallery>,
    manual_gallery: RefCell<Gallery>,
    reset: RefCell<ResetModal>,
}

impl<T: Transport, S: Surface> IntakeController<T, S> {
    pub fn new(transport: T, surface: S, initial_mode: Mode) -> Self {
        surface.show_mode(initial_mode);
        Self {
            transport,
            surface,
            hydration: Hydration::default(),
            mode: Cell::new(initial_mode),
            extraction: RefCell::new(ExtractionCache::default()),
            pdf_gallery: RefCell::new(Gallery::default()),
            manual_gallery: RefCell::new(Gallery::default()),
            reset: RefCell::new(ResetModal::default()),
        }
    }

    pub fn with_hydration(mut self, hydration: Hydration) -> Self {
        self.hydration = hydration;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Fields waiting for the PDF-mode save
    pub fn extracted(&self) -> Option<ExtractedFields> {
        self.extraction.borrow().get().cloned()
    }

    pub fn gallery_items(&self, gallery: GalleryId) -> Vec<GalleryItem> {
        self.gallery(gallery).borrow().items().to_vec()
    }

    pub fn reset_state(&self) -> ModalState {
        self.reset.borrow().state()
    }

    fn gallery(&self, gallery: GalleryId) -> &RefCell<Gallery> {
        match gallery {
            GalleryId::Pdf => &self.pdf_gallery,
            GalleryId::Manual => &self.manual_gallery,
        }
    }

    fn render(&self, gallery: GalleryId) {
        let items = self.gallery_items(gallery);
        self.surface.render_gallery(gallery, &items);
    }

    // ========== Mode ==========

    /// Activate one workflow. Unrecognized values select manual.
    /// The extraction cache and galleries are left alone.
    pub fn switch_mode(&self, mode: impl Into<Mode>) {
        let mode = mode.into();
        debug!(%mode, "switching mode");
        self.mode.set(mode);
        self.surface.show_mode(mode);
    }

    // ========== PDF extraction ==========

    /// Send a PDF to the extraction endpoint.
    ///
    /// The status line switches to "analyzing" before the request goes out (the
    /// remote extraction takes 30-90 seconds), and the file input is cleared
    /// afterwards whatever happened.
    pub async fn upload_pdf(&self, file: Option<&T::File>) -> Outcome {
        let Some(file) = file else {
            self.surface.alert(messages::PDF_FILE_REQUIRED);
            return Outcome::Rejected(Rejection::NoFile);
        };
        let _clear = InputReset::new(&self.surface, FileInput::Pdf);
        self.surface.pdf_status(PdfStatus::Analyzing);

        debug!(path = api::UPLOAD_PDF_PATH, "uploading pdf");
        let parts = vec![FormPart::File { name: "pdf", file }];
        match self.transport.post_multipart(api::UPLOAD_PDF_PATH, parts).await {
            Ok(body) => match api::decode_extraction(&body) {
                Reply::Success(fields) => {
                    info!(fields = fields.len(), hydration = self.hydration.as_str(), "pdf extracted");
                    match self.hydration {
                        Hydration::Deferred => {
                            self.extraction.borrow_mut().store(fields);
                            self.surface.pdf_status(PdfStatus::Extracted);
                        }
                        Hydration::Immediate => {
                            self.hydrate_form(&fields);
                            self.surface.pdf_status(PdfStatus::Hydrated);
                        }
                    }
                    Outcome::Done
                }
                Reply::Failure(error) => {
                    warn!(%error, "pdf extraction refused");
                    self.surface.pdf_status(PdfStatus::Failed(error.clone()));
                    Outcome::Failed(error)
                }
            },
            Err(e) => {
                let text = e.user_text();
                warn!(error = %text, "pdf upload failed");
                self.surface.pdf_status(PdfStatus::NetworkError(text.clone()));
                Outcome::NetworkError(text)
            }
        }
    }

    /// Write every known field into its input; absent fields become empty.
    pub fn hydrate_form(&self, fields: &ExtractedFields) {
        for field in FieldName::ALL {
            self.surface
                .set_field_value(field.as_str(), fields.get(field).unwrap_or(""));
        }
    }

    // ========== Save ==========

    /// Save whatever the active workflow holds
    pub async fn save(&self) -> Outcome {
        match self.mode() {
            Mode::Pdf => self.save_extracted().await,
            Mode::Manual => self.save_form().await,
        }
    }

    /// Persist the cached extraction, then reload. The cache is cleared on success
    /// so a second click cannot resend stale data.
    pub async fn save_extracted(&self) -> Outcome {
        let pairs = self.extraction.borrow().save_pairs();
        let Some(pairs) = pairs else {
            self.surface.alert(messages::PDF_REQUIRED);
            return Outcome::Rejected(Rejection::EmptyExtraction);
        };

        let outcome = self.post_save(Control::SavePdf, pairs).await;
        if outcome.is_done() {
            self.extraction.borrow_mut().clear();
            self.surface.reload();
        }
        outcome
    }

    /// Persist the live form, then reload. Blank inputs are left out.
    pub async fn save_form(&self) -> Outcome {
        let pairs: Vec<(&'static str, String)> = FieldName::ALL
            .iter()
            .filter_map(|field| {
                let value = self.surface.field_value(field.as_str());
                if value.trim().is_empty() {
                    None
                } else {
                    Some((field.as_str(), value))
                }
            })
            .collect();

        let outcome = self.post_save(Control::SaveForm, pairs).await;
        if outcome.is_done() {
            self.surface.reload();
        }
        outcome
    }

    async fn post_save(&self, control: Control, pairs: Vec<(&'static str, String)>) -> Outcome {
        let _busy = BusyGuard::engage(&self.surface, control);

        debug!(path = api::SAVE_PATH, fields = pairs.len(), "saving listing");
        let parts: Vec<FormPart<'_, T::File>> = pairs
            .into_iter()
            .map(|(name, value)| FormPart::Text { name, value })
            .collect();

        match self.transport.post_multipart(api::SAVE_PATH, parts).await {
            Ok(body) => match api::decode_message(&body) {
                Reply::Success(message) => {
                    info!("listing saved");
                    self.surface.alert(&messages::success(&message));
                    Outcome::Done
                }
                Reply::Failure(error) => {
                    warn!(%error, "save refused");
                    self.surface.alert(&messages::failure(&error));
                    Outcome::Failed(error)
                }
            },
            Err(e) => {
                let text = e.user_text();
                warn!(error = %text, "save failed");
                self.surface.alert(&messages::network_failure(&text));
                Outcome::NetworkError(text)
            }
        }
    }

    // ========== Gallery ==========

    /// Upload into the gallery of the active workflow
    pub async fn upload_images_to_active(&self, files: &[T::File]) -> UploadReport {
        self.upload_images(files, self.mode().into()).await
    }

    /// Upload files one at a time, in order.
    ///
    /// Each item is appended only once its own upload succeeded; a failure is
    /// reported for that file and the batch carries on.
    pub async fn upload_images(&self, files: &[T::File], gallery: GalleryId) -> UploadReport {
        if files.is_empty() {
            self.surface.alert(messages::IMAGES_REQUIRED);
            return UploadReport::rejected(Rejection::NoFile);
        }
        let _clear = InputReset::new(&self.surface, FileInput::Images(gallery));

        let mut report = UploadReport::default();
        for (index, file) in files.iter().enumerate() {
            debug!(path = api::UPLOAD_IMAGE_PATH, index, "uploading image");
            let parts = vec![FormPart::File { name: "image", file }];
            let outcome = match self.transport.post_multipart(api::UPLOAD_IMAGE_PATH, parts).await {
                Ok(body) => match api::decode_upload(&body) {
                    Reply::Success(filename) => {
                        self.gallery(gallery).borrow_mut().push(filename.clone());
                        self.render(gallery);
                        report.uploaded.push(filename);
                        Outcome::Done
                    }
                    Reply::Failure(error) => {
                        warn!(%error, index, "image refused");
                        self.surface.alert(&messages::upload_failure(&error));
                        Outcome::Failed(error)
                    }
                },
                Err(e) => {
                    let text = e.user_text();
                    warn!(error = %text, index, "image upload failed");
                    self.surface.alert(&messages::network_failure(&text));
                    Outcome::NetworkError(text)
                }
            };
            report.outcomes.push(outcome);
        }

        info!(uploaded = report.uploaded.len(), failed = report.failed(), "image batch done");
        report
    }

    /// Delete an image after the user confirms. The gallery item goes only once
    /// the server agreed; a filename not shown anywhere is not an error.
    pub async fn delete_image(&self, filename: &str) -> Outcome {
        if !self.surface.confirm(messages::DELETE_IMAGE_CONFIRM) {
            return Outcome::Declined;
        }

        let path = api::delete_image_path(filename);
        debug!(%path, "deleting image");
        match self.transport.post_empty(&path).await {
            Ok(body) => match api::decode_ack(&body) {
                Reply::Success(()) => {
                    self.forget_image(filename);
                    Outcome::Done
                }
                Reply::Failure(error) => {
                    warn!(%error, filename, "delete refused");
                    self.surface.alert(&messages::delete_failure(&error));
                    Outcome::Failed(error)
                }
            },
            Err(e) => {
                let text = e.user_text();
                warn!(error = %text, filename, "delete failed");
                self.surface.alert(&messages::network_failure(&text));
                Outcome::NetworkError(text)
            }
        }
    }

    /// A listing seeds both galleries, so the file may be shown twice
    fn forget_image(&self, filename: &str) {
        let mut shown = false;
        for gallery in [GalleryId::Pdf, GalleryId::Manual] {
            let removed = self.gallery(gallery).borrow_mut().remove(filename);
            if removed {
                self.render(gallery);
                shown = true;
            }
        }
        if !shown {
            debug!(filename, "deleted image was not displayed");
        }
    }

    // ========== Enhancement ==========

    /// Ask the text service to rewrite a field; the field changes only if the user
    /// accepts the proposal.
    pub async fn enhance_field(&self, field_id: &str) -> Outcome {
        let current = self.surface.field_value(field_id);
        let text = current.trim();
        if text.is_empty() {
            self.surface.alert(messages::TEXT_REQUIRED);
            return Outcome::Rejected(Rejection::EmptyText);
        }

        let _busy = BusyGuard::engage(&self.surface, Control::Enhance(field_id.to_string()));
        debug!(path = api::ENHANCE_PATH, field = field_id, "enhancing field");
        let body = api::enhance_body(text, field_id);
        match self.transport.post_json(api::ENHANCE_PATH, &body).await {
            Ok(reply) => match api::decode_enhanced(&reply) {
                Ok(Some(enhanced)) => {
                    if self.surface.confirm(&messages::enhance_confirm(&enhanced)) {
                        self.surface.set_field_value(field_id, &enhanced);
                        Outcome::Done
                    } else {
                        Outcome::Declined
                    }
                }
                Ok(None) => Outcome::NoChange,
                Err(error) => {
                    self.surface.alert(&messages::enhance_failure(&error));
                    Outcome::Failed(error)
                }
            },
            Err(e) => {
                let text = e.user_text();
                warn!(error = %text, "enhance failed");
                self.surface.alert(&messages::enhance_failure(&text));
                Outcome::NetworkError(text)
            }
        }
    }

    // ========== Reset ==========

    pub fn open_reset_modal(&self) {
        self.reset.borrow_mut().open();
        self.surface.show_reset_modal(true);
    }

    pub fn close_reset_modal(&self) {
        self.reset.borrow_mut().close();
        self.surface.show_reset_modal(false);
    }

    /// Wipe everything once the typed phrase matches. The modal closes after any
    /// attempt that reached the server.
    pub async fn confirm_reset(&self) -> Outcome {
        if !phrase_matches(&self.surface.reset_phrase()) {
            self.surface.alert(messages::PHRASE_REQUIRED);
            return Outcome::Rejected(Rejection::PhraseMismatch);
        }

        let outcome = {
            let _busy = BusyGuard::engage(&self.surface, Control::ConfirmReset);
            debug!(path = api::RESET_PATH, "resetting all data");
            let parts: Vec<FormPart<'_, T::File>> = vec![FormPart::Text {
                name: "confirmation",
                value: CONFIRMATION_PHRASE.to_string(),
            }];
            match self.transport.post_multipart(api::RESET_PATH, parts).await {
                Ok(body) => match api::decode_message(&body) {
                    Reply::Success(message) => {
                        info!("all data wiped");
                        self.surface.alert(&messages::success(&message));
                        Outcome::Done
                    }
                    Reply::Failure(error) => {
                        warn!(%error, "reset refused");
                        self.surface.alert(&messages::failure(&error));
                        Outcome::Failed(error)
                    }
                },
                Err(e) => {
                    let text = e.user_text();
                    self.surface.alert(&messages::network_failure(&text));
                    Outcome::NetworkError(text)
                }
            }
        };

        self.close_reset_modal();
        if outcome.is_done() {
            self.surface.reload();
        }
        outcome
    }

    // ========== Current listing ==========

    /// Pre-fill the form and both galleries from the persisted listing
    pub async fn load_listing(&self) -> Outcome {
        debug!(path = api::LISTING_PATH, "loading listing");
        match self.transport.get_json(api::LISTING_PATH).await {
            Ok(body) => match api::decode_listing(&body) {
                Some(listing) => {
                    self.apply_listing(&listing);
                    Outcome::Done
                }
                None => {
                    debug!("no listing yet");
                    Outcome::NoChange
                }
            },
            Err(e) => {
                let text = e.user_text();
                warn!(error = %text, "listing unavailable");
                Outcome::NetworkError(text)
            }
        }
    }

    fn apply_listing(&self, listing: &Listing) {
        self.hydrate_form(&listing.fields);
        for gallery in [GalleryId::Pdf, GalleryId::Manual] {
            {
                let mut items = self.gallery(gallery).borrow_mut();
                items.replace_all(listing.images.iter().cloned());
            }
            self.render(gallery);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, MockSurface, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    type Controller = IntakeController<MockTransport, MockSurface>;

    fn controller(transport: MockTransport, surface: MockSurface) -> Controller {
        IntakeController::new(transport, surface, Mode::Manual)
    }

    fn extraction_reply() -> serde_json::Value {
        json!({
            "success": true,
            "data": {
                "reference": "VM-001",
                "title": "Villa Test",
                "price": "",
                "location": "Marrakech",
            }
        })
    }

    fn pdf() -> String {
        "villa.pdf".to_string()
    }

    // ----- mode -----

    #[test]
    fn test_switch_mode_marks_exactly_one_panel() {
        let c = controller(MockTransport::new(), MockSurface::new());
        for mode in [Mode::Pdf, Mode::Manual] {
            c.switch_mode(mode.as_str());
            assert_eq!(c.mode(), mode);
            assert_eq!(c.surface().events.borrow().last(), Some(&Event::ShowMode(mode)));
        }
        assert_eq!(c.transport().call_count(), 0);
    }

    #[test]
    fn test_switch_mode_unknown_value_falls_back_to_manual() {
        let c = IntakeController::new(MockTransport::new(), MockSurface::new(), Mode::Pdf);
        c.switch_mode("gallery");
        assert_eq!(c.mode(), Mode::Manual);
    }

    #[test]
    fn test_switch_mode_keeps_extraction_and_galleries() {
        let transport = MockTransport::new()
            .reply(extraction_reply())
            .reply(json!({"success": true, "filename": "fa.jpg"}));
        let c = controller(transport, MockSurface::new());
        c.switch_mode("pdf");
        block_on(c.upload_pdf(Some(&pdf())));
        block_on(c.upload_images(&["a.jpg".to_string()], GalleryId::Pdf));

        c.switch_mode("manual");
        assert!(c.extracted().is_some());
        assert_eq!(c.gallery_items(GalleryId::Pdf).len(), 1);
    }

    // ----- pdf extraction -----

    #[test]
    fn test_upload_pdf_deferred_stores_extraction() {
        let c = controller(MockTransport::new().reply(extraction_reply()), MockSurface::new());
        let outcome = block_on(c.upload_pdf(Some(&pdf())));

        assert_eq!(outcome, Outcome::Done);
        let call = c.transport().last_call().unwrap();
        assert_eq!(call.path, "/admin/upload-pdf");
        assert_eq!(call.files, vec![("pdf".to_string(), "villa.pdf".to_string())]);

        let extracted = c.extracted().unwrap();
        assert_eq!(extracted.get(FieldName::Reference), Some("VM-001"));
        assert!(c.surface().saw(&Event::Status(PdfStatus::Extracted)));
    }

    #[test]
    fn test_upload_pdf_shows_progress_before_request_and_clears_input() {
        let c = controller(MockTransport::new().reply(extraction_reply()), MockSurface::new());
        block_on(c.upload_pdf(Some(&pdf())));

        let events = c.surface().events.borrow();
        let analyzing = events.iter().position(|e| *e == Event::Status(PdfStatus::Analyzing));
        let extracted = events.iter().position(|e| *e == Event::Status(PdfStatus::Extracted));
        assert!(analyzing.unwrap() < extracted.unwrap());
        assert_eq!(events.last(), Some(&Event::ClearInput(FileInput::Pdf)));
    }

    #[test]
    fn test_upload_pdf_immediate_hydrates_every_field() {
        let c = controller(MockTransport::new().reply(extraction_reply()), MockSurface::new())
            .with_hydration(Hydration::Immediate);
        block_on(c.upload_pdf(Some(&pdf())));

        assert!(c.extracted().is_none());
        let fields = c.surface().fields.borrow();
        assert_eq!(fields.get("title").map(String::as_str), Some("Villa Test"));
        assert_eq!(fields.get("description").map(String::as_str), Some(""));
        assert_eq!(fields.len(), FieldName::ALL.len());
    }

    #[test]
    fn test_upload_pdf_server_error() {
        let transport = MockTransport::new().reply(json!({"error": "File must be a PDF"}));
        let c = controller(transport, MockSurface::new());
        let outcome = block_on(c.upload_pdf(Some(&pdf())));

        assert_eq!(outcome, Outcome::Failed("File must be a PDF".to_string()));
        assert!(c.surface().saw(&Event::Status(PdfStatus::Failed("File must be a PDF".to_string()))));
        assert!(c.surface().saw(&Event::ClearInput(FileInput::Pdf)));
        assert!(c.extracted().is_none());
    }

    #[test]
    fn test_upload_pdf_network_error_clears_input() {
        let c = controller(MockTransport::new().fail("Failed to fetch"), MockSurface::new());
        let outcome = block_on(c.upload_pdf(Some(&pdf())));

        assert_eq!(outcome, Outcome::NetworkError("Failed to fetch".to_string()));
        assert!(c.surface().saw(&Event::Status(PdfStatus::NetworkError("Failed to fetch".to_string()))));
        assert!(c.surface().saw(&Event::ClearInput(FileInput::Pdf)));
    }

    #[test]
    fn test_upload_pdf_without_file() {
        let c = controller(MockTransport::new(), MockSurface::new());
        let outcome = block_on(c.upload_pdf(None));
        assert_eq!(outcome, Outcome::Rejected(Rejection::NoFile));
        assert_eq!(c.transport().call_count(), 0);
    }

    // ----- save -----

    #[test]
    fn test_save_extracted_with_empty_cache_makes_no_request() {
        let c = controller(MockTransport::new(), MockSurface::new());
        let outcome = block_on(c.save_extracted());

        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyExtraction));
        assert_eq!(c.transport().call_count(), 0);
        assert_eq!(c.surface().alerts(), vec![messages::PDF_REQUIRED.to_string()]);
    }

    #[test]
    fn test_save_extracted_omits_empty_values() {
        let transport = MockTransport::new()
            .reply(extraction_reply())
            .reply(json!({"success": true, "message": "Villa enregistrée avec succès !"}));
        let c = controller(transport, MockSurface::new());
        block_on(c.upload_pdf(Some(&pdf())));
        let outcome = block_on(c.save_extracted());

        assert_eq!(outcome, Outcome::Done);
        let call = c.transport().last_call().unwrap();
        assert_eq!(call.path, "/admin/save");
        assert_eq!(call.field_names(), vec!["reference", "title", "location"]);
        assert!(c.surface().saw(&Event::Reload));
        assert!(c.surface().alerts().contains(&"✅ Villa enregistrée avec succès !".to_string()));
    }

    #[test]
    fn test_save_extracted_clears_cache_on_success_only() {
        let transport = MockTransport::new()
            .reply(extraction_reply())
            .reply(json!({"success": false, "error": "Erreur lors de la sauvegarde"}))
            .reply(json!({"success": true, "message": "ok"}));
        let c = controller(transport, MockSurface::new());
        block_on(c.upload_pdf(Some(&pdf())));

        let failed = block_on(c.save_extracted());
        assert_eq!(failed, Outcome::Failed("Erreur lors de la sauvegarde".to_string()));
        assert!(c.extracted().is_some());
        assert!(!c.surface().saw(&Event::Reload));

        assert_eq!(block_on(c.save_extracted()), Outcome::Done);
        assert!(c.extracted().is_none());

        // second click has nothing stale to resend
        assert_eq!(block_on(c.save_extracted()), Outcome::Rejected(Rejection::EmptyExtraction));
        assert_eq!(c.transport().call_count(), 3);
    }

    #[test]
    fn test_save_restores_control_after_network_error() {
        let transport = MockTransport::new().reply(extraction_reply()).fail("connection reset");
        let c = controller(transport, MockSurface::new());
        block_on(c.upload_pdf(Some(&pdf())));
        let outcome = block_on(c.save_extracted());

        assert_eq!(outcome, Outcome::NetworkError("connection reset".to_string()));
        assert!(c.surface().saw(&Event::Busy(Control::SavePdf, true)));
        assert!(!c.surface().is_busy(&Control::SavePdf));
    }

    #[test]
    fn test_save_form_sends_filled_inputs() {
        let surface = MockSurface::new()
            .field("reference", "VM-002")
            .field("title", "Riad")
            .field("price", "   ")
            .field("contact_email", "moa@example.com");
        let transport = MockTransport::new().reply(json!({"success": true, "message": "ok"}));
        let c = controller(transport, surface);
        let outcome = block_on(c.save());

        assert_eq!(outcome, Outcome::Done);
        let call = c.transport().last_call().unwrap();
        assert_eq!(call.field_names(), vec!["reference", "title", "contact_email"]);
        assert!(!c.surface().is_busy(&Control::SaveForm));
    }

    #[test]
    fn test_save_dispatches_on_mode() {
        let c = controller(MockTransport::new(), MockSurface::new());
        c.switch_mode("pdf");
        assert_eq!(block_on(c.save()), Outcome::Rejected(Rejection::EmptyExtraction));
    }

    // ----- gallery -----

    #[test]
    fn test_upload_images_sequential_order_despite_latency() {
        let transport = MockTransport::new()
            .latencies(&[5, 0, 2])
            .reply(json!({"success": true, "filename": "fa"}))
            .reply(json!({"success": true, "filename": "fb"}))
            .reply(json!({"success": true, "filename": "fc"}));
        let c = controller(transport, MockSurface::new());
        let files = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];
        let report = block_on(c.upload_images(&files, GalleryId::Manual));

        assert_eq!(report.uploaded, vec!["fa", "fb", "fc"]);
        let names: Vec<String> = c
            .gallery_items(GalleryId::Manual)
            .into_iter()
            .map(|i| i.filename)
            .collect();
        assert_eq!(names, vec!["fa", "fb", "fc"]);
        assert_eq!(c.transport().max_in_flight.get(), 1);

        let sent: Vec<String> = c
            .transport()
            .calls
            .borrow()
            .iter()
            .map(|call| call.files[0].1.clone())
            .collect();
        assert_eq!(sent, files);
        assert!(c.surface().saw(&Event::ClearInput(FileInput::Images(GalleryId::Manual))));
    }

    #[test]
    fn test_upload_images_failure_does_not_abort_batch() {
        let transport = MockTransport::new()
            .reply(json!({"success": true, "filename": "fa"}))
            .reply(json!({"error": "Invalid file type"}))
            .fail("timeout")
            .reply(json!({"success": true, "filename": "fd"}));
        let c = controller(transport, MockSurface::new());
        let files: Vec<String> = ["a.jpg", "b.gif", "c.jpg", "d.jpg"].iter().map(|s| s.to_string()).collect();
        let report = block_on(c.upload_images(&files, GalleryId::Pdf));

        assert_eq!(report.uploaded, vec!["fa", "fd"]);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.outcomes[1], Outcome::Failed("Invalid file type".to_string()));
        assert_eq!(c.surface().alerts().len(), 2);
        assert_eq!(c.gallery_items(GalleryId::Pdf).len(), 2);
        assert!(c.gallery_items(GalleryId::Manual).is_empty());
    }

    #[test]
    fn test_upload_images_to_active_gallery() {
        let transport = MockTransport::new().reply(json!({"success": true, "filename": "fa"}));
        let c = controller(transport, MockSurface::new());
        c.switch_mode("pdf");
        block_on(c.upload_images_to_active(&["a.jpg".to_string()]));
        assert_eq!(c.gallery_items(GalleryId::Pdf).len(), 1);
    }

    #[test]
    fn test_upload_images_empty_selection() {
        let c = controller(MockTransport::new(), MockSurface::new());
        let report = block_on(c.upload_images(&[], GalleryId::Pdf));
        assert_eq!(report.outcomes, vec![Outcome::Rejected(Rejection::NoFile)]);
        assert_eq!(c.transport().call_count(), 0);
    }

    #[test]
    fn test_delete_image_declined_makes_no_request() {
        let transport = MockTransport::new().reply(json!({"success": true, "filename": "fa"}));
        let c = controller(transport, MockSurface::new().answers(&[false]));
        block_on(c.upload_images(&["a.jpg".to_string()], GalleryId::Manual));

        let outcome = block_on(c.delete_image("fa"));
        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(c.transport().call_count(), 1);
        assert_eq!(c.gallery_items(GalleryId::Manual), vec![GalleryItem::new("fa")]);
    }

    #[test]
    fn test_delete_image_removes_item_on_success() {
        let transport = MockTransport::new()
            .reply(json!({"success": true, "filename": "fa"}))
            .reply(json!({"success": true, "filename": "fb"}))
            .reply(json!({"success": true}));
        let c = controller(transport, MockSurface::new().answers(&[true]));
        block_on(c.upload_images(&["a.jpg".to_string(), "b.jpg".to_string()], GalleryId::Manual));

        let outcome = block_on(c.delete_image("fa"));
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(c.transport().last_call().unwrap().path, "/admin/delete-image/fa");
        assert_eq!(c.gallery_items(GalleryId::Manual), vec![GalleryItem::new("fb")]);
        assert_eq!(
            c.surface().events.borrow().last(),
            Some(&Event::Gallery(GalleryId::Manual, vec!["fb".to_string()]))
        );
    }

    #[test]
    fn test_delete_image_failure_keeps_item() {
        let transport = MockTransport::new()
            .reply(json!({"success": true, "filename": "fa"}))
            .reply(json!({"error": "Image not found"}));
        let c = controller(transport, MockSurface::new().answers(&[true]));
        block_on(c.upload_images(&["a.jpg".to_string()], GalleryId::Pdf));

        let outcome = block_on(c.delete_image("fa"));
        assert_eq!(outcome, Outcome::Failed("Image not found".to_string()));
        assert_eq!(c.gallery_items(GalleryId::Pdf).len(), 1);
        assert!(c.surface().alerts().contains(&messages::delete_failure("Image not found")));
    }

    #[test]
    fn test_delete_unknown_image_is_not_an_error() {
        let transport = MockTransport::new().reply(json!({"success": true}));
        let c = controller(transport, MockSurface::new().answers(&[true]));
        assert_eq!(block_on(c.delete_image("ghost.jpg")), Outcome::Done);
        assert!(c.surface().alerts().is_empty());
    }

    // ----- enhancement -----

    #[test]
    fn test_enhance_whitespace_only_makes_no_request() {
        let c = controller(MockTransport::new(), MockSurface::new().field("description", "   "));
        let outcome = block_on(c.enhance_field("description"));
        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyText));
        assert_eq!(c.transport().call_count(), 0);
    }

    #[test]
    fn test_enhance_replaces_only_on_confirmation() {
        let transport = MockTransport::new()
            .reply(json!({"enhanced": "Somptueuse villa"}))
            .reply(json!({"enhanced": "Somptueuse villa"}));
        let surface = MockSurface::new().field("description", " belle villa ").answers(&[false, true]);
        let c = controller(transport, surface);

        assert_eq!(block_on(c.enhance_field("description")), Outcome::Declined);
        assert_eq!(c.surface().field_value("description"), " belle villa ");

        assert_eq!(block_on(c.enhance_field("description")), Outcome::Done);
        assert_eq!(c.surface().field_value("description"), "Somptueuse villa");

        let call = c.transport().last_call().unwrap();
        assert_eq!(call.path, "/api/enhance");
        assert_eq!(call.json, Some(json!({"text": "belle villa", "field": "description"})));
    }

    #[test]
    fn test_enhance_without_proposal_leaves_field() {
        let transport = MockTransport::new().reply(json!({}));
        let c = controller(transport, MockSurface::new().field("title", "Villa"));
        assert_eq!(block_on(c.enhance_field("title")), Outcome::NoChange);
        assert_eq!(c.surface().field_value("title"), "Villa");
        assert!(!c.surface().is_busy(&Control::Enhance("title".to_string())));
    }

    #[test]
    fn test_enhance_restores_control_after_network_error() {
        let c = controller(MockTransport::new().fail("offline"), MockSurface::new().field("title", "Villa"));
        let control = Control::Enhance("title".to_string());

        let outcome = block_on(c.enhance_field("title"));
        assert_eq!(outcome, Outcome::NetworkError("offline".to_string()));
        assert!(c.surface().saw(&Event::Busy(control.clone(), true)));
        assert!(!c.surface().is_busy(&control));
    }

    // ----- reset -----

    #[test]
    fn test_open_reset_modal_clears_input() {
        let c = controller(MockTransport::new(), MockSurface::new());
        *c.surface().phrase.borrow_mut() = "old".to_string();
        c.open_reset_modal();
        assert_eq!(c.reset_state(), ModalState::Open);
        assert_eq!(c.surface().reset_phrase(), "");
    }

    #[test]
    fn test_confirm_reset_wrong_phrase_makes_no_request() {
        let c = controller(MockTransport::new(), MockSurface::new());
        c.open_reset_modal();
        *c.surface().phrase.borrow_mut() = "suprimer".to_string();

        assert_eq!(block_on(c.confirm_reset()), Outcome::Rejected(Rejection::PhraseMismatch));
        assert_eq!(c.transport().call_count(), 0);
        assert_eq!(c.reset_state(), ModalState::Open);
    }

    #[test]
    fn test_confirm_reset_exact_phrase_closes_modal_on_failure() {
        let transport = MockTransport::new().reply(json!({"error": "Confirmation incorrecte"}));
        let c = controller(transport, MockSurface::new());
        c.open_reset_modal();
        *c.surface().phrase.borrow_mut() = "SUPPRIMER".to_string();

        let outcome = block_on(c.confirm_reset());
        assert_eq!(outcome, Outcome::Failed("Confirmation incorrecte".to_string()));
        assert_eq!(c.transport().call_count(), 1);
        let call = c.transport().last_call().unwrap();
        assert_eq!(call.path, "/admin/reset");
        assert_eq!(call.fields, vec![("confirmation".to_string(), "SUPPRIMER".to_string())]);
        assert_eq!(c.reset_state(), ModalState::Closed);
        assert!(!c.surface().saw(&Event::Reload));
    }

    #[test]
    fn test_confirm_reset_success_reloads() {
        let transport = MockTransport::new()
            .reply(json!({"success": true, "message": "Toutes les données ont été supprimées"}));
        let c = controller(transport, MockSurface::new());
        c.open_reset_modal();
        *c.surface().phrase.borrow_mut() = " SUPPRIMER ".to_string();

        assert_eq!(block_on(c.confirm_reset()), Outcome::Done);
        assert_eq!(c.reset_state(), ModalState::Closed);
        assert!(c.surface().saw(&Event::Reload));
    }

    #[test]
    fn test_confirm_reset_network_error_still_closes_and_restores() {
        let c = controller(MockTransport::new().fail("offline"), MockSurface::new());
        c.open_reset_modal();
        *c.surface().phrase.borrow_mut() = "SUPPRIMER".to_string();

        assert_eq!(block_on(c.confirm_reset()), Outcome::NetworkError("offline".to_string()));
        assert_eq!(c.reset_state(), ModalState::Closed);
        assert!(!c.surface().is_busy(&Control::ConfirmReset));
    }

    // ----- listing -----

    #[test]
    fn test_load_listing_seeds_form_and_galleries() {
        let transport = MockTransport::new().reply(json!({
            "id": 1,
            "reference": "VM-001",
            "title": "Villa Test",
            "images": ["fa.jpg", "fb.jpg"],
        }));
        let c = controller(transport, MockSurface::new());

        assert_eq!(block_on(c.load_listing()), Outcome::Done);
        assert_eq!(c.surface().field_value("reference"), "VM-001");
        assert_eq!(c.gallery_items(GalleryId::Pdf).len(), 2);
        assert_eq!(c.gallery_items(GalleryId::Manual).len(), 2);
    }

    #[test]
    fn test_delete_after_listing_clears_both_galleries() {
        let transport = MockTransport::new()
            .reply(json!({"id": 1, "title": "Villa Test", "images": ["fa.jpg", "fb.jpg"]}))
            .reply(json!({"success": true}));
        let c = controller(transport, MockSurface::new().answers(&[true]));
        assert_eq!(block_on(c.load_listing()), Outcome::Done);

        assert_eq!(block_on(c.delete_image("fa.jpg")), Outcome::Done);
        assert_eq!(c.gallery_items(GalleryId::Pdf), vec![GalleryItem::new("fb.jpg")]);
        assert_eq!(c.gallery_items(GalleryId::Manual), vec![GalleryItem::new("fb.jpg")]);

        let events = c.surface().events.borrow();
        assert!(events.contains(&Event::Gallery(GalleryId::Pdf, vec!["fb.jpg".to_string()])));
        assert!(events.contains(&Event::Gallery(GalleryId::Manual, vec!["fb.jpg".to_string()])));
    }

    #[test]
    fn test_load_listing_none_yet() {
        let transport = MockTransport::new().reply(json!({"error": "No villa found"}));
        let c = controller(transport, MockSurface::new());
        assert_eq!(block_on(c.load_listing()), Outcome::NoChange);
        assert!(c.surface().alerts().is_empty());
    }
}
