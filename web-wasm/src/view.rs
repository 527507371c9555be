//! Browser rendition of the admin panel
//!
//! [`IntakeView`] is a bundle of signals the components read; the controller
//! writes to it through [`Surface`].

use gloo::console;
use leptos::html;
use leptos::prelude::*;
use std::collections::HashMap;
use villa_admin_common::{Control, FileInput, GalleryId, GalleryItem, Mode, PdfStatus, Surface};

#[derive(Clone, Copy)]
pub struct IntakeView {
    pub mode: RwSignal<Mode>,
    pub pdf_status: RwSignal<Option<PdfStatus>>,
    pub busy: RwSignal<Vec<Control>>,
    pub pdf_gallery: RwSignal<Vec<GalleryItem>>,
    pub manual_gallery: RwSignal<Vec<GalleryItem>>,
    /// Form inputs by id
    pub fields: RwSignal<HashMap<String, String>>,
    pub reset_open: RwSignal<bool>,
    pub reset_phrase: RwSignal<String>,
    pub pdf_input: NodeRef<html::Input>,
    pub pdf_images_input: NodeRef<html::Input>,
    pub manual_images_input: NodeRef<html::Input>,
    pub reset_input: NodeRef<html::Input>,
}

impl IntakeView {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode: RwSignal::new(mode),
            pdf_status: RwSignal::new(None),
            busy: RwSignal::new(Vec::new()),
            pdf_gallery: RwSignal::new(Vec::new()),
            manual_gallery: RwSignal::new(Vec::new()),
            fields: RwSignal::new(HashMap::new()),
            reset_open: RwSignal::new(false),
            reset_phrase: RwSignal::new(String::new()),
            pdf_input: NodeRef::new(),
            pdf_images_input: NodeRef::new(),
            manual_images_input: NodeRef::new(),
            reset_input: NodeRef::new(),
        }
    }

    /// Tracked read, for use inside views
    pub fn is_busy(&self, control: &Control) -> bool {
        self.busy.with(|busy| busy.contains(control))
    }

    pub fn gallery(&self, gallery: GalleryId) -> RwSignal<Vec<GalleryItem>> {
        match gallery {
            GalleryId::Pdf => self.pdf_gallery,
            GalleryId::Manual => self.manual_gallery,
        }
    }

    pub fn images_input(&self, gallery: GalleryId) -> NodeRef<html::Input> {
        match gallery {
            GalleryId::Pdf => self.pdf_images_input,
            GalleryId::Manual => self.manual_images_input,
        }
    }

    /// Tracked read of one form input
    pub fn field(&self, field: &str) -> String {
        self.fields.with(|fields| fields.get(field).cloned().unwrap_or_default())
    }
}

impl Surface for IntakeView {
    fn show_mode(&self, mode: Mode) {
        self.mode.set(mode);
    }

    fn pdf_status(&self, status: PdfStatus) {
        self.pdf_status.set(Some(status));
    }

    fn clear_file_input(&self, input: FileInput) {
        let node = match input {
            FileInput::Pdf => self.pdf_input,
            FileInput::Images(gallery) => self.images_input(gallery),
        };
        if let Some(element) = node.get_untracked() {
            element.set_value("");
        }
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }

    fn set_busy(&self, control: &Control, busy: bool) {
        self.busy.update(|controls| {
            controls.retain(|c| c != control);
            if busy {
                controls.push(control.clone());
            }
        });
    }

    fn render_gallery(&self, gallery: GalleryId, items: &[GalleryItem]) {
        self.gallery(gallery).set(items.to_vec());
    }

    fn field_value(&self, field: &str) -> String {
        self.fields
            .with_untracked(|fields| fields.get(field).cloned().unwrap_or_default())
    }

    fn set_field_value(&self, field: &str, value: &str) {
        self.fields.update(|fields| {
            fields.insert(field.to_string(), value.to_string());
        });
    }

    fn show_reset_modal(&self, open: bool) {
        self.reset_open.set(open);
        if open {
            self.reset_phrase.set(String::new());
            let input = self.reset_input;
            // the modal is shown on the next render
            gloo::timers::callback::Timeout::new(0, move || {
                if let Some(element) = input.get_untracked() {
                    let _ = element.focus();
                }
            })
            .forget();
        }
    }

    fn reset_phrase(&self) -> String {
        self.reset_phrase.get_untracked()
    }

    fn reload(&self) {
        if let Err(e) = gloo::utils::window().location().reload() {
            console::error!("reload failed", e);
        }
    }
}
