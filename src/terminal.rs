//! Terminal rendition of the admin panel
//!
//! Alerts print to stdout, confirmations go through dialoguer, and in-flight
//! requests show an indicatif spinner.

use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use villa_admin_common::{Control, FileInput, GalleryId, GalleryItem, Mode, PdfStatus, Surface};

pub struct TerminalSurface {
    base_url: String,
    assume_yes: bool,
    preset_phrase: Option<String>,
    fields: RefCell<BTreeMap<String, String>>,
    spinner: RefCell<Option<ProgressBar>>,
    reload_requested: Cell<bool>,
}

impl TerminalSurface {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            assume_yes: false,
            preset_phrase: None,
            fields: RefCell::new(BTreeMap::new()),
            spinner: RefCell::new(None),
            reload_requested: Cell::new(false),
        }
    }

    /// Answer every confirmation with yes
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Use this text instead of prompting for the reset phrase
    pub fn with_phrase(mut self, phrase: Option<String>) -> Self {
        self.preset_phrase = phrase;
        self
    }

    /// Pre-fill form values, as if typed into the inputs
    pub fn with_fields(self, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        self.fields.borrow_mut().extend(fields);
        self
    }

    /// Whether an action asked for the persisted state to be shown again
    pub fn reload_requested(&self) -> bool {
        self.reload_requested.get()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn start_spinner(&self, message: &str) {
        self.stop_spinner();
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

/// One line per image: `  [n] filename  url`
pub fn gallery_lines(base_url: &str, items: &[GalleryItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  [{}] {}  {}{}", i + 1, item.filename, base_url, item.url()))
        .collect()
}

impl Surface for TerminalSurface {
    fn show_mode(&self, mode: Mode) {
        debug!(%mode, "mode active");
    }

    fn pdf_status(&self, status: PdfStatus) {
        match status {
            PdfStatus::Analyzing => self.start_spinner(&status.text()),
            _ => {
                self.stop_spinner();
                println!("{}", status.text());
            }
        }
    }

    fn clear_file_input(&self, input: FileInput) {
        debug!(?input, "file selection consumed");
    }

    fn alert(&self, message: &str) {
        // keep the spinner line from swallowing the message
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.println(message),
            None => println!("{}", message),
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            println!("{} [oui]", message);
            return true;
        }
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.suspend(|| ask(message)),
            None => ask(message),
        }
    }

    fn set_busy(&self, control: &Control, busy: bool) {
        if busy {
            self.start_spinner(control.label(true));
        } else {
            self.stop_spinner();
        }
    }

    fn render_gallery(&self, gallery: GalleryId, items: &[GalleryItem]) {
        // commands print the final gallery once the batch is over
        debug!(gallery = gallery.dom_id(), items = items.len(), "gallery updated");
    }

    fn field_value(&self, field: &str) -> String {
        self.fields.borrow().get(field).cloned().unwrap_or_default()
    }

    fn set_field_value(&self, field: &str, value: &str) {
        self.fields.borrow_mut().insert(field.to_string(), value.to_string());
    }

    fn show_reset_modal(&self, open: bool) {
        if open {
            println!("⚠️  Toutes les données de la villa et toutes les images seront supprimées.");
        }
    }

    fn reset_phrase(&self) -> String {
        if let Some(phrase) = &self.preset_phrase {
            return phrase.clone();
        }
        Input::<String>::new()
            .with_prompt("Tapez SUPPRIMER pour confirmer")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not read confirmation phrase");
                String::new()
            })
    }

    fn reload(&self) {
        self.reload_requested.set(true);
    }
}

fn ask(message: &str) -> bool {
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or_else(|e| {
            warn!(error = %e, "could not read answer, declining");
            false
        })
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
