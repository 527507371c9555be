//! One function per subcommand, each driving the shared controller

use crate::error::{Result, VillaAdminError};
use crate::http::{HttpTransport, UploadFile};
use crate::scanner;
use crate::terminal::{gallery_lines, TerminalSurface};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use villa_admin_common::{
    ExtractedFields, FieldName, GalleryId, Hydration, IntakeController, Mode, Outcome, Rejection, Surface,
    UploadReport,
};

pub type Controller = IntakeController<HttpTransport, TerminalSurface>;

/// Settings every command shares
#[derive(Debug, Clone)]
pub struct Session {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub hydration: Hydration,
    pub assume_yes: bool,
}

impl Session {
    fn surface(&self) -> TerminalSurface {
        TerminalSurface::new(&self.base_url).assume_yes(self.assume_yes)
    }

    fn controller(&self, surface: TerminalSurface, mode: Mode) -> Result<Controller> {
        let transport = HttpTransport::new(&self.base_url, self.timeout)?;
        Ok(IntakeController::new(transport, surface, mode).with_hydration(self.hydration))
    }
}

fn rejection_text(rejection: Rejection) -> &'static str {
    match rejection {
        Rejection::NoFile => "aucun fichier sélectionné",
        Rejection::EmptyExtraction => "aucune extraction PDF à enregistrer",
        Rejection::EmptyText => "aucun texte à améliorer",
        Rejection::PhraseMismatch => "phrase de confirmation incorrecte",
    }
}

/// Map how an action ended to the process result. The user already saw the
/// server's message; this only decides the exit status.
pub fn finish(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Done | Outcome::NoChange => Ok(()),
        Outcome::Declined => {
            println!("Annulé.");
            Ok(())
        }
        Outcome::Rejected(rejection) => Err(VillaAdminError::OperationFailed(rejection_text(rejection).into())),
        Outcome::Failed(error) | Outcome::NetworkError(error) => Err(VillaAdminError::OperationFailed(error)),
    }
}

fn finish_report(report: &UploadReport) -> Result<()> {
    if let Some(Outcome::Rejected(rejection)) = report.outcomes.first() {
        return finish(Outcome::Rejected(*rejection));
    }
    println!("✔ {} image(s) envoyée(s)", report.uploaded.len());
    match report.failed() {
        0 => Ok(()),
        n => Err(VillaAdminError::OperationFailed(format!("{} image(s) refusée(s)", n))),
    }
}

/// Print the filled fields in form order
pub fn print_fields(lookup: impl Fn(FieldName) -> String) {
    for field in FieldName::ALL {
        let value = lookup(field);
        if value.trim().is_empty() {
            continue;
        }
        if value.contains('\n') {
            println!("{}:", field.label());
            for line in value.lines() {
                println!("    {}", line);
            }
        } else {
            println!("{}: {}", field.label(), value);
        }
    }
}

fn print_gallery(controller: &Controller, gallery: GalleryId) {
    let items = controller.gallery_items(gallery);
    println!("\nGalerie ({} image(s))", items.len());
    for line in gallery_lines(controller.surface().base_url(), &items) {
        println!("{}", line);
    }
}

/// Refresh from the server once an action asked for it
async fn reload_if_requested(controller: &Controller) -> Result<()> {
    if controller.surface().reload_requested() {
        info!("showing persisted listing");
        println!();
        show_loaded(controller).await?;
    }
    Ok(())
}

async fn show_loaded(controller: &Controller) -> Result<()> {
    match controller.load_listing().await {
        Outcome::Done => {
            let surface = controller.surface();
            print_fields(|field| surface.field_value(field.as_str()));
            print_gallery(controller, GalleryId::Manual);
            Ok(())
        }
        Outcome::NoChange => {
            println!("Aucune villa enregistrée.");
            Ok(())
        }
        other => finish(other),
    }
}

// ========== pdf ==========

pub async fn pdf(session: &Session, file: &Path, images: &[PathBuf], dry_run: bool) -> Result<()> {
    if !file.is_file() {
        return Err(VillaAdminError::FileNotFound(file.display().to_string()));
    }
    // validate the photo selection before the long extraction
    let photos = if images.is_empty() {
        Vec::new()
    } else {
        scanner::collect_images(images)?
    };

    let controller = session.controller(session.surface(), Mode::Pdf)?;

    println!("[1/3] Extraction du PDF...");
    let upload = UploadFile::new(file);
    finish(controller.upload_pdf(Some(&upload)).await)?;

    match controller.extracted() {
        Some(fields) => print_fields(|field| fields.get(field).unwrap_or("").to_string()),
        None => {
            let surface = controller.surface();
            print_fields(|field| surface.field_value(field.as_str()));
        }
    }

    if dry_run {
        println!("\n(aperçu seulement, rien n'a été enregistré)");
        return Ok(());
    }

    if !photos.is_empty() {
        println!("\n[2/3] Envoi de {} image(s)...", photos.len());
        let report = controller.upload_images_to_active(&photos).await;
        finish_report(&report)?;
        print_gallery(&controller, GalleryId::Pdf);
    }

    if !controller.surface().confirm("Enregistrer cette villa ?") {
        return finish(Outcome::Declined);
    }

    println!("\n[3/3] Enregistrement...");
    let outcome = match controller.hydration() {
        Hydration::Deferred => controller.save().await,
        // the extraction went into the form
        Hydration::Immediate => controller.save_form().await,
    };
    finish(outcome)?;
    reload_if_requested(&controller).await
}

// ========== save ==========

/// Form values from an optional JSON file plus `--set` overrides
pub fn form_values(from: Option<&Path>, values: &[(String, String)]) -> Result<ExtractedFields> {
    let mut fields = match from {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let json: Value = serde_json::from_str(&content)?;
            ExtractedFields::from_json(&json)
                .ok_or_else(|| VillaAdminError::Config(format!("{}: objet JSON attendu", path.display())))?
        }
        None => ExtractedFields::new(),
    };

    for (key, value) in values {
        let field = FieldName::parse(key).ok_or_else(|| VillaAdminError::UnknownField(key.clone()))?;
        fields.insert(field, value.clone());
    }
    Ok(fields)
}

pub async fn save(session: &Session, from: Option<&Path>, values: &[(String, String)]) -> Result<()> {
    let fields = form_values(from, values)?;
    let surface = session
        .surface()
        .with_fields(fields.iter().map(|(f, v)| (f.as_str().to_string(), v.to_string())));
    let controller = session.controller(surface, Mode::Manual)?;

    finish(controller.save().await)?;
    reload_if_requested(&controller).await
}

// ========== images ==========

pub async fn upload_images(session: &Session, paths: &[PathBuf], gallery: &str) -> Result<()> {
    let files = scanner::collect_images(paths)?;
    let mode = Mode::from(gallery);
    let controller = session.controller(session.surface(), mode)?;

    println!("Envoi de {} image(s)...", files.len());
    let report = controller.upload_images(&files, GalleryId::from(mode)).await;
    print_gallery(&controller, GalleryId::from(mode));
    finish_report(&report)
}

pub async fn delete_images(session: &Session, filenames: &[String]) -> Result<()> {
    let controller = session.controller(session.surface(), Mode::Manual)?;

    let mut failures = 0;
    for filename in filenames {
        match controller.delete_image(filename).await {
            Outcome::Done => println!("✔ {} supprimée", filename),
            Outcome::Declined => println!("- {} conservée", filename),
            _ => failures += 1,
        }
    }

    match failures {
        0 => Ok(()),
        n => Err(VillaAdminError::OperationFailed(format!("{} suppression(s) échouée(s)", n))),
    }
}

// ========== enhance ==========

pub async fn enhance(session: &Session, field: &str, text: &str) -> Result<()> {
    let name = FieldName::parse(field).ok_or_else(|| VillaAdminError::UnknownField(field.to_string()))?;
    let surface = session
        .surface()
        .with_fields([(name.as_str().to_string(), text.to_string())]);
    let controller = session.controller(surface, Mode::Manual)?;

    let outcome = controller.enhance_field(name.as_str()).await;
    match &outcome {
        Outcome::Done => println!("{}", controller.surface().field_value(name.as_str())),
        Outcome::NoChange => println!("Aucune amélioration proposée."),
        _ => {}
    }
    finish(outcome)
}

// ========== reset ==========

pub async fn reset(session: &Session, phrase: Option<String>) -> Result<()> {
    let surface = session.surface().with_phrase(phrase);
    let controller = session.controller(surface, Mode::Manual)?;

    controller.open_reset_modal();
    finish(controller.confirm_reset().await)?;
    reload_if_requested(&controller).await
}

// ========== show ==========

pub async fn show(session: &Session) -> Result<()> {
    let controller = session.controller(session.surface(), Mode::Manual)?;
    show_loaded(&controller).await
}
