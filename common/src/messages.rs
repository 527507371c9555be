//! User-facing text (French, like the rest of the admin panel)

pub const PDF_ANALYZING: &str =
    "⏳ Analyse du PDF en cours... Cela peut prendre 30 à 90 secondes.";
pub const PDF_EXTRACTED: &str = "✅ PDF analysé avec succès ! Les données ont été extraites. Ajoutez maintenant les photos puis cliquez sur Enregistrer.";
pub const PDF_HYDRATED: &str =
    "✅ PDF analysé avec succès ! Les champs du formulaire ont été remplis.";
pub const EXTRACTION_FAILED: &str = "Impossible d'extraire les données";

pub const PDF_REQUIRED: &str = "Veuillez d'abord uploader et analyser un PDF.";
pub const PDF_FILE_REQUIRED: &str = "Veuillez sélectionner un fichier PDF.";
pub const IMAGES_REQUIRED: &str = "Veuillez sélectionner au moins une image.";
pub const TEXT_REQUIRED: &str = "Veuillez d'abord saisir du texte à améliorer.";
pub const PHRASE_REQUIRED: &str = "Veuillez taper exactement \"SUPPRIMER\" pour confirmer.";

pub const DELETE_IMAGE_CONFIRM: &str = "Voulez-vous vraiment supprimer cette image ?";

pub const SAVE_LABEL: &str = "💾 Enregistrer la Villa";
pub const SAVE_BUSY_LABEL: &str = "💾 Enregistrement...";
pub const ENHANCE_LABEL: &str = "✨ AI";
pub const ENHANCE_BUSY_LABEL: &str = "⏳";
pub const RESET_LABEL: &str = "Supprimer définitivement";
pub const RESET_BUSY_LABEL: &str = "Suppression...";

pub const UNKNOWN_ERROR: &str = "Erreur inconnue";

pub fn success(message: &str) -> String {
    format!("✅ {}", message)
}

pub fn failure(error: &str) -> String {
    format!("❌ Erreur: {}", error)
}

pub fn network_failure(error: &str) -> String {
    format!("❌ Erreur réseau: {}", error)
}

pub fn upload_failure(error: &str) -> String {
    format!("Erreur lors de l'upload: {}", error)
}

pub fn delete_failure(error: &str) -> String {
    format!("Erreur lors de la suppression: {}", error)
}

pub fn enhance_failure(error: &str) -> String {
    format!("Erreur lors de l'amélioration: {}", error)
}

pub fn enhance_confirm(enhanced: &str) -> String {
    format!(
        "Texte amélioré par l'IA. Voulez-vous le remplacer ?\n\nNouveau texte:\n{}",
        enhanced
    )
}
