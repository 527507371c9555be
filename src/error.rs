use thiserror::Error;

#[derive(Error, Debug)]
pub enum VillaAdminError {
    #[error(transparent)]
    Common(#[from] villa_admin_common::Error),

    #[error("Erreur de configuration: {0}")]
    Config(String),

    #[error("Fichier introuvable: {0}")]
    FileNotFound(String),

    #[error("Aucune image trouvée: {0}")]
    NoImagesFound(String),

    #[error("Erreur HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Champ inconnu: {0}")]
    UnknownField(String),

    #[error("Opération échouée: {0}")]
    OperationFailed(String),

    #[error("Erreur JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VillaAdminError>;
