//! Admin endpoint contracts
//!
//! Paths, request shapes and response decoding for the listing backend. The HTTP
//! client itself sits behind [`Transport`] so the browser and terminal fronts can
//! each bring their own.

use crate::messages;
use crate::types::{ExtractedFields, Listing};
use crate::error::Result;
use serde::Deserialize;
use serde_json::{json, Value};

pub const UPLOAD_PDF_PATH: &str = "/admin/upload-pdf";
pub const UPLOAD_IMAGE_PATH: &str = "/admin/upload";
pub const SAVE_PATH: &str = "/admin/save";
pub const ENHANCE_PATH: &str = "/api/enhance";
pub const RESET_PATH: &str = "/admin/reset";
pub const LISTING_PATH: &str = "/api/villa";
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads/";

/// Phrase the reset endpoint requires, case-sensitive
pub const CONFIRMATION_PHRASE: &str = "SUPPRIMER";

/// `/admin/delete-image/{filename}`
pub fn delete_image_path(filename: &str) -> String {
    format!("/admin/delete-image/{}", urlencoding::encode(filename))
}

/// One multipart form entry
pub enum FormPart<'a, F> {
    Text { name: &'a str, value: String },
    File { name: &'a str, file: &'a F },
}

/// HTTP client seam.
///
/// Every method resolves to the decoded JSON body. Error statuses that still carry
/// a JSON body resolve to `Ok` so the server's `error` text reaches the user; only
/// failures with no usable body are `Err`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Native file handle of the front (browser `File`, path on disk, ...)
    type File;

    async fn post_multipart(&self, path: &str, parts: Vec<FormPart<'_, Self::File>>) -> Result<Value>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value>;

    async fn post_empty(&self, path: &str) -> Result<Value>;

    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// Decoded application-level answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Success(T),
    /// Server said no; carries its error text
    Failure(String),
}

/// Common `{success, error, message, filename, data}` envelope.
/// A missing `success` counts as `false`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
    success: bool,
    error: Option<String>,
    message: Option<String>,
    filename: Option<String>,
    data: Option<Value>,
}

impl Envelope {
    fn parse(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    fn failure<T>(self, fallback: &str) -> Reply<T> {
        Reply::Failure(self.error.unwrap_or_else(|| fallback.to_string()))
    }
}

/// `/admin/upload-pdf` answer
pub fn decode_extraction(body: &Value) -> Reply<ExtractedFields> {
    let envelope = Envelope::parse(body);
    if envelope.success {
        if let Some(fields) = envelope.data.as_ref().and_then(ExtractedFields::from_json) {
            return Reply::Success(fields);
        }
    }
    envelope.failure(messages::EXTRACTION_FAILED)
}

/// `/admin/upload` answer: the server-assigned filename
pub fn decode_upload(body: &Value) -> Reply<String> {
    let mut envelope = Envelope::parse(body);
    match envelope.filename.take() {
        Some(filename) if envelope.success && !filename.is_empty() => Reply::Success(filename),
        _ => envelope.failure(messages::UNKNOWN_ERROR),
    }
}

/// `/admin/delete-image/{filename}` answer
pub fn decode_ack(body: &Value) -> Reply<()> {
    let envelope = Envelope::parse(body);
    if envelope.success {
        Reply::Success(())
    } else {
        envelope.failure(messages::UNKNOWN_ERROR)
    }
}

/// `/admin/save` and `/admin/reset` answer: the server's confirmation text
pub fn decode_message(body: &Value) -> Reply<String> {
    let mut envelope = Envelope::parse(body);
    if envelope.success {
        Reply::Success(envelope.message.take().unwrap_or_default())
    } else {
        envelope.failure(messages::UNKNOWN_ERROR)
    }
}

/// `/api/enhance` answer.
///
/// `Ok(Some)` carries a non-empty rewrite, `Ok(None)` means the service had
/// nothing to offer, `Err` carries an explicit error text.
pub fn decode_enhanced(body: &Value) -> std::result::Result<Option<String>, String> {
    match body.get("enhanced").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Ok(Some(text.to_string())),
        _ => match body.get("error").and_then(Value::as_str) {
            Some(error) => Err(error.to_string()),
            None => Ok(None),
        },
    }
}

/// `/api/villa` answer
pub fn decode_listing(body: &Value) -> Option<Listing> {
    Listing::from_json(body)
}

/// `/api/enhance` request body
pub fn enhance_body(text: &str, field: &str) -> Value {
    json!({ "text": text, "field": field })
}
