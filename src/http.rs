//! reqwest-backed transport for the terminal front

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use villa_admin_common::{Error, FormPart, Result, Transport};

/// A file on disk sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
}

impl UploadFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    }

    fn mime(&self) -> String {
        mime_guess::from_path(&self.path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> crate::error::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("villa-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(|e| Error::Transport(describe(&e)))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| Error::Transport(describe(&e)))?;
        debug!(%status, bytes = bytes.len(), "response received");

        // Error statuses with a JSON body still carry the server's message
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(Error::Transport(format!("HTTP {}", status))),
            Err(e) => Err(Error::Json(e)),
        }
    }
}

async fn file_part(file: &UploadFile) -> Result<Part> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| Error::Transport(format!("{}: {}", display(&file.path), e)))?;
    Part::bytes(bytes)
        .file_name(file.file_name())
        .mime_str(&file.mime())
        .map_err(|e| Error::Transport(e.to_string()))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "délai d'attente dépassé".to_string()
    } else if e.is_connect() {
        "serveur injoignable".to_string()
    } else {
        e.to_string()
    }
}

impl Transport for HttpTransport {
    type File = UploadFile;

    async fn post_multipart(&self, path: &str, parts: Vec<FormPart<'_, UploadFile>>) -> Result<Value> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.to_string(), value),
                FormPart::File { name, file } => form.part(name.to_string(), file_part(file).await?),
            };
        }
        debug!(path, "POST multipart");
        self.send(self.client.post(self.url(path)).multipart(form)).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(path, "POST json");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn post_empty(&self, path: &str) -> Result<Value> {
        debug!(path, "POST");
        self.send(self.client.post(self.url(path))).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }
}
