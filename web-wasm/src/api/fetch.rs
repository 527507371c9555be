//! `fetch`-backed transport
//!
//! Requests go to the page's own origin, the way the admin page is served.

use serde_json::Value;
use villa_admin_common::{Error, FormPart, Result, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

#[derive(Clone, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }

    async fn send(&self, method: &str, path: &str, body: Option<&JsValue>, json: bool) -> Result<Value> {
        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = body {
            opts.set_body(body);
        }

        let request = Request::new_with_str_and_init(path, &opts).map_err(js_error)?;
        if json {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| Error::Transport("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        // error statuses with a JSON body still carry the server's message
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(body),
            Err(_) if !resp.ok() => Err(Error::Transport(format!("HTTP {}", resp.status()))),
            Err(e) => Err(Error::Json(e)),
        }
    }
}

/// Message of a rejected promise (`TypeError: Failed to fetch`, ...)
fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

impl Transport for FetchTransport {
    type File = File;

    async fn post_multipart(&self, path: &str, parts: Vec<FormPart<'_, File>>) -> Result<Value> {
        let form = FormData::new().map_err(js_error)?;
        for part in parts {
            let appended = match part {
                FormPart::Text { name, value } => form.append_with_str(name, &value),
                FormPart::File { name, file } => form.append_with_blob_and_filename(name, file, &file.name()),
            };
            appended.map_err(js_error)?;
        }
        self.send("POST", path, Some(&form.into()), false).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let body = JsValue::from_str(&serde_json::to_string(body)?);
        self.send("POST", path, Some(&body), true).await
    }

    async fn post_empty(&self, path: &str) -> Result<Value> {
        self.send("POST", path, None, false).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.send("GET", path, None, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_js_error_message() {
        let error = js_error(js_sys::Error::new("Failed to fetch").into());
        assert_eq!(error.user_text(), "Failed to fetch");

        let error = js_error(JsValue::from_str("aborted"));
        assert_eq!(error.user_text(), "aborted");
    }
}
