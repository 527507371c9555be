//! Recording test doubles for the controller seams

use crate::api::{FormPart, Transport};
use crate::error::{Error, Result};
use crate::gallery::{GalleryId, GalleryItem};
use crate::surface::{Control, FileInput, PdfStatus, Surface};
use crate::types::Mode;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// One request as the transport saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    /// Text parts of a multipart body
    pub fields: Vec<(String, String)>,
    /// File parts: (part name, file)
    pub files: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl Call {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Stays pending for a fixed number of polls
struct YieldFor(usize);

impl Future for YieldFor {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            Poll::Ready(())
        } else {
            self.0 -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Answers requests from a queue; files are plain names.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<std::result::Result<Value, String>>>,
    latencies: RefCell<VecDeque<usize>>,
    pub calls: RefCell<Vec<Call>>,
    in_flight: Cell<usize>,
    pub max_in_flight: Cell<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(body));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
        self
    }

    /// Poll counts for the next requests, in order
    pub fn latencies(self, polls: &[usize]) -> Self {
        self.latencies.borrow_mut().extend(polls.iter().copied());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.borrow().last().cloned()
    }

    async fn answer(&self, call: Call) -> Result<Value> {
        self.calls.borrow_mut().push(call);
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight.set(self.max_in_flight.get().max(self.in_flight.get()));

        let polls = self.latencies.borrow_mut().pop_front().unwrap_or(0);
        YieldFor(polls).await;

        self.in_flight.set(self.in_flight.get() - 1);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport("no reply queued".to_string())),
        }
    }
}

impl Transport for MockTransport {
    type File = String;

    async fn post_multipart(&self, path: &str, parts: Vec<FormPart<'_, String>>) -> Result<Value> {
        let mut fields = Vec::new();
        let mut files = Vec::new();
        for part in parts {
            match part {
                FormPart::Text { name, value } => fields.push((name.to_string(), value)),
                FormPart::File { name, file } => files.push((name.to_string(), file.clone())),
            }
        }
        self.answer(Call { method: "POST", path: path.to_string(), fields, files, json: None })
            .await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.answer(Call {
            method: "POST",
            path: path.to_string(),
            fields: Vec::new(),
            files: Vec::new(),
            json: Some(body.clone()),
        })
        .await
    }

    async fn post_empty(&self, path: &str) -> Result<Value> {
        self.answer(Call {
            method: "POST",
            path: path.to_string(),
            fields: Vec::new(),
            files: Vec::new(),
            json: None,
        })
        .await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.answer(Call {
            method: "GET",
            path: path.to_string(),
            fields: Vec::new(),
            files: Vec::new(),
            json: None,
        })
        .await
    }
}

/// What the user would have seen
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ShowMode(Mode),
    Status(PdfStatus),
    ClearInput(FileInput),
    Alert(String),
    Confirm(String),
    Busy(Control, bool),
    Gallery(GalleryId, Vec<String>),
    SetField(String, String),
    ResetModal(bool),
    Reload,
}

#[derive(Default)]
pub struct MockSurface {
    pub events: RefCell<Vec<Event>>,
    answers: RefCell<VecDeque<bool>>,
    pub fields: RefCell<HashMap<String, String>>,
    pub phrase: RefCell<String>,
    busy: RefCell<HashMap<Control, bool>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming confirmations; unanswered ones decline
    pub fn answers(self, answers: &[bool]) -> Self {
        self.answers.borrow_mut().extend(answers.iter().copied());
        self
    }

    pub fn field(self, name: &str, value: &str) -> Self {
        self.fields.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn is_busy(&self, control: &Control) -> bool {
        self.busy.borrow().get(control).copied().unwrap_or(false)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn saw(&self, event: &Event) -> bool {
        self.events.borrow().contains(event)
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Surface for MockSurface {
    fn show_mode(&self, mode: Mode) {
        self.record(Event::ShowMode(mode));
    }

    fn pdf_status(&self, status: PdfStatus) {
        self.record(Event::Status(status));
    }

    fn clear_file_input(&self, input: FileInput) {
        self.record(Event::ClearInput(input));
    }

    fn alert(&self, message: &str) {
        self.record(Event::Alert(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(Event::Confirm(message.to_string()));
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }

    fn set_busy(&self, control: &Control, busy: bool) {
        self.busy.borrow_mut().insert(control.clone(), busy);
        self.record(Event::Busy(control.clone(), busy));
    }

    fn render_gallery(&self, gallery: GalleryId, items: &[GalleryItem]) {
        let names = items.iter().map(|i| i.filename.clone()).collect();
        self.record(Event::Gallery(gallery, names));
    }

    fn field_value(&self, field: &str) -> String {
        self.fields.borrow().get(field).cloned().unwrap_or_default()
    }

    fn set_field_value(&self, field: &str, value: &str) {
        self.fields.borrow_mut().insert(field.to_string(), value.to_string());
        self.record(Event::SetField(field.to_string(), value.to_string()));
    }

    fn show_reset_modal(&self, open: bool) {
        if open {
            self.phrase.borrow_mut().clear();
        }
        self.record(Event::ResetModal(open));
    }

    fn reset_phrase(&self) -> String {
        self.phrase.borrow().clone()
    }

    fn reload(&self) {
        self.record(Event::Reload);
    }
}
