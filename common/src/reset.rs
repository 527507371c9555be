//! Reset confirmation guard

use crate::api::CONFIRMATION_PHRASE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Default)]
pub struct ResetModal {
    state: ModalState,
}

impl ResetModal {
    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    pub fn state(&self) -> ModalState {
        self.state
    }
}

/// Case-sensitive exact match once surrounding whitespace is dropped
pub fn phrase_matches(input: &str) -> bool {
    input.trim() == CONFIRMATION_PHRASE
}
