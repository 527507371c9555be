//! UI components

pub mod gallery;
pub mod header;
pub mod manual_form;
pub mod mode_switch;
pub mod pdf_panel;
pub mod reset_modal;
