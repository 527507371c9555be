//! Villa Admin
//!
//! Terminal front of the villa listing admin panel: PDF intake, gallery
//! management, AI field enhancement and reset against a running backend.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod scanner;
pub mod terminal;
