//! Rirekisho - Japanese resume builder
//!
//! Collects personal, education and employment history, translates the
//! free-text fields into resume Japanese through an LLM backend, and renders
//! the fixed rirekisho layout for printing or Word export.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod resume;
pub mod state;
pub mod translate;
pub mod update;
pub mod workflow;
