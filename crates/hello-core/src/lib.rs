//! # hello-core
//!
//! Core envelope types, dispatcher, string tables, configuration, and error
//! handling for the hello-skill voice backend.

pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod input;
pub mod response;
pub mod traits;
