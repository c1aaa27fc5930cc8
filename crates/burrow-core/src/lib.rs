//! Core types and traits for the burrow URL shortener.
//!
//! This crate provides the types shared by the key generator, the
//! log-backed store and the HTTP gateway.

pub mod error;
pub mod record;
pub mod shortcode;
pub mod store;

pub use error::CoreError;
pub use record::Record;
pub use shortcode::ShortCode;
pub use store::KeyStore;
