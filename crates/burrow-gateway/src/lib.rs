//! HTTP front end for the burrow URL shortener.
//!
//! Two thin handlers translate requests into [`KeyStore`](burrow_core::KeyStore)
//! calls: `GET /{key}` redirects to the stored URL and `/add` stores a new
//! one (or renders the input form when no URL is given).

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
