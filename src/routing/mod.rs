//! Route registration into an axum application.
//!
//! - [`app`] - `App` wrapper around `axum::Router` and its route table
//! - [`selector`] - Method selection strategies
//! - [`host`] - Class registrar trait and the axum implementation
//! - [`registrar`] - Abstract detection and per-controller registration

mod app;
mod host;
mod registrar;
mod selector;

pub use app::*;
pub use host::*;
pub use registrar::*;
pub use selector::*;
