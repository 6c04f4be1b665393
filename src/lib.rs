//! # axum-convention
//!
//! Convention-over-configuration routing for Axum.
//!
//! Point the router at a directory of controllers and a directory of models.
//! It discovers both by file name, derives class names and pluralized REST
//! route bases from those names, makes every model available to every
//! controller and registers the controllers' methods as axum routes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::{Extension, extract::Path};
//! use axum_convention::{
//!     App, Config, ControllerClass, ConventionRouter, ModelClass, ModelContext, ModuleRegistry,
//!     Namespace, Result,
//! };
//!
//! struct UserStore;
//!
//! async fn index(Extension(models): Extension<ModelContext>) -> String {
//!     format!("{} models available", models.len())
//! }
//!
//! async fn show(Path(id): Path<u64>) -> String {
//!     format!("user {id}")
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default(); // Loads from config/{RUST_ENV}.toml
//!     config.setup_tracing();
//!
//!     // One namespace per file found in the views and models directories
//!     let registry = ModuleRegistry::<()>::new()
//!         .with_module(
//!             Namespace::new("user_controller").with_controller(
//!                 ControllerClass::new("UserController")
//!                     .method("index", index)
//!                     .method("get", show),
//!             ),
//!         )
//!         .with_module(Namespace::new("user").with_model(ModelClass::new("User", UserStore)));
//!
//!     let mut app = App::new();
//!     ConventionRouter::new(config, registry)?.mount(&mut app)?;
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app.into_inner()).await?;
//!     Ok(())
//! }
//! ```
//!
//! With `config/dev.toml`:
//! ```toml
//! [routing]
//! root = "app"          # app/views (or app/controllers) and app/models
//! http_only = false
//!
//! [routing.options]
//! route_prefix = "/api"
//! ```
//!
//! and the files `app/views/user_controller.rs` and `app/models/user.rs`,
//! the router serves `GET /api/users` and `GET /api/users/{id}`.
//!
//! # Conventions
//!
//! | Convention | Rule |
//! |------------|------|
//! | Controller file | `<name>_view.<ext>` or `<name>_controller.<ext>` |
//! | Controller class | each word of `<name>` capitalized + `View`/`Controller` |
//! | Model file | any `<name>.<ext>` not starting with `_` or `.` |
//! | Model class | `<name>` lower-cased with its first letter capitalized |
//! | Route base | class name without `View`/`Controller`, lower-cased, pluralized |
//! | Abstract class | skipped, unless a direct base is itself abstract |
//!
//! # Method selection
//!
//! With `http_only = true` only `get`, `post`, `put`, `patch`, `delete` and
//! `index` become routes. Otherwise every method a controller introduces
//! (not found on any direct base) becomes a route, whatever its name.
//!
//! # Errors
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. See [`ErrorKind`] for the categories.

mod class;
mod config;
mod discovery;
mod error;
mod inject;
mod namespace;
mod naming;
mod paths;
mod router;
mod routing;
mod utils;

pub use class::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use inject::*;
pub use namespace::*;
pub use naming::*;
pub use paths::*;
pub use router::*;
pub use routing::*;
pub use utils::*;

pub type Result<T> = std::result::Result<T, Error>;
