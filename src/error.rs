//! Error types for convention-based discovery and route registration.
//!
//! Every failure the crate can produce is categorized by an [`ErrorKind`] and
//! carries a human-readable message naming the offending directory, file,
//! module or class.
//!
//! # Design
//!
//! This module uses an opaque `Error` struct paired with an `ErrorKind` enum,
//! following the `std::io::Error` pattern. Internal error sources can change
//! without breaking consumers.
//!
//! # Example
//!
//! ```rust
//! use axum_convention::{Error, ErrorKind};
//!
//! let error = Error::discovery("user_controller.rs: class `UserController` not found");
//!
//! match error.kind() {
//!     ErrorKind::Discovery => println!("Bad controller file: {}", error),
//!     ErrorKind::Configuration => println!("Misconfigured: {}", error),
//!     _ => println!("Other error: {}", error),
//! }
//!
//! assert_eq!(error.error_code(), "DISCOVERY_ERROR");
//! ```

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
///
/// # Stability
///
/// This enum is marked `#[non_exhaustive]`, so new variants may be added
/// in future versions without breaking existing code. Always include a
/// wildcard arm when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No usable controllers directory, or invalid configuration values.
    #[error("configuration error")]
    Configuration,

    /// A file matched the naming convention but its module or class could
    /// not be resolved.
    #[error("discovery error")]
    Discovery,

    /// A controller module name cannot be split into base name and suffix.
    #[error("naming ambiguity")]
    NamingAmbiguity,

    /// The host framework rejected a route (e.g. a conflicting rule).
    #[error("registration error")]
    Registration,

    /// I/O error while scanning a directory or reading a configuration file.
    #[error("I/O error")]
    Io,

    /// Internal/unexpected error.
    #[error("internal error")]
    Internal,
}

/// An error that can occur while discovering or registering controllers.
///
/// Use [`Error::kind()`] to determine the category of error for matching,
/// and the `Display` implementation to get a human-readable message.
///
/// ```rust
/// use axum_convention::{Error, ErrorKind};
///
/// let err = Error::config("No controller directories found");
/// assert_eq!(err.kind(), ErrorKind::Configuration);
///
/// let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// let err = Error::new(ErrorKind::Io, io_err);
/// assert_eq!(err.kind(), ErrorKind::Io);
/// ```
pub struct Error {
    kind: ErrorKind,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl Error {
    /// Creates a new error with the given kind and source.
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: error.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error code string for this error.
    ///
    /// This is a stable identifier suitable for matching in logs and tooling.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Configuration => "CONFIG_ERROR",
            ErrorKind::Discovery => "DISCOVERY_ERROR",
            ErrorKind::NamingAmbiguity => "NAMING_AMBIGUITY",
            ErrorKind::Registration => "REGISTRATION_ERROR",
            ErrorKind::Io => "IO_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Consumes the error and returns the inner error source.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.source
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg.into())
    }

    /// Creates a discovery error.
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Discovery, msg.into())
    }

    /// Creates a naming ambiguity error for the given module name.
    pub fn naming_ambiguity(module_name: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::NamingAmbiguity,
            format!(
                "Module name `{}` must look like `<name>_view` or `<name>_controller`",
                module_name.as_ref()
            ),
        )
    }

    /// Creates a registration error.
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Registration, msg.into())
    }

    /// Creates an I/O error from a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, msg.into())
    }

    /// Creates an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg.into())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Configuration), "configuration error");
        assert_eq!(format!("{}", ErrorKind::Discovery), "discovery error");
        assert_eq!(format!("{}", ErrorKind::NamingAmbiguity), "naming ambiguity");
    }

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Internal, "test error");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(format!("{}", err), "test error");
    }

    #[test]
    fn test_error_constructors_set_kind() {
        assert_eq!(Error::config("x").kind(), ErrorKind::Configuration);
        assert_eq!(Error::discovery("x").kind(), ErrorKind::Discovery);
        assert_eq!(Error::registration("x").kind(), ErrorKind::Registration);
        assert_eq!(Error::io("x").kind(), ErrorKind::Io);
        assert_eq!(Error::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_naming_ambiguity_mentions_module() {
        let err = Error::naming_ambiguity("usercontroller");
        assert_eq!(err.kind(), ErrorKind::NamingAmbiguity);
        assert!(err.to_string().contains("usercontroller"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::config("t").error_code(), "CONFIG_ERROR");
        assert_eq!(Error::discovery("t").error_code(), "DISCOVERY_ERROR");
        assert_eq!(
            Error::naming_ambiguity("t").error_code(),
            "NAMING_AMBIGUITY"
        );
        assert_eq!(Error::registration("t").error_code(), "REGISTRATION_ERROR");
        assert_eq!(Error::io("t").error_code(), "IO_ERROR");
        assert_eq!(Error::internal("t").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Table>("invalid").unwrap_err();
        let err: Error = toml_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_regex_error() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = regex_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_debug() {
        let err = Error::internal("test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Error"));
        assert!(debug_str.contains("Internal"));
    }

    #[test]
    fn test_error_into_inner() {
        let err = Error::internal("test message");
        let inner = err.into_inner();
        assert_eq!(format!("{}", inner), "test message");
    }

    #[test]
    fn test_error_source_trait() {
        let err = Error::internal("test");
        assert!(StdError::source(&err).is_some());
    }
}
