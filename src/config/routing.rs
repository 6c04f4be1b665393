use {
    crate::{Error, Result},
    serde::Deserialize,
    std::path::PathBuf,
};

///
/// Configuration for controller/model discovery and route registration.
///
/// Every field is optional in TOML. Explicit paths take precedence over the
/// default `views`, `controllers` and `models` directories located under
/// `root`.
///
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Base directory for the default `views`, `controllers` and `models`
    /// directories. By default `root` is the current working directory (".").
    #[serde(default = "RoutingConfig::default_root")]
    pub root: PathBuf,

    /// Explicit controllers directory. Preferred over `controllers_path`.
    #[serde(default)]
    pub views_path: Option<PathBuf>,

    /// Explicit controllers directory, used when `views_path` is not set.
    #[serde(default)]
    pub controllers_path: Option<PathBuf>,

    /// Explicit models directory. Models are optional: a missing directory
    /// simply means no model is injected.
    #[serde(default)]
    pub models_path: Option<PathBuf>,

    /// When true only HTTP-verb methods (get, post, put, patch, delete, index)
    /// become routes. Otherwise every method newly introduced by a controller
    /// is exposed. By default `http_only` is false.
    #[serde(default)]
    pub http_only: bool,

    /// File extensions recognized as source files during discovery.
    /// By default `source_extensions` is `["rs"]`.
    #[serde(default = "RoutingConfig::default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// When true a file whose module or class cannot be resolved is logged and
    /// skipped instead of aborting discovery. By default `skip_invalid` is false.
    #[serde(default)]
    pub skip_invalid: bool,

    /// Options forwarded verbatim to the host registrar.
    #[serde(default)]
    pub options: RegisterOptions,
}

impl RoutingConfig {
    fn default_root() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_source_extensions() -> Vec<String> {
        vec!["rs".into()]
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_extensions.is_empty() {
            return Err(Error::config(
                "[routing] source_extensions must list at least one extension, e.g. [\"rs\"]",
            ));
        }
        for ext in &self.source_extensions {
            if ext.trim().is_empty() || ext.contains('.') {
                return Err(Error::config(format!(
                    "[routing] source_extensions entry `{}` must be a bare extension without dots",
                    ext
                )));
            }
        }
        self.options.validate()
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            root: Self::default_root(),
            views_path: None,
            controllers_path: None,
            models_path: None,
            http_only: false,
            source_extensions: Self::default_source_extensions(),
            skip_invalid: false,
            options: RegisterOptions::default(),
        }
    }
}

///
/// Options handed to the host registrar for every controller.
///
/// `route_prefix` and `trailing_slash` are understood by the built-in axum
/// registrar. Any other key is collected into `extra` and passed through
/// untouched for custom registrars.
///
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterOptions {
    /// Prefix prepended to every rule, e.g. "/api".
    #[serde(default)]
    pub route_prefix: Option<String>,

    /// Whether every rule ends with a trailing slash. By default false.
    #[serde(default)]
    pub trailing_slash: bool,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl RegisterOptions {
    /// Sets the route prefix.
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = Some(prefix.into());
        self
    }

    /// Enables or disables trailing slashes on generated rules.
    pub fn with_trailing_slash(mut self, enable: bool) -> Self {
        self.trailing_slash = enable;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.route_prefix
            && (!prefix.starts_with('/') || prefix.ends_with('/'))
        {
            return Err(Error::config(format!(
                "[routing.options] route_prefix `{}` must start with '/' and must not end with '/'",
                prefix
            )));
        }
        Ok(())
    }
}
