//!
//! Configuration structures and utilities for wiring up convention-based routing.
//!
//! A configuration can be created in many ways:
//! - From an environment-specific TOML file via `Config::from_rust_env` or `Config::from_toml_file`
//! - From a TOML string via `Config::from_toml`
//! - Constructed programmatically via the builder methods on `Config`
//!
//! In both TOML-based methods, environment variables can be referenced in the TOML
//! using the {{ VAR_NAME }} syntax, and they will be substituted with the corresponding
//! environment variable value. This is done via the `replace_handlebars_with_env`
//! function.
//!
//! Configuration is split into logical sections, each represented by their own struct:
//!
//! - `RoutingConfig` for discovery paths, method selection and registrar options
//! - `LoggingConfig` for logging and tracing settings
//!
mod logging;
mod routing;

pub use logging::*;
pub use routing::*;

use {
    crate::{Error, Result, utils::replace_handlebars_with_env},
    serde::Deserialize,
    std::{env, fs, path::PathBuf, str::FromStr},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    ///
    /// Creates a default configuration.
    /// This will attempt to load configuration from the file based on the RUST_ENV
    /// environment variable falling back to a default configuration if the environment
    /// variable is not set. Configuration files should be located in the "config/"
    /// directory of your project.
    ///
    fn default() -> Self {
        match Self::from_rust_env() {
            Ok(config) => config,
            Err(_) => Config {
                routing: RoutingConfig::default(),
                logging: LoggingConfig::default(),
            },
        }
    }
}

impl Config {
    ///
    /// Loads the configuration from a file based on the RUST_ENV environment variable.
    ///
    pub fn from_rust_env() -> Result<Config> {
        Self::from_toml_file(env::var("RUST_ENV")?)
    }

    ///
    /// Given an environment name, loads the corresponding configuration file,
    /// substitutes any environment variables, and returns a Config struct.
    /// The configuration file is expected to be located at "config/{env}.toml"
    /// where {env} is the provided environment name (e.g., "dev", "prod").
    ///
    pub fn from_toml_file(env: impl AsRef<str>) -> Result<Config> {
        let path = format!("config/{}.toml", env.as_ref());
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    ///
    /// Parses a configuration string in TOML format into a Config struct.
    ///
    pub fn from_toml(toml_str: &str) -> Result<Config> {
        toml_str.parse()
    }

    /// Sets the base directory of the default views/controllers/models directories.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.routing.root = root.into();
        self
    }

    /// Sets the views directory of the RoutingConfig.
    pub fn with_views_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.routing.views_path = Some(path.into());
        self
    }

    /// Sets the controllers directory of the RoutingConfig.
    pub fn with_controllers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.routing.controllers_path = Some(path.into());
        self
    }

    /// Sets the models directory of the RoutingConfig.
    pub fn with_models_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.routing.models_path = Some(path.into());
        self
    }

    /// Restricts exposed controller methods to HTTP-verb names.
    pub fn with_http_only(mut self, enable: bool) -> Self {
        self.routing.http_only = enable;
        self
    }

    /// Sets the file extensions recognized during discovery.
    pub fn with_source_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.routing.source_extensions =
            extensions.iter().map(|ext| ext.as_ref().to_string()).collect();
        self
    }

    /// Skips unresolvable files instead of failing discovery.
    pub fn with_skip_invalid(mut self, enable: bool) -> Self {
        self.routing.skip_invalid = enable;
        self
    }

    /// Sets the options forwarded to the host registrar.
    pub fn with_register_options(mut self, options: RegisterOptions) -> Self {
        self.routing.options = options;
        self
    }

    /// Sets the log format of the LoggingConfig.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.logging.format = format;
        self
    }

    /// Ensures that the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        self.routing.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    ///
    /// Sets up the tracing subscriber for logging based on the LoggingConfig.
    ///
    /// NOTE: This should be called early during startup so that discovery and
    ///       registration messages are captured.
    ///
    pub fn setup_tracing(&self) {
        use tracing_subscriber::{EnvFilter, prelude::*};
        let env_filter = EnvFilter::from_default_env();
        match self.logging.format {
            LogFormat::Json => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().json())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Default => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Compact => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().compact())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Pretty => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .with(env_filter)
                    .try_init();
            }
        }
    }
}

///
/// Parses a configuration string with references to environment variables
/// into a Config struct by substituting the environment variables and then
/// parsing the resulting TOML.
///
impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let config_file = replace_handlebars_with_env(s);
        let config = toml::from_str::<Config>(&config_file)?;
        Ok(config)
    }
}
