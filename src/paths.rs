//! Resolution of the controllers and models directories.

use {
    crate::{Error, Result, RoutingConfig},
    std::path::PathBuf,
};

/// Default controllers directories, tried in order under `root`.
pub const DEFAULT_CONTROLLER_DIRS: [&str; 2] = ["views", "controllers"];

/// Default models directory under `root`.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Returns the first existing directory among `views_path`,
/// `controllers_path`, `{root}/views` and `{root}/controllers`.
///
/// # Errors
///
/// Returns a configuration error listing every candidate when none of them is
/// a directory.
pub fn resolve_controllers_path(config: &RoutingConfig) -> Result<PathBuf> {
    let configured = [&config.views_path, &config.controllers_path]
        .into_iter()
        .flatten()
        .cloned();
    let defaults = DEFAULT_CONTROLLER_DIRS
        .iter()
        .map(|dir| config.root.join(dir));
    let candidates: Vec<PathBuf> = configured.chain(defaults).collect();

    for missing in [&config.views_path, &config.controllers_path]
        .into_iter()
        .flatten()
        .filter(|path| !path.is_dir())
    {
        tracing::warn!(
            directory = %missing.display(),
            "Configured controllers directory does not exist"
        );
    }

    match candidates.iter().find(|path| path.is_dir()) {
        Some(path) => {
            tracing::debug!(directory = %path.display(), "Resolved controllers directory");
            Ok(path.clone())
        }
        None => {
            let tried = candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(Error::config(format!(
                "No controllers directory found (tried: {})",
                tried
            )))
        }
    }
}

/// Returns `models_path` (or `{root}/models` when unset) if it is a
/// directory. Models are optional, so a missing directory yields `None`.
pub fn resolve_models_path(config: &RoutingConfig) -> Option<PathBuf> {
    let path = config
        .models_path
        .clone()
        .unwrap_or_else(|| config.root.join(DEFAULT_MODELS_DIR));

    if path.is_dir() {
        tracing::debug!(directory = %path.display(), "Resolved models directory");
        Some(path)
    } else {
        if config.models_path.is_some() {
            tracing::warn!(
                directory = %path.display(),
                "Configured models directory does not exist"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn config_at(root: &TempDir) -> RoutingConfig {
        RoutingConfig {
            root: root.path().to_path_buf(),
            ..RoutingConfig::default()
        }
    }

    #[test]
    fn test_views_path_wins_over_controllers_path() {
        let root = TempDir::new().unwrap();
        let views = root.path().join("app_views");
        let controllers = root.path().join("app_controllers");
        fs::create_dir(&views).unwrap();
        fs::create_dir(&controllers).unwrap();

        let config = RoutingConfig {
            views_path: Some(views.clone()),
            controllers_path: Some(controllers),
            ..config_at(&root)
        };
        assert_eq!(resolve_controllers_path(&config).unwrap(), views);
    }

    #[test]
    fn test_missing_views_path_falls_through() {
        let root = TempDir::new().unwrap();
        let controllers = root.path().join("app_controllers");
        fs::create_dir(&controllers).unwrap();

        let config = RoutingConfig {
            views_path: Some(root.path().join("missing")),
            controllers_path: Some(controllers.clone()),
            ..config_at(&root)
        };
        assert_eq!(resolve_controllers_path(&config).unwrap(), controllers);
    }

    #[test]
    fn test_default_directories_in_order() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("controllers")).unwrap();
        let config = config_at(&root);
        assert_eq!(
            resolve_controllers_path(&config).unwrap(),
            root.path().join("controllers")
        );

        fs::create_dir(root.path().join("views")).unwrap();
        assert_eq!(
            resolve_controllers_path(&config).unwrap(),
            root.path().join("views")
        );
    }

    #[test]
    fn test_no_controllers_directory_is_a_configuration_error() {
        let root = TempDir::new().unwrap();
        let err = resolve_controllers_path(&config_at(&root)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("views"));
        assert!(err.to_string().contains("controllers"));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("views"), "not a dir").unwrap();
        assert!(resolve_controllers_path(&config_at(&root)).is_err());
    }

    #[test]
    fn test_models_path_resolution() {
        let root = TempDir::new().unwrap();
        let config = config_at(&root);
        assert_eq!(resolve_models_path(&config), None);

        fs::create_dir(root.path().join("models")).unwrap();
        assert_eq!(
            resolve_models_path(&config),
            Some(root.path().join("models"))
        );

        let config = RoutingConfig {
            models_path: Some(root.path().join("elsewhere")),
            ..config
        };
        assert_eq!(resolve_models_path(&config), None);
    }
}
