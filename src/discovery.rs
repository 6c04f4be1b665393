//!
//! Directory scanning that turns convention-named source files into
//! controller and model descriptors.
//!
//! For every file whose name matches the convention pattern, the module name
//! and the expected class name are derived, the module is imported from the
//! [`ModuleRegistry`] and the class is looked up in it. Files that match the
//! pattern but cannot be resolved fail discovery, or are logged and skipped
//! when `skip_invalid` is enabled.
//!
use {
    crate::{
        ControllerClass, Error, ModelClass, ModuleRegistry, Namespace, Result,
        controller_class_name, model_class_name, module_name_from_file,
    },
    regex::Regex,
    std::{fmt, fs, path::Path, sync::Arc},
};

/// Module names never treated as models or controllers.
const RESERVED_MODULES: [&str; 3] = ["mod", "lib", "main"];

/// A discovered class together with the namespace of the module defining it.
pub struct Descriptor<C, S = ()> {
    class: C,
    module: Namespace<S>,
}

pub type ControllerDescriptor<S = ()> = Descriptor<Arc<ControllerClass<S>>, S>;
pub type ModelDescriptor<S = ()> = Descriptor<ModelClass, S>;

impl<C, S> Descriptor<C, S> {
    pub fn new(class: C, module: Namespace<S>) -> Self {
        Self { class, module }
    }

    pub fn class(&self) -> &C {
        &self.class
    }

    pub fn module(&self) -> &Namespace<S> {
        &self.module
    }
}

impl<S> ControllerDescriptor<S> {
    /// Mutable access to the controller's namespace, used by model injection.
    pub fn module_mut(&mut self) -> &mut Namespace<S> {
        &mut self.module
    }
}

impl<C: fmt::Debug, S> fmt::Debug for Descriptor<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("class", &self.class)
            .field("module", &self.module)
            .finish()
    }
}

/// Builds the case-insensitive pattern matching `<name>_view.<ext>` and
/// `<name>_controller.<ext>` for any of the given extensions.
pub fn controller_file_pattern<E: AsRef<str>>(extensions: &[E]) -> Result<Regex> {
    let pattern = format!(
        r"(?i)^(.+)_(view|controller)\.({})$",
        extension_alternation(extensions)
    );
    Ok(Regex::new(&pattern)?)
}

/// Builds the case-insensitive pattern matching any source file whose name
/// does not start with `_` or `.`.
pub fn model_file_pattern<E: AsRef<str>>(extensions: &[E]) -> Result<Regex> {
    let pattern = format!(r"(?i)^[^_.].*\.({})$", extension_alternation(extensions));
    Ok(Regex::new(&pattern)?)
}

fn extension_alternation<E: AsRef<str>>(extensions: &[E]) -> String {
    extensions
        .iter()
        .map(|ext| regex::escape(ext.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

/// Scans directories and resolves classes through a [`ModuleRegistry`].
pub struct Discovery<'r, S = ()> {
    registry: &'r mut ModuleRegistry<S>,
    skip_invalid: bool,
}

impl<'r, S> Discovery<'r, S> {
    pub fn new(registry: &'r mut ModuleRegistry<S>) -> Self {
        Self {
            registry,
            skip_invalid: false,
        }
    }

    /// Logs and skips unresolvable files instead of failing.
    pub fn with_skip_invalid(mut self, enable: bool) -> Self {
        self.skip_invalid = enable;
        self
    }

    /// Discovers every controller class in `directory`.
    pub fn discover_controllers<E: AsRef<str>>(
        &mut self,
        directory: &Path,
        extensions: &[E],
    ) -> Result<Vec<ControllerDescriptor<S>>> {
        let pattern = controller_file_pattern(extensions)?;
        self.discover(
            directory,
            &pattern,
            |file| module_name_from_file(file),
            controller_class_name,
            |module, class_name| module.controller(class_name),
        )
    }

    /// Discovers every model class in `directory`.
    pub fn discover_models<E: AsRef<str>>(
        &mut self,
        directory: &Path,
        extensions: &[E],
    ) -> Result<Vec<ModelDescriptor<S>>> {
        let pattern = model_file_pattern(extensions)?;
        self.discover(
            directory,
            &pattern,
            |file| module_name_from_file(file),
            |module_name| Ok(model_class_name(module_name)),
            |module, class_name| module.model(class_name).cloned(),
        )
    }

    /// Generic discovery pass.
    ///
    /// Lists `directory`, keeps the file names matching `pattern`, derives
    /// module and class names with the given namers, imports each module and
    /// resolves the class with `resolve`. Descriptors are returned in
    /// directory listing order.
    pub fn discover<C, M, N, F>(
        &mut self,
        directory: &Path,
        pattern: &Regex,
        module_namer: M,
        class_namer: N,
        resolve: F,
    ) -> Result<Vec<Descriptor<C, S>>>
    where
        M: Fn(&str) -> String,
        N: Fn(&str) -> Result<String>,
        F: Fn(&Namespace<S>, &str) -> Option<C>,
    {
        let entries = fs::read_dir(directory)?;
        self.registry.add_search_path(directory);

        let mut descriptors = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                tracing::warn!(
                    directory = %directory.display(),
                    file = ?entry.file_name(),
                    "Skipping file with a non UTF-8 name"
                );
                continue;
            };
            if !pattern.is_match(file_name) {
                continue;
            }

            let module_name = module_namer(file_name);
            if RESERVED_MODULES.contains(&module_name.as_str()) {
                continue;
            }

            let resolved = class_namer(&module_name).and_then(|class_name| {
                let module = self.registry.import(&module_name)?;
                let class = resolve(&module, &class_name).ok_or_else(|| {
                    Error::discovery(format!(
                        "{}: class `{}` not found in module `{}`",
                        file_name, class_name, module_name
                    ))
                })?;
                Ok((class_name, Descriptor::new(class, module)))
            });

            match resolved {
                Ok((class_name, descriptor)) => {
                    tracing::debug!(
                        file = %file_name,
                        module = %module_name,
                        class = %class_name,
                        "Discovered class"
                    );
                    descriptors.push(descriptor);
                }
                Err(err) if self.skip_invalid => {
                    tracing::warn!(
                        file = %file_name,
                        module = %module_name,
                        error = %err,
                        "Skipping unresolvable file"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        file = %file_name,
                        module = %module_name,
                        error = %err,
                        "Discovery aborted"
                    );
                    return Err(Error::new(
                        err.kind(),
                        format!("{} ({})", err, directory.join(file_name).display()),
                    ));
                }
            }
        }
        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::TempDir;

    async fn handler() -> &'static str {
        "ok"
    }

    fn touch(dir: &TempDir, names: &[&str]) {
        for name in names {
            fs::write(dir.path().join(name), "").unwrap();
        }
    }

    fn controller_module(module: &str, class: &str) -> Namespace {
        Namespace::new(module).with_controller(ControllerClass::new(class).method("index", handler))
    }

    #[test]
    fn test_controller_pattern() {
        let pattern = controller_file_pattern(&["rs"]).unwrap();
        assert!(pattern.is_match("user_controller.rs"));
        assert!(pattern.is_match("user_view.rs"));
        assert!(pattern.is_match("User_Controller.RS"));
        assert!(pattern.is_match("blog_post_controller.rs"));
        assert!(!pattern.is_match("usercontroller.rs"));
        assert!(!pattern.is_match("user_controller.py"));
        assert!(!pattern.is_match("user_controller.rs.bak"));
        assert!(!pattern.is_match("_controller.rs"));
    }

    #[test]
    fn test_pattern_escapes_extensions() {
        let pattern = controller_file_pattern(&["r+s"]).unwrap();
        assert!(pattern.is_match("user_view.r+s"));
        assert!(!pattern.is_match("user_view.rrs"));
    }

    #[test]
    fn test_model_pattern() {
        let pattern = model_file_pattern(&["rs", "tpl"]).unwrap();
        assert!(pattern.is_match("user.rs"));
        assert!(pattern.is_match("Post.tpl"));
        assert!(!pattern.is_match("_private.rs"));
        assert!(!pattern.is_match(".hidden.rs"));
        assert!(!pattern.is_match("notes.txt"));
    }

    #[test]
    fn test_discover_controllers() {
        let dir = TempDir::new().unwrap();
        touch(
            &dir,
            &["user_controller.rs", "post_view.rs", "helpers.rs", "README.md"],
        );
        fs::create_dir(dir.path().join("nested_controller.rs")).unwrap();

        let mut registry = ModuleRegistry::new()
            .with_module(controller_module("user_controller", "UserController"))
            .with_module(controller_module("post_view", "PostView"));
        let mut discovery = Discovery::new(&mut registry);
        let mut found = discovery
            .discover_controllers(dir.path(), &["rs"])
            .unwrap();
        found.sort_by(|a, b| a.class().name().cmp(b.class().name()));

        let names: Vec<_> = found.iter().map(|d| d.class().name()).collect();
        assert_eq!(names, vec!["PostView", "UserController"]);
        assert_eq!(found[1].module().name(), "user_controller");
        assert_eq!(registry.search_paths(), &[dir.path().to_path_buf()]);
    }

    #[test]
    fn test_mismatched_class_name_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["blog_post_controller.rs"]);

        let mut registry = ModuleRegistry::new()
            .with_module(controller_module("blog_post_controller", "Blog_postController"));
        let err = Discovery::new(&mut registry)
            .discover_controllers(dir.path(), &["rs"])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Discovery);
        let message = err.to_string();
        assert!(message.contains("blog_post_controller.rs"), "{message}");
        assert!(message.contains("BlogPostController"), "{message}");
    }

    #[test]
    fn test_unregistered_module_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["user_controller.rs"]);

        let mut registry = ModuleRegistry::<()>::new();
        let err = Discovery::new(&mut registry)
            .discover_controllers(dir.path(), &["rs"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Discovery);
        assert!(err.to_string().contains("user_controller"));
    }

    #[test]
    fn test_skip_invalid_continues() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["user_controller.rs", "ghost_controller.rs"]);

        let mut registry = ModuleRegistry::new()
            .with_module(controller_module("user_controller", "UserController"));
        let found = Discovery::new(&mut registry)
            .with_skip_invalid(true)
            .discover_controllers(dir.path(), &["rs"])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class().name(), "UserController");
    }

    #[test]
    fn test_discover_models() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["USER.rs", "post.rs", "mod.rs", "_draft.rs"]);

        let mut registry = ModuleRegistry::<()>::new()
            .with_module(Namespace::new("USER").with_model(ModelClass::new("User", "users")))
            .with_module(Namespace::new("post").with_model(ModelClass::new("Post", "posts")));
        let mut found = Discovery::new(&mut registry)
            .discover_models(dir.path(), &["rs"])
            .unwrap();
        found.sort_by(|a, b| a.class().name().cmp(b.class().name()));

        let names: Vec<_> = found.iter().map(|d| d.class().name()).collect();
        assert_eq!(names, vec!["Post", "User"]);
        assert_eq!(found[1].class().downcast::<&str>(), Some(&"users"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut registry = ModuleRegistry::<()>::new();
        let err = Discovery::new(&mut registry)
            .discover_models(&dir.path().join("missing"), &["rs"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(registry.search_paths().is_empty());
    }
}
