//! Module namespaces and the registry that stands in for a module import
//! mechanism.
//!
//! The embedding application registers one [`Namespace`] per source file it
//! wants discovered, keyed by the file's module name. Discovery then
//! "imports" namespaces by name and resolves the class named by convention.

use {
    crate::{ControllerClass, Error, ModelClass, Result},
    std::{
        collections::HashMap,
        fmt,
        path::{Path, PathBuf},
        sync::Arc,
    },
};

/// A value bound to a name in a [`Namespace`].
pub enum Attribute<S = ()> {
    Controller(Arc<ControllerClass<S>>),
    Model(ModelClass),
}

impl<S> Clone for Attribute<S> {
    fn clone(&self) -> Self {
        match self {
            Attribute::Controller(class) => Attribute::Controller(Arc::clone(class)),
            Attribute::Model(model) => Attribute::Model(model.clone()),
        }
    }
}

impl<S> fmt::Debug for Attribute<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Controller(class) => f.debug_tuple("Controller").field(class).finish(),
            Attribute::Model(model) => f.debug_tuple("Model").field(model).finish(),
        }
    }
}

impl<S> From<ControllerClass<S>> for Attribute<S> {
    fn from(class: ControllerClass<S>) -> Self {
        Attribute::Controller(Arc::new(class))
    }
}

impl<S> From<ModelClass> for Attribute<S> {
    fn from(model: ModelClass) -> Self {
        Attribute::Model(model)
    }
}

///
/// A module: a name plus an ordered table of named attributes.
///
pub struct Namespace<S = ()> {
    name: String,
    attributes: Vec<(String, Attribute<S>)>,
}

impl<S> Namespace<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Binds a controller class under its own name.
    pub fn with_controller(mut self, class: ControllerClass<S>) -> Self {
        let name = class.name().to_string();
        self.set_attribute(name, class);
        self
    }

    /// Binds a model class under its own name.
    pub fn with_model(mut self, model: ModelClass) -> Self {
        let name = model.name().to_string();
        self.set_attribute(name, model);
        self
    }

    /// Binds `value` to `name`, silently replacing any previous binding.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Attribute<S>>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute<S>> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute<S>)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The controller class bound to `name`, if that attribute is a controller.
    pub fn controller(&self, name: &str) -> Option<Arc<ControllerClass<S>>> {
        match self.attribute(name) {
            Some(Attribute::Controller(class)) => Some(Arc::clone(class)),
            _ => None,
        }
    }

    /// The model class bound to `name`, if that attribute is a model.
    pub fn model(&self, name: &str) -> Option<&ModelClass> {
        match self.attribute(name) {
            Some(Attribute::Model(model)) => Some(model),
            _ => None,
        }
    }

    /// Every model attribute, keyed by attribute name.
    pub fn models(&self) -> impl Iterator<Item = (&str, &ModelClass)> {
        self.attributes.iter().filter_map(|(name, value)| match value {
            Attribute::Model(model) => Some((name.as_str(), model)),
            Attribute::Controller(_) => None,
        })
    }
}

impl<S> Clone for Namespace<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl<S> fmt::Debug for Namespace<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

///
/// Registry of importable modules, keyed by module name, plus the list of
/// directories that have been added to the import search path.
///
/// ```rust
/// use axum_convention::{ControllerClass, ModuleRegistry, Namespace};
///
/// async fn index() -> &'static str { "users" }
///
/// let registry = ModuleRegistry::<()>::new().with_module(
///     Namespace::new("user_controller")
///         .with_controller(ControllerClass::new("UserController").method("index", index)),
/// );
///
/// let module = registry.import("user_controller").unwrap();
/// assert!(module.controller("UserController").is_some());
/// assert!(registry.import("post_controller").is_err());
/// ```
///
pub struct ModuleRegistry<S = ()> {
    modules: HashMap<String, Namespace<S>>,
    search_paths: Vec<PathBuf>,
}

impl<S> Default for ModuleRegistry<S> {
    fn default() -> Self {
        Self {
            modules: HashMap::new(),
            search_paths: Vec::new(),
        }
    }
}

impl<S> ModuleRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: Namespace<S>) -> Self {
        self.insert(module);
        self
    }

    /// Registers a module, returning the module it replaces.
    pub fn insert(&mut self, module: Namespace<S>) -> Option<Namespace<S>> {
        self.modules.insert(module.name().to_string(), module)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns a copy of the module registered under `name`.
    pub fn import(&self, name: &str) -> Result<Namespace<S>> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| Error::discovery(format!("No module named `{}`", name)))
    }

    /// Adds a directory to the search path unless it is already present.
    /// Returns whether the path was added.
    pub fn add_search_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if self.search_paths.iter().any(|p| p == path) {
            return false;
        }
        self.search_paths.push(path.to_path_buf());
        true
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl<S> Clone for ModuleRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            modules: self.modules.clone(),
            search_paths: self.search_paths.clone(),
        }
    }
}

impl<S> fmt::Debug for ModuleRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.modules.keys().collect();
        names.sort();
        f.debug_struct("ModuleRegistry")
            .field("modules", &names)
            .field("search_paths", &self.search_paths)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut module = Namespace::<()>::new("user")
            .with_model(ModelClass::new("User", 1u8))
            .with_model(ModelClass::new("Post", 2u8));
        module.set_attribute("User", ModelClass::new("User", 3u8));

        let names: Vec<_> = module.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["User", "Post"]);
        assert_eq!(module.model("User").and_then(|m| m.downcast::<u8>()), Some(&3));
    }

    #[test]
    fn test_typed_lookups() {
        let module = Namespace::<()>::new("user_controller")
            .with_controller(ControllerClass::new("UserController"))
            .with_model(ModelClass::new("User", ()));

        assert!(module.controller("UserController").is_some());
        assert!(module.model("UserController").is_none());
        assert!(module.controller("User").is_none());
        assert_eq!(module.models().count(), 1);
    }

    #[test]
    fn test_import_unknown_module_is_a_discovery_error() {
        let registry = ModuleRegistry::<()>::new();
        let err = registry.import("ghost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Discovery);
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_import_returns_independent_copy() {
        let registry =
            ModuleRegistry::<()>::new().with_module(Namespace::new("user_controller"));
        let mut copy = registry.import("user_controller").unwrap();
        copy.set_attribute("User", ModelClass::new("User", ()));

        let fresh = registry.import("user_controller").unwrap();
        assert!(fresh.attribute("User").is_none());
    }

    #[test]
    fn test_search_paths_are_deduplicated() {
        let mut registry = ModuleRegistry::<()>::new();
        assert!(registry.add_search_path("app/controllers"));
        assert!(!registry.add_search_path("app/controllers"));
        assert!(registry.add_search_path("app/models"));
        assert_eq!(registry.search_paths().len(), 2);
    }
}
