//! Controller and model "classes": the runtime descriptions that discovery
//! resolves from module namespaces.
//!
//! A [`ControllerClass`] is a named bundle of axum handlers. Classes can
//! extend other classes, inheriting their methods and their abstract marker
//! the way class attributes are inherited.

use {
    axum::{
        handler::Handler,
        routing::{MethodFilter, MethodRouter, on},
    },
    std::{
        any::Any,
        collections::{BTreeMap, BTreeSet, HashSet},
        fmt,
        sync::Arc,
    },
};

type MethodFactory<S> = Arc<dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync>;

/// A single controller method backed by an axum handler.
pub struct ControllerMethod<S = ()> {
    name: String,
    factory: MethodFactory<S>,
    arguments: Option<Vec<String>>,
    defaults: BTreeMap<String, String>,
}

impl<S> ControllerMethod<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates a method named `name` that dispatches to `handler`.
    pub fn new<H, T>(name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(move |filter| on(filter, handler.clone())),
            arguments: None,
            defaults: BTreeMap::new(),
        }
    }

    /// Declares the path parameters of this method, replacing the registrar's
    /// default (`id` for `get`, `put`, `patch` and `delete`, none otherwise).
    pub fn with_arguments<I, A>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a rule default, exposed to the handler as a
    /// [`RouteDefaults`](crate::RouteDefaults) extension.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Builds an axum method router answering the given methods.
    pub fn method_router(&self, filter: MethodFilter) -> MethodRouter<S> {
        (self.factory)(filter)
    }
}

impl<S> ControllerMethod<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }
}

impl<S> Clone for ControllerMethod<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            factory: Arc::clone(&self.factory),
            arguments: self.arguments.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl<S> fmt::Debug for ControllerMethod<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerMethod")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

///
/// A controller class: a name, its direct bases, an optional abstract marker,
/// an optional route-base override and its own methods.
///
/// ```rust
/// use axum_convention::ControllerClass;
///
/// async fn list() -> &'static str { "all" }
/// async fn show() -> &'static str { "one" }
/// async fn ping() -> &'static str { "pong" }
///
/// let base = ControllerClass::<()>::new("BaseController")
///     .with_abstract(true)
///     .method("ping", ping);
/// let users = ControllerClass::new("UserController")
///     .with_base(base)
///     .method("index", list)
///     .method("get", show);
///
/// assert!(users.abstract_marker());
/// assert!(users.attribute_names().contains("ping"));
/// assert_eq!(users.members().len(), 3);
/// ```
///
pub struct ControllerClass<S = ()> {
    name: String,
    bases: Vec<Arc<ControllerClass<S>>>,
    abstract_marker: Option<bool>,
    route_base: Option<String>,
    methods: Vec<ControllerMethod<S>>,
}

impl<S> ControllerClass<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            abstract_marker: None,
            route_base: None,
            methods: Vec::new(),
        }
    }

    /// Appends a direct base class.
    pub fn with_base(mut self, base: impl Into<Arc<ControllerClass<S>>>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Sets the class's own abstract marker.
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.abstract_marker = Some(is_abstract);
        self
    }

    /// Overrides the route base derived from the class name.
    pub fn with_route_base(mut self, route_base: impl Into<String>) -> Self {
        self.route_base = Some(route_base.into());
        self
    }

    /// Adds a method, replacing an own method of the same name.
    pub fn with_method(mut self, method: ControllerMethod<S>) -> Self {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<ControllerClass<S>>] {
        &self.bases
    }

    pub fn own_methods(&self) -> &[ControllerMethod<S>] {
        &self.methods
    }

    pub fn own_abstract_marker(&self) -> Option<bool> {
        self.abstract_marker
    }

    /// The class's own route-base override. Not inherited.
    pub fn route_base_override(&self) -> Option<&str> {
        self.route_base.as_deref()
    }

    /// Resolved abstract marker: the class's own value, else the first value
    /// found among its bases (depth-first, in order), else `false`.
    pub fn abstract_marker(&self) -> bool {
        self.resolve_abstract_marker().unwrap_or(false)
    }

    fn resolve_abstract_marker(&self) -> Option<bool> {
        self.abstract_marker.or_else(|| {
            self.bases
                .iter()
                .find_map(|base| base.resolve_abstract_marker())
        })
    }

    /// Names of every method visible on this class, own and inherited.
    pub fn attribute_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_attribute_names(&mut names);
        names
    }

    fn collect_attribute_names(&self, names: &mut BTreeSet<String>) {
        names.extend(self.methods.iter().map(|m| m.name.clone()));
        for base in &self.bases {
            base.collect_attribute_names(names);
        }
    }

    /// Resolved methods: own methods first, then inherited ones in base order.
    /// A method shadows every inherited method of the same name.
    pub fn members(&self) -> Vec<&ControllerMethod<S>> {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        self.collect_members(&mut seen, &mut members);
        members
    }

    fn collect_members<'a>(
        &'a self,
        seen: &mut HashSet<&'a str>,
        members: &mut Vec<&'a ControllerMethod<S>>,
    ) {
        for method in &self.methods {
            if seen.insert(method.name.as_str()) {
                members.push(method);
            }
        }
        for base in &self.bases {
            base.collect_members(seen, members);
        }
    }

    /// Looks up a resolved method by name.
    pub fn member(&self, name: &str) -> Option<&ControllerMethod<S>> {
        self.members().into_iter().find(|m| m.name == name)
    }
}

impl<S> ControllerClass<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Adds a method backed by `handler`.
    pub fn method<H, T>(self, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.with_method(ControllerMethod::new(name, handler))
    }
}

impl<S> Clone for ControllerClass<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            bases: self.bases.clone(),
            abstract_marker: self.abstract_marker,
            route_base: self.route_base.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl<S> fmt::Debug for ControllerClass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("abstract_marker", &self.abstract_marker)
            .field("route_base", &self.route_base)
            .field("methods", &self.methods)
            .finish()
    }
}

///
/// A model class: a named, type-erased value that can be injected into
/// controllers and recovered with [`ModelClass::downcast`].
///
#[derive(Clone)]
pub struct ModelClass {
    name: String,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl ModelClass {
    pub fn new<T>(name: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            name: name.into(),
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn handler() -> &'static str {
        "ok"
    }

    fn names<S>(members: Vec<&ControllerMethod<S>>) -> Vec<&str> {
        members.into_iter().map(|m| m.name()).collect()
    }

    #[test]
    fn test_abstract_marker_resolution() {
        let root = Arc::new(ControllerClass::<()>::new("Root").with_abstract(true));
        let concrete = Arc::new(
            ControllerClass::new("Concrete")
                .with_base(Arc::clone(&root))
                .with_abstract(false),
        );
        let leaf = ControllerClass::new("Leaf").with_base(Arc::clone(&concrete));
        let inherits = ControllerClass::new("Inherits").with_base(Arc::clone(&root));
        let plain = ControllerClass::<()>::new("Plain");

        assert!(root.abstract_marker());
        assert!(!concrete.abstract_marker());
        assert!(!leaf.abstract_marker());
        assert!(inherits.abstract_marker());
        assert_eq!(inherits.own_abstract_marker(), None);
        assert!(!plain.abstract_marker());
    }

    #[test]
    fn test_members_shadow_inherited_methods() {
        let base = Arc::new(
            ControllerClass::<()>::new("Base")
                .method("get", handler)
                .method("helper", handler),
        );
        let child = ControllerClass::new("Child")
            .with_base(Arc::clone(&base))
            .method("post", handler)
            .method("get", handler);

        assert_eq!(names(child.members()), vec!["post", "get", "helper"]);
        assert_eq!(
            child.attribute_names().into_iter().collect::<Vec<_>>(),
            vec!["get", "helper", "post"]
        );
        assert!(child.member("helper").is_some());
        assert!(child.member("missing").is_none());
    }

    #[test]
    fn test_with_method_replaces_same_name() {
        let class = ControllerClass::<()>::new("Users")
            .method("get", handler)
            .with_method(ControllerMethod::new("get", handler).with_arguments(["user_id"]));
        assert_eq!(class.own_methods().len(), 1);
        assert_eq!(
            class.own_methods()[0].declared_arguments(),
            Some(&["user_id".to_string()][..])
        );
    }

    #[test]
    fn test_route_base_override_is_not_inherited() {
        let base = ControllerClass::<()>::new("Base").with_route_base("things");
        let child = ControllerClass::new("Child").with_base(base);
        assert_eq!(child.bases()[0].route_base_override(), Some("things"));
        assert_eq!(child.route_base_override(), None);
    }

    #[test]
    fn test_model_downcast() {
        #[derive(Debug, PartialEq)]
        struct User {
            table: &'static str,
        }

        let model = ModelClass::new("User", User { table: "users" });
        assert_eq!(model.name(), "User");
        assert!(model.type_name().ends_with("User"));
        assert_eq!(model.downcast::<User>(), Some(&User { table: "users" }));
        assert!(model.downcast::<String>().is_none());
    }
}
