use {
    crate::{ControllerClass, ControllerMethod},
    std::collections::BTreeSet,
};

/// Method names exposed by [`MethodSelector::HttpVerbs`].
pub const HTTP_VERBS: [&str; 6] = ["get", "post", "put", "patch", "delete", "index"];

/// Prefixes marking members that are never route handlers.
const HIDDEN_PREFIXES: [&str; 3] = ["_", "before_", "after_"];

/// Whether a member name is a candidate route handler.
pub fn is_interesting(name: &str) -> bool {
    !HIDDEN_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Candidate route handlers of a class, in member order.
pub fn interesting_members<S>(class: &ControllerClass<S>) -> Vec<&ControllerMethod<S>> {
    class
        .members()
        .into_iter()
        .filter(|method| is_interesting(method.name()))
        .collect()
}

///
/// Strategy deciding which controller methods become routes.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodSelector {
    /// Only `get`, `post`, `put`, `patch`, `delete` and `index`.
    HttpVerbs,
    /// Every method introduced by the class itself, whatever its name.
    #[default]
    NewMethods,
}

impl MethodSelector {
    pub fn from_http_only(http_only: bool) -> Self {
        if http_only {
            MethodSelector::HttpVerbs
        } else {
            MethodSelector::NewMethods
        }
    }

    /// Selects the methods of `class` to expose.
    ///
    /// With [`MethodSelector::NewMethods`] a method qualifies when no direct
    /// base lists it, so methods a class inherits or overrides are left out.
    pub fn select<'a, S>(&self, class: &'a ControllerClass<S>) -> Vec<&'a ControllerMethod<S>> {
        let candidates = interesting_members(class);
        match self {
            MethodSelector::HttpVerbs => candidates
                .into_iter()
                .filter(|method| HTTP_VERBS.contains(&method.name()))
                .collect(),
            MethodSelector::NewMethods => {
                let inherited: BTreeSet<String> = class
                    .bases()
                    .iter()
                    .flat_map(|base| base.attribute_names())
                    .collect();
                candidates
                    .into_iter()
                    .filter(|method| !inherited.contains(method.name()))
                    .collect()
            }
        }
    }
}
