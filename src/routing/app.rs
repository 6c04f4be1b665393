//! Host application wrapper: an `axum::Router` plus the table of rules that
//! were registered on it.

use {
    crate::{Error, Result},
    axum::{Router, routing::MethodRouter},
    http::Method,
    std::{
        any::Any,
        collections::BTreeMap,
        fmt,
        panic::{self, AssertUnwindSafe},
    },
};

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// Path in axum syntax, e.g. `/api/users/{id}`.
    pub rule: String,
    pub methods: Vec<Method>,
    /// `ClassName:member`.
    pub endpoint: String,
    pub defaults: BTreeMap<String, String>,
    /// Path parameter names, in order.
    pub arguments: Vec<String>,
}

impl RouteRule {
    /// The rule with every path parameter name erased, so `/users/{id}` and
    /// `/users/{user_id}` share a shape.
    pub fn shape(&self) -> String {
        self.rule
            .split('/')
            .map(|segment| {
                if segment.starts_with('{') && segment.ends_with('}') {
                    "{}"
                } else {
                    segment
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self
            .methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{} {} -> {}", methods, self.rule, self.endpoint)
    }
}

///
/// The application routes are registered into.
///
/// Wraps an `axum::Router` and records every rule added through
/// [`App::add_route`], so the route table can be inspected after
/// registration. Conflicting rules are rejected with a registration error,
/// including rules that clash with routes of a router passed to
/// [`App::from_router`].
///
/// ```rust
/// use axum::routing::get;
/// use axum_convention::{App, RouteRule};
/// use http::Method;
///
/// let mut app = App::<()>::new();
/// app.add_route(
///     RouteRule {
///         rule: "/health".into(),
///         methods: vec![Method::GET],
///         endpoint: "health".into(),
///         defaults: Default::default(),
///         arguments: vec![],
///     },
///     get(|| async { "ok" }),
/// )
/// .unwrap();
///
/// assert_eq!(app.routes().len(), 1);
/// let router: axum::Router = app.into_inner();
/// ```
///
pub struct App<S = ()> {
    router: Router<S>,
    routes: Vec<RouteRule>,
}

impl<S> App<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Wraps an existing router. Routes it already holds are not listed in
    /// [`App::routes`].
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            routes: Vec::new(),
        }
    }

    /// The rules registered so far, in registration order.
    pub fn routes(&self) -> &[RouteRule] {
        &self.routes
    }

    /// Adds a rule served by `method_router`.
    ///
    /// # Errors
    ///
    /// Fails with a registration error when a rule of the same shape exists
    /// with different parameter names, or with an overlapping method. Rules
    /// that axum itself rejects, such as overlaps with routes the wrapped
    /// router already held, fail the same way and leave the app unchanged.
    pub fn add_route(&mut self, rule: RouteRule, method_router: MethodRouter<S>) -> Result<()> {
        if !rule.rule.starts_with('/') {
            return Err(Error::registration(format!(
                "Rule `{}` of `{}` must start with '/'",
                rule.rule, rule.endpoint
            )));
        }

        let shape = rule.shape();
        for existing in self.routes.iter().filter(|r| r.shape() == shape) {
            if existing.rule != rule.rule {
                return Err(Error::registration(format!(
                    "Rule `{}` of `{}` conflicts with `{}` of `{}`",
                    rule.rule, rule.endpoint, existing.rule, existing.endpoint
                )));
            }
            if let Some(method) = rule.methods.iter().find(|m| existing.methods.contains(m)) {
                return Err(Error::registration(format!(
                    "{} {} of `{}` is already routed to `{}`",
                    method, rule.rule, rule.endpoint, existing.endpoint
                )));
            }
        }

        let router = self.router.clone();
        let path = rule.rule.as_str();
        match panic::catch_unwind(AssertUnwindSafe(|| router.route(path, method_router))) {
            Ok(router) => self.router = router,
            Err(payload) => {
                return Err(Error::registration(format!(
                    "{} of `{}` was rejected: {}",
                    rule.rule,
                    rule.endpoint,
                    panic_message(payload.as_ref())
                )));
            }
        }
        self.routes.push(rule);
        Ok(())
    }

    /// Consumes the app, returning the axum router.
    pub fn into_inner(self) -> Router<S> {
        self.router
    }

    /// Provides the router state, returning a router ready to be served.
    pub fn with_state<S2>(self, state: S) -> Router<S2> {
        self.router.with_state(state)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("route rejected by the router")
}

impl<S> Default for App<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for App<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
