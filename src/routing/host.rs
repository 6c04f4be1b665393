//! Class registration: turning a controller class into rules on an [`App`].

use {
    super::{App, MethodSelector, RouteRule},
    crate::{ControllerClass, ControllerMethod, Error, ModelContext, RegisterOptions, Result},
    axum::{
        Extension,
        routing::{MethodFilter, MethodRouter},
    },
    http::Method,
    std::{collections::BTreeMap, sync::Arc},
};

const NO_ARGUMENTS: &[&str] = &[];
const ID_ARGUMENT: &[&str] = &["id"];

/// Rule defaults of the matched route, available to handlers through
/// `Extension<RouteDefaults>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDefaults(pub Arc<BTreeMap<String, String>>);

impl RouteDefaults {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// The host framework's class-registration entry point.
pub trait ClassRegistrar<S> {
    /// Registers the methods of `class` chosen by `selector` under
    /// `route_base`. `context` lists the models injected into the class's
    /// module.
    fn register(
        &self,
        app: &mut App<S>,
        class: &ControllerClass<S>,
        route_base: &str,
        options: &RegisterOptions,
        selector: MethodSelector,
        context: &ModelContext,
    ) -> Result<()>;
}

///
/// Registers controller methods as axum routes.
///
/// | Member                      | Method      | Rule                      |
/// |-----------------------------|-------------|---------------------------|
/// | `index`                     | GET         | `{prefix}/{base}`         |
/// | `post`                      | POST        | `{prefix}/{base}`         |
/// | `get` `put` `patch` `delete`| same        | `{prefix}/{base}/{id}`    |
/// | anything else               | GET         | `{prefix}/{base}/{member}`|
///
/// Arguments declared on a method replace the default `{id}` parameter and
/// are appended to the rule in order. Every method router gets the class's
/// [`ModelContext`] as an extension.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct AxumRegistrar;

impl AxumRegistrar {
    /// Computes the rule of one method without registering it.
    pub fn build_rule<S>(
        class: &ControllerClass<S>,
        method: &ControllerMethod<S>,
        route_base: &str,
        options: &RegisterOptions,
    ) -> RouteRule {
        let name = method.name();
        let (http_method, member_segment, default_arguments) = match name {
            "index" => (Method::GET, false, NO_ARGUMENTS),
            "post" => (Method::POST, false, NO_ARGUMENTS),
            "get" => (Method::GET, false, ID_ARGUMENT),
            "put" => (Method::PUT, false, ID_ARGUMENT),
            "patch" => (Method::PATCH, false, ID_ARGUMENT),
            "delete" => (Method::DELETE, false, ID_ARGUMENT),
            _ => (Method::GET, true, NO_ARGUMENTS),
        };
        let arguments: Vec<String> = match method.declared_arguments() {
            Some(arguments) => arguments.to_vec(),
            None => default_arguments.iter().map(|a| a.to_string()).collect(),
        };

        let route_base = route_base.trim_matches('/');
        let mut segments = Vec::new();
        if !route_base.is_empty() {
            segments.push(route_base.to_string());
        }
        if member_segment {
            segments.push(name.to_string());
        }
        segments.extend(arguments.iter().map(|arg| format!("{{{}}}", arg)));

        let mut rule = options.route_prefix.clone().unwrap_or_default();
        for segment in segments {
            rule.push('/');
            rule.push_str(&segment);
        }
        if rule.is_empty() || (options.trailing_slash && !rule.ends_with('/')) {
            rule.push('/');
        }

        RouteRule {
            rule,
            methods: vec![http_method],
            endpoint: format!("{}:{}", class.name(), name),
            defaults: method.defaults().clone(),
            arguments,
        }
    }
}

impl<S> ClassRegistrar<S> for AxumRegistrar
where
    S: Clone + Send + Sync + 'static,
{
    fn register(
        &self,
        app: &mut App<S>,
        class: &ControllerClass<S>,
        route_base: &str,
        options: &RegisterOptions,
        selector: MethodSelector,
        context: &ModelContext,
    ) -> Result<()> {
        for method in selector.select(class) {
            let rule = Self::build_rule(class, method, route_base, options);

            let mut filter: Option<MethodFilter> = None;
            for http_method in &rule.methods {
                let next = MethodFilter::try_from(http_method.clone()).map_err(|err| {
                    Error::registration(format!("{} ({})", err, rule.endpoint))
                })?;
                filter = Some(match filter {
                    Some(current) => current.or(next),
                    None => next,
                });
            }
            let Some(filter) = filter else {
                continue;
            };

            let mut method_router: MethodRouter<S> = method
                .method_router(filter)
                .layer(Extension(context.clone()));
            if !rule.defaults.is_empty() {
                method_router =
                    method_router.layer(Extension(RouteDefaults(Arc::new(rule.defaults.clone()))));
            }

            tracing::info!(
                rule = %rule.rule,
                methods = ?rule.methods,
                endpoint = %rule.endpoint,
                route_base = %route_base,
                "Registering route"
            );
            app.add_route(rule, method_router)?;
        }
        Ok(())
    }
}
