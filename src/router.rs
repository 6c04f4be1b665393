//! The convention router: one discovery and registration pass at startup.

use crate::{
    App, AxumRegistrar, ClassRegistrar, Config, ControllerDescriptor, Discovery, Inflector,
    ModelDescriptor, ModuleRegistry, NamingConvention, Registration, Result, RouteRegistrar,
    RoutingConfig, inject_models, resolve_controllers_path, resolve_models_path,
};

/// Summary of a [`ConventionRouter::mount`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
    /// Registered controller classes with their route bases.
    pub registered: Vec<(String, String)>,
    /// Abstract controller classes that were skipped.
    pub skipped: Vec<String>,
    /// Model classes injected into every controller.
    pub models: Vec<String>,
    /// Number of rules in the app's route table after the pass.
    pub rules: usize,
}

///
/// Discovers controllers and models by file name, injects the models into
/// every controller and registers the controllers on an [`App`].
///
/// The router is transient: build it during setup and consume it with
/// [`ConventionRouter::mount`].
///
/// ```rust,no_run
/// use axum_convention::{App, Config, ControllerClass, ConventionRouter, ModuleRegistry, Namespace};
///
/// async fn index() -> &'static str { "all users" }
///
/// # async fn example() -> axum_convention::Result<()> {
/// let config = Config::default();
/// config.setup_tracing();
///
/// // app/views/user_controller.rs
/// let registry = ModuleRegistry::<()>::new().with_module(
///     Namespace::new("user_controller")
///         .with_controller(ControllerClass::new("UserController").method("index", index)),
/// );
///
/// let mut app = App::new();
/// ConventionRouter::new(config, registry)?.mount(&mut app)?;
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app.into_inner()).await?;
/// # Ok(())
/// # }
/// ```
///
pub struct ConventionRouter<S = (), R = AxumRegistrar> {
    config: RoutingConfig,
    registry: ModuleRegistry<S>,
    routes: RouteRegistrar<R>,
}

impl<S> ConventionRouter<S> {
    /// Creates a router with classical pluralization and the axum registrar.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration does not validate.
    pub fn new(config: Config, registry: ModuleRegistry<S>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.routing,
            registry,
            routes: RouteRegistrar::new(NamingConvention::new(Inflector::classical())),
        })
    }
}

impl<S, R> ConventionRouter<S, R> {
    /// Replaces the class registrar.
    pub fn with_registrar<R2>(self, registrar: R2) -> ConventionRouter<S, R2> {
        ConventionRouter {
            config: self.config,
            registry: self.registry,
            routes: RouteRegistrar::with_registrar(*self.routes.naming(), registrar),
        }
    }

    /// Replaces the pluralization service used for route bases.
    pub fn with_inflector(self, inflector: Inflector) -> Self
    where
        R: Clone,
    {
        let registrar = self.routes.registrar().clone();
        Self {
            routes: RouteRegistrar::with_registrar(NamingConvention::new(inflector), registrar),
            ..self
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry<S> {
        &self.registry
    }

    /// Discovers the model classes. Without a models directory there are none.
    pub fn discover_models(&mut self) -> Result<Vec<ModelDescriptor<S>>> {
        let Some(directory) = resolve_models_path(&self.config) else {
            tracing::debug!("No models directory, skipping model discovery");
            return Ok(Vec::new());
        };
        Discovery::new(&mut self.registry)
            .with_skip_invalid(self.config.skip_invalid)
            .discover_models(&directory, &self.config.source_extensions)
    }

    /// Discovers the controller classes.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no controllers directory exists and
    /// a discovery error for the first unresolvable file unless
    /// `skip_invalid` is set.
    pub fn discover_controllers(&mut self) -> Result<Vec<ControllerDescriptor<S>>> {
        let directory = resolve_controllers_path(&self.config)?;
        Discovery::new(&mut self.registry)
            .with_skip_invalid(self.config.skip_invalid)
            .discover_controllers(&directory, &self.config.source_extensions)
    }

    /// Runs the whole pass: discovers models and controllers, injects the
    /// models and registers every concrete controller on `app`.
    pub fn mount(mut self, app: &mut App<S>) -> Result<MountReport>
    where
        S: Clone + Send + Sync + 'static,
        R: ClassRegistrar<S>,
    {
        let models = self.discover_models()?;
        let mut controllers = self.discover_controllers()?;
        inject_models(&mut controllers, &models);

        let outcome = self
            .routes
            .register_all(&controllers, app, &self.config)?;

        for rule in app.routes() {
            tracing::debug!(
                rule = %rule.rule,
                methods = ?rule.methods,
                endpoint = %rule.endpoint,
                defaults = ?rule.defaults,
                arguments = ?rule.arguments,
                "Route table entry"
            );
        }

        let mut report = MountReport {
            models: models.iter().map(|m| m.class().name().to_string()).collect(),
            rules: app.routes().len(),
            ..MountReport::default()
        };
        for registration in outcome {
            match registration {
                Registration::Registered { class, route_base } => {
                    report.registered.push((class, route_base))
                }
                Registration::SkippedAbstract { class } => report.skipped.push(class),
            }
        }
        tracing::info!(
            controllers = report.registered.len(),
            skipped = report.skipped.len(),
            models = report.models.len(),
            rules = report.rules,
            "Mounted convention routes"
        );
        Ok(report)
    }
}
