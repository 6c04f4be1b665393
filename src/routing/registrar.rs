use {
    super::{App, AxumRegistrar, ClassRegistrar, MethodSelector},
    crate::{
        ControllerClass, ControllerDescriptor, ModelContext, NamingConvention, Result,
        RoutingConfig,
    },
};

/// Whether a controller class is skipped during registration.
///
/// Only direct bases are inspected: when any of them is abstract the class
/// is concrete, whatever marker it inherits. Otherwise the class is abstract
/// when its resolved marker is set.
pub fn is_abstract<S>(class: &ControllerClass<S>) -> bool {
    if class.bases().iter().any(|base| base.abstract_marker()) {
        return false;
    }
    class.abstract_marker()
}

/// Outcome of registering one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered { class: String, route_base: String },
    SkippedAbstract { class: String },
}

impl Registration {
    pub fn class(&self) -> &str {
        match self {
            Registration::Registered { class, .. } | Registration::SkippedAbstract { class } => {
                class
            }
        }
    }

    pub fn route_base(&self) -> Option<&str> {
        match self {
            Registration::Registered { route_base, .. } => Some(route_base),
            Registration::SkippedAbstract { .. } => None,
        }
    }
}

///
/// Registers controller classes through a [`ClassRegistrar`], computing each
/// class's route base and method selection strategy.
///
#[derive(Debug, Clone, Default)]
pub struct RouteRegistrar<R = AxumRegistrar> {
    naming: NamingConvention,
    registrar: R,
}

impl RouteRegistrar {
    pub fn new(naming: NamingConvention) -> Self {
        Self::with_registrar(naming, AxumRegistrar)
    }
}

impl<R> RouteRegistrar<R> {
    pub fn with_registrar(naming: NamingConvention, registrar: R) -> Self {
        Self { naming, registrar }
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    /// The class's own non-empty route-base override, else the route base
    /// derived from its name. Slashes around an override are dropped, so `/`
    /// serves the controller at the root.
    pub fn route_base<S>(&self, class: &ControllerClass<S>) -> String {
        match class.route_base_override() {
            Some(route_base) if !route_base.is_empty() => {
                route_base.trim_matches('/').to_string()
            }
            _ => self.naming.route_base(class.name()),
        }
    }

    /// Registers one controller unless it is abstract.
    ///
    /// # Errors
    ///
    /// Errors of the class registrar are returned unchanged.
    pub fn register_controller<S>(
        &self,
        class: &ControllerClass<S>,
        context: &ModelContext,
        app: &mut App<S>,
        config: &RoutingConfig,
    ) -> Result<Registration>
    where
        R: ClassRegistrar<S>,
    {
        if is_abstract(class) {
            tracing::debug!(class = %class.name(), "Skipping abstract controller");
            return Ok(Registration::SkippedAbstract {
                class: class.name().to_string(),
            });
        }

        let route_base = self.route_base(class);
        let selector = MethodSelector::from_http_only(config.http_only);
        tracing::debug!(
            class = %class.name(),
            route_base = %route_base,
            selector = ?selector,
            "Registering controller"
        );
        self.registrar
            .register(app, class, &route_base, &config.options, selector, context)?;

        Ok(Registration::Registered {
            class: class.name().to_string(),
            route_base,
        })
    }

    /// Registers every discovered controller, each with the models injected
    /// into its module.
    pub fn register_all<S>(
        &self,
        controllers: &[ControllerDescriptor<S>],
        app: &mut App<S>,
        config: &RoutingConfig,
    ) -> Result<Vec<Registration>>
    where
        R: ClassRegistrar<S>,
    {
        controllers
            .iter()
            .map(|descriptor| {
                let context = ModelContext::from_namespace(descriptor.module());
                self.register_controller(descriptor.class(), &context, app, config)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Descriptor, Error, Namespace, RegisterOptions};
    use std::{cell::RefCell, sync::Arc};

    async fn handler() -> &'static str {
        "ok"
    }

    /// Records every call instead of registering routes.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, String, MethodSelector)>>,
        fail: bool,
    }

    impl ClassRegistrar<()> for Recorder {
        fn register(
            &self,
            _app: &mut App,
            class: &ControllerClass,
            route_base: &str,
            _options: &RegisterOptions,
            selector: MethodSelector,
            _context: &ModelContext,
        ) -> Result<()> {
            self.calls.borrow_mut().push((
                class.name().to_string(),
                route_base.to_string(),
                selector,
            ));
            if self.fail {
                return Err(Error::registration("duplicate route base"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_abstract_resolution() {
        let b = Arc::new(ControllerClass::<()>::new("B").with_abstract(true));
        let c = ControllerClass::new("C").with_base(Arc::clone(&b));
        let d = ControllerClass::<()>::new("D").with_abstract(true);
        let e = ControllerClass::new("E").with_base(ControllerClass::<()>::new("Base"));
        let f = ControllerClass::new("F")
            .with_base(Arc::clone(&b))
            .with_abstract(true);

        assert!(is_abstract(&b));
        assert!(!is_abstract(&c));
        assert!(is_abstract(&d));
        assert!(!is_abstract(&e));
        assert!(!is_abstract(&f), "an abstract direct base exempts the class");
    }

    #[test]
    fn test_marker_inherited_through_concrete_base_is_honored() {
        let root = Arc::new(ControllerClass::<()>::new("Root").with_abstract(true));
        let mid = Arc::new(ControllerClass::new("Mid").with_base(root));
        let leaf = ControllerClass::new("Leaf").with_base(mid);
        // `Mid` resolves the marker from `Root`, which exempts `Leaf`
        assert!(!is_abstract(&leaf));
    }

    #[test]
    fn test_route_base_override() {
        let routes = RouteRegistrar::new(NamingConvention::default());
        let class = ControllerClass::<()>::new("PersonController");
        assert_eq!(routes.route_base(&class), "people");

        let class = class.with_route_base("folks");
        assert_eq!(routes.route_base(&class), "folks");

        let class = ControllerClass::<()>::new("PersonController").with_route_base("");
        assert_eq!(routes.route_base(&class), "people");

        let class = ControllerClass::<()>::new("PersonController").with_route_base("/folks/");
        assert_eq!(routes.route_base(&class), "folks");
    }

    #[tokio::test]
    async fn test_slashed_route_base_overrides_are_reachable() {
        use axum::body::Body;
        use http::{Request, StatusCode};
        use tower::ServiceExt;

        let routes = RouteRegistrar::new(NamingConvention::default());
        let home = ControllerClass::<()>::new("HomeController")
            .with_route_base("/")
            .method("index", handler);
        let users = ControllerClass::<()>::new("MemberController")
            .with_route_base("/users")
            .method("index", handler);

        let mut app = App::new();
        let context = ModelContext::default();
        let config = RoutingConfig::default();
        let outcome = routes
            .register_controller(&home, &context, &mut app, &config)
            .unwrap();
        assert_eq!(outcome.route_base(), Some(""));
        routes
            .register_controller(&users, &context, &mut app, &config)
            .unwrap();

        let rules: Vec<_> = app.routes().iter().map(|r| r.rule.clone()).collect();
        assert_eq!(rules, vec!["/".to_string(), "/users".to_string()]);

        let router = app.into_inner();
        for uri in ["/", "/users"] {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[test]
    fn test_register_all_skips_abstract_and_picks_selector() {
        let base = Arc::new(ControllerClass::<()>::new("BaseController").with_abstract(true));
        let controllers = vec![
            Descriptor::new(Arc::clone(&base), Namespace::new("base_controller")),
            Descriptor::new(
                Arc::new(
                    ControllerClass::new("CategoryView")
                        .with_base(Arc::clone(&base))
                        .method("index", handler),
                ),
                Namespace::new("category_view"),
            ),
        ];
        let routes = RouteRegistrar::with_registrar(NamingConvention::default(), Recorder::default());
        let config = RoutingConfig {
            http_only: true,
            ..RoutingConfig::default()
        };

        let outcome = routes
            .register_all(&controllers, &mut App::new(), &config)
            .unwrap();

        assert_eq!(
            outcome,
            vec![
                Registration::SkippedAbstract {
                    class: "BaseController".into()
                },
                Registration::Registered {
                    class: "CategoryView".into(),
                    route_base: "categories".into()
                },
            ]
        );
        assert_eq!(
            routes.registrar().calls.borrow().as_slice(),
            &[(
                "CategoryView".to_string(),
                "categories".to_string(),
                MethodSelector::HttpVerbs
            )]
        );
    }

    #[test]
    fn test_registrar_errors_propagate_unchanged() {
        let routes = RouteRegistrar::with_registrar(
            NamingConvention::default(),
            Recorder {
                fail: true,
                ..Recorder::default()
            },
        );
        let class = ControllerClass::<()>::new("UserController");
        let err = routes
            .register_controller(
                &class,
                &ModelContext::default(),
                &mut App::new(),
                &RoutingConfig::default(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Registration);
        assert_eq!(err.to_string(), "duplicate route base");
    }
}
