//! Model injection into controller namespaces and the [`ModelContext`]
//! handed to controller handlers.

use {
    crate::{ControllerDescriptor, ModelClass, ModelDescriptor, Namespace},
    std::{any::Any, collections::BTreeMap, sync::Arc},
};

/// Binds every model class, under its class name, into the namespace of every
/// controller. An existing attribute with the same name is replaced silently.
pub fn inject_models<S>(controllers: &mut [ControllerDescriptor<S>], models: &[ModelDescriptor<S>]) {
    for controller in controllers.iter_mut() {
        for model in models {
            let name = model.class().name();
            controller
                .module_mut()
                .set_attribute(name, model.class().clone());
            tracing::debug!(
                module = %controller.module().name(),
                model = %name,
                "Injected model"
            );
        }
    }
}

///
/// The models available to a controller, by name.
///
/// The registrar installs one context per controller as an
/// [`axum::Extension`], so handlers resolve injected models with the
/// `Extension<ModelContext>` extractor:
///
/// ```rust
/// use axum::Extension;
/// use axum_convention::ModelContext;
///
/// struct UserStore;
///
/// async fn index(Extension(models): Extension<ModelContext>) -> &'static str {
///     match models.get::<UserStore>("User") {
///         Some(_) => "users",
///         None => "no store",
///     }
/// }
/// ```
///
#[derive(Debug, Clone, Default)]
pub struct ModelContext {
    models: Arc<BTreeMap<String, ModelClass>>,
}

impl ModelContext {
    /// Collects every model attribute of a namespace.
    pub fn from_namespace<S>(module: &Namespace<S>) -> Self {
        module
            .models()
            .map(|(name, model)| (name.to_string(), model.clone()))
            .collect()
    }

    pub fn model(&self, name: &str) -> Option<&ModelClass> {
        self.models.get(name)
    }

    /// Looks up the model bound to `name` and downcasts it to `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.model(name).and_then(ModelClass::downcast::<T>)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<(String, ModelClass)> for ModelContext {
    fn from_iter<I: IntoIterator<Item = (String, ModelClass)>>(iter: I) -> Self {
        Self {
            models: Arc::new(iter.into_iter().collect()),
        }
    }
}
