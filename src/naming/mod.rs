//!
//! Naming conventions that link file names, module names, class names and
//! REST route bases.
//!
//! | File                      | Module                 | Class                | Route base   |
//! |---------------------------|------------------------|----------------------|--------------|
//! | `user_controller.rs`      | `user_controller`      | `UserController`     | `users`      |
//! | `category_view.rs`        | `category_view`        | `CategoryView`       | `categories` |
//! | `blog_post_controller.rs` | `blog_post_controller` | `BlogPostController` | `blogposts`  |
//! | `USER.rs` (model)         | `USER`                 | `User`               |              |
//!
mod inflector;

pub use inflector::*;

use {
    crate::{Error, Result},
    regex::Regex,
    std::{path::Path, sync::LazyLock},
};

/// Convention suffixes recognized on controller module names.
pub const CONTROLLER_SUFFIXES: [&str; 2] = ["view", "controller"];

static SUFFIX_REGEXP: LazyLock<Regex> = LazyLock::new(|| Regex::new("View|Controller").unwrap());

/// Returns the module name of a source file: its file name without extension.
///
/// ```rust
/// use axum_convention::module_name_from_file;
///
/// assert_eq!(module_name_from_file("user_controller.rs"), "user_controller");
/// assert_eq!(module_name_from_file("views/category_view.rs"), "category_view");
/// ```
pub fn module_name_from_file(file_name: impl AsRef<Path>) -> String {
    file_name
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Derives the controller class name from a controller module name.
///
/// The module name must end in `_view` or `_controller` (any casing). Each
/// underscore separated word of the base name is capitalized and the
/// capitalized suffix is appended.
///
/// ```rust
/// use axum_convention::controller_class_name;
///
/// assert_eq!(controller_class_name("user_controller").unwrap(), "UserController");
/// assert_eq!(controller_class_name("blog_post_view").unwrap(), "BlogPostView");
/// assert!(controller_class_name("usercontroller").is_err());
/// ```
pub fn controller_class_name(module_name: &str) -> Result<String> {
    let Some((base, suffix)) = module_name.rsplit_once('_') else {
        return Err(Error::naming_ambiguity(module_name));
    };
    let suffix = suffix.to_lowercase();
    if !CONTROLLER_SUFFIXES.contains(&suffix.as_str()) {
        return Err(Error::naming_ambiguity(module_name));
    }

    let mut class_name: String = base
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    if class_name.is_empty() {
        return Err(Error::naming_ambiguity(module_name));
    }
    class_name.push_str(&capitalize(&suffix));
    Ok(class_name)
}

/// Derives a model class name: the module name lower-cased, then its first
/// letter capitalized.
pub fn model_class_name(module_name: &str) -> String {
    capitalize(module_name)
}

///
/// Translates controller class names into pluralized route bases using an
/// explicitly constructed [`Inflector`].
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingConvention {
    inflector: Inflector,
}

impl NamingConvention {
    pub fn new(inflector: Inflector) -> Self {
        Self { inflector }
    }

    pub fn inflector(&self) -> &Inflector {
        &self.inflector
    }

    /// Computes the route base of a controller class.
    ///
    /// Every `View` and `Controller` occurrence is removed, the remainder is
    /// lower-cased, normalized to its singular form and pluralized again, so
    /// a class already named in the plural keeps that plural.
    ///
    /// ```rust
    /// use axum_convention::{Inflector, NamingConvention};
    ///
    /// let naming = NamingConvention::new(Inflector::classical());
    /// assert_eq!(naming.route_base("UserController"), "users");
    /// assert_eq!(naming.route_base("PeopleController"), "people");
    /// assert_eq!(naming.route_base("CategoryView"), "categories");
    /// ```
    pub fn route_base(&self, class_name: &str) -> String {
        let base = SUFFIX_REGEXP.replace_all(class_name, "").to_lowercase();
        match self.inflector.singular(&base) {
            Some(singular) => self.inflector.plural(&singular),
            None => self.inflector.plural(&base),
        }
    }
}
