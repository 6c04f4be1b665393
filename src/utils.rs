//!
//! Utility functions shared by the configuration layer.
//!
//! This module provides:
//! - [`replace_handlebars_with_env`] - Template substitution for environment variables
//!

use {
    regex::{Captures, Regex},
    std::{env, sync::LazyLock},
};

/// Regular expression pattern for matching handlebars-style environment variable references.
/// Matches patterns like `{{ VAR_NAME }}` with optional whitespace around the variable name.
/// Variable names must be uppercase letters, digits, or underscores (standard env var naming).
static HANDLEBAR_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Z0-9_]+)\s*\}\}").unwrap());

/// Replaces handlebars-style placeholders with environment variable values.
///
/// Searches through the input string for patterns like `{{ VAR_NAME }}` and replaces
/// them with the corresponding environment variable value. Whitespace around the
/// variable name is allowed: `{{VAR}}`, `{{ VAR }}`, and `{{  VAR  }}` are equivalent.
///
/// This lets configuration files point at deployment-specific directories:
///
/// ```toml
/// [routing]
/// controllers_path = "{{ APP_ROOT }}/controllers"
/// ```
///
/// # Examples
///
/// ```
/// use axum_convention::replace_handlebars_with_env;
///
/// // Missing variables become empty strings
/// let template = "Value: {{ MISSING_VAR }}";
/// let result = replace_handlebars_with_env(template);
/// assert_eq!(result, "Value: ");
/// ```
pub fn replace_handlebars_with_env(input: &str) -> String {
    HANDLEBAR_REGEXP
        .replace_all(input, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(
                    variable = %var_name,
                    "Environment variable not found, substituting with empty string"
                );
                String::new()
            })
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_handlebars_with_env_no_variables() {
        let input = "This is a plain string with no variables";
        let output = replace_handlebars_with_env(input);
        assert_eq!(output, input);
    }

    #[test]
    fn test_replace_handlebars_with_env_with_variables() {
        unsafe {
            env::set_var("CONV_TEST_ROOT", "/srv/app");
            env::set_var("CONV_TEST_MODELS", "models");
        }
        let input = "Root: {{ CONV_TEST_ROOT }}, Models: {{ CONV_TEST_MODELS }}";
        let output = replace_handlebars_with_env(input);
        assert_eq!(output, "Root: /srv/app, Models: models");

        unsafe {
            env::remove_var("CONV_TEST_ROOT");
            env::remove_var("CONV_TEST_MODELS");
        }
    }

    #[test]
    fn test_replace_handlebars_with_env_missing_variable() {
        unsafe {
            env::remove_var("CONV_NONEXISTENT_VAR");
        }

        let input = "Value: {{ CONV_NONEXISTENT_VAR }}";
        let output = replace_handlebars_with_env(input);
        assert_eq!(output, "Value: ");
    }

    #[test]
    fn test_replace_handlebars_with_env_whitespace() {
        unsafe {
            env::set_var("CONV_SPACED_VAR", "value");
        }

        let input = "{{CONV_SPACED_VAR}} {{ CONV_SPACED_VAR }} {{  CONV_SPACED_VAR  }}";
        let output = replace_handlebars_with_env(input);
        assert_eq!(output, "value value value");

        unsafe {
            env::remove_var("CONV_SPACED_VAR");
        }
    }

    #[test]
    fn test_lowercase_placeholders_are_left_alone() {
        let input = "{{ not_an_env_var }}";
        assert_eq!(replace_handlebars_with_env(input), input);
    }
}
