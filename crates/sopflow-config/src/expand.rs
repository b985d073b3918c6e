//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::borrow::Cow;

use crate::ConfigError;

/// Marker for a variable the environment does not define.
struct NotSet;

/// Expand environment variable references in a string.
///
/// Strings without `${}` patterns pass through unchanged. Bare `$VAR`
/// syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(value, |var| {
        std::env::var(var).map(Some).map_err(|_| NotSet)
    })
    .map(Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: no other test reads this variable
        unsafe {
            std::env::set_var("SOPFLOW_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${SOPFLOW_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("SOPFLOW_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        let result = expand_env("${SOPFLOW_UNSET_VAR_TEST:-fallback}", "test.field").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_expand_missing_var_error() {
        let err = expand_env("${SOPFLOW_MISSING_VAR_TEST}", "confluence.api_token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SOPFLOW_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("confluence.api_token"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: no other test reads this variable
        unsafe {
            std::env::set_var("SOPFLOW_HOST_TEST", "wiki.example.com");
        }
        let result = expand_env("https://${SOPFLOW_HOST_TEST}", "confluence.base_url").unwrap();
        assert_eq!(result, "https://wiki.example.com");
        unsafe {
            std::env::remove_var("SOPFLOW_HOST_TEST");
        }
    }
}
