//! Fallback value for decode failures
//!
//! When a recoverable decode fails, a `String` target gets the raw input
//! back and every other target gets its `Default`. The check is a type-tag
//! test at the generic boundary, the only place the dispatcher branches on
//! the concrete target type.

use std::any::Any;

/// Value returned in place of a failed decode
///
/// # Arguments
/// * `text` - The input that failed to decode
///
/// # Returns
/// `text` itself when `T` is `String`, otherwise `T::default()`
pub(crate) fn fallback_value<T: Default + 'static>(text: &str) -> T {
    let raw: Box<dyn Any> = Box::new(text.to_owned());
    match raw.downcast::<T>() {
        Ok(value) => *value,
        Err(_) => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_target_gets_raw_text() {
        assert_eq!(fallback_value::<String>("not-json"), "not-json");
        assert_eq!(fallback_value::<String>("  spaced "), "  spaced ");
    }

    #[test]
    fn test_other_targets_get_default() {
        assert_eq!(fallback_value::<i32>("17"), 0);
        assert_eq!(fallback_value::<Option<String>>("x"), None);
        assert_eq!(fallback_value::<Vec<String>>("x"), Vec::<String>::new());
        assert!(!fallback_value::<bool>("true"));
    }
}
