//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert an `{"success": false, "error": ...}` body with the given message
#[macro_export]
macro_rules! assert_error_body {
    ($body:expr, $message:expr) => {
        let body: &serde_json::Value = &$body;
        assert_eq!(body["success"], serde_json::json!(false), "body: {}", body);
        assert_eq!(body["error"], serde_json::json!($message), "body: {}", body);
    };
}
