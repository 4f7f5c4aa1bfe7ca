//! Environment pass-through Integration Tests

use textbridge_integration_tests::system_bridge;

#[test]
fn test_unset_variable_is_empty() {
    let result = system_bridge().get_env(b"TEXTBRIDGE_IT_UNSET_VARIABLE");
    assert!(result.is_empty());
}

#[test]
fn test_set_variable_is_encoded() {
    std::env::set_var("TEXTBRIDGE_IT_GREETING", "grüße 😀");
    let result = system_bridge().get_env(b"TEXTBRIDGE_IT_GREETING");
    assert_eq!(result.to_string_lossy(), "grüße 😀");
}

#[test]
fn test_key_is_read_up_to_nul() {
    std::env::set_var("TEXTBRIDGE_IT_NUL_KEY", "value");
    let result = system_bridge().get_env(b"TEXTBRIDGE_IT_NUL_KEY\0ignored");
    assert_eq!(result.to_string_lossy(), "value");
}
