//! Custom assertion utilities for tests.

use sui_tx_analyzer::{AnalyzerResult, Issue};

/// Assert that a result is Ok and return the inner value.
#[allow(dead_code)]
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that a result is Err.
#[allow(dead_code)]
pub fn assert_err<T: std::fmt::Debug, E: std::fmt::Debug>(result: Result<T, E>, context: &str) {
    if let Ok(v) = result {
        panic!("{} should have failed but got: {:?}", context, v);
    }
}

/// Assert that an error message contains expected text (case-insensitive).
#[allow(dead_code)]
pub fn assert_error_contains<E: std::fmt::Display>(error: E, expected_text: &str, context: &str) {
    let error_str = error.to_string().to_lowercase();
    let expected_lower = expected_text.to_lowercase();

    assert!(
        error_str.contains(&expected_lower),
        "{}: error message should contain '{}', got: {}",
        context,
        expected_text,
        error
    );
}

/// Assert that an analyzer succeeded and return its value.
#[allow(dead_code)]
pub fn expect_result<'a, T: std::fmt::Debug>(result: &'a AnalyzerResult<T>, context: &str) -> &'a T {
    match result {
        AnalyzerResult::Result(value) => value,
        AnalyzerResult::Issues(issues) => panic!("{}: expected a result, got issues {:?}", context, issues),
    }
}

/// Assert that some issue's message contains `expected_text`.
#[allow(dead_code)]
pub fn assert_issue_contains(issues: &[Issue], expected_text: &str, context: &str) {
    assert!(
        issues.iter().any(|issue| issue.message.contains(expected_text)),
        "{}: expected an issue containing '{}', got: {:?}",
        context,
        expected_text,
        issues
    );
}

/// Assert that two floats agree to within 1e-9 (relative for large values).
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, context: &str) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected {}, got {}",
        context,
        expected,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_ok() {
        let result: Result<i32, &str> = Ok(42);
        assert_eq!(assert_ok(result, "test operation"), 42);
    }

    #[test]
    #[should_panic(expected = "test operation failed")]
    fn test_assert_ok_fails() {
        let result: Result<i32, &str> = Err("error");
        assert_ok(result, "test operation");
    }

    #[test]
    fn test_assert_issue_contains() {
        let issues = vec![Issue::new("Gas budget not set in Transaction")];
        assert_issue_contains(&issues, "Gas budget", "budget check");
    }

    #[test]
    #[should_panic(expected = "expected a result")]
    fn test_expect_result_fails_on_issues() {
        let result: AnalyzerResult<u8> = AnalyzerResult::issue("boom");
        expect_result(&result, "value");
    }

    #[test]
    fn test_assert_close() {
        assert_close(6.2749999999999995, 6.275, "price");
        assert_close(1602.525, 1602.525000000001, "total");
    }
}
