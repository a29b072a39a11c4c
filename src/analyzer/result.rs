//! Analyzer results and issues.

use std::fmt;
use std::sync::Arc;

/// A recoverable, data-dependent analysis failure.
///
/// Issues are values: they travel along dependency edges and are never
/// raised. Two issues are equal when their messages match and they share the
/// same cause (or both have none), which is what de-duplication uses.
#[derive(Clone)]
pub struct Issue {
    pub message: String,
    pub cause: Option<Arc<anyhow::Error>>,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: anyhow::Error) -> Self {
        Self {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && match (&self.cause, &other.cause) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl Eq for Issue {}

impl fmt::Debug for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Issue");
        s.field("message", &self.message);
        if let Some(cause) = &self.cause {
            s.field("cause", &format_args!("{:#}", cause));
        }
        s.finish()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of one analyzer: a value or the issues that prevented it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerResult<T> {
    Result(T),
    Issues(Vec<Issue>),
}

impl<T> AnalyzerResult<T> {
    /// A result carrying a single issue.
    pub fn issue(message: impl Into<String>) -> Self {
        AnalyzerResult::Issues(vec![Issue::new(message)])
    }

    /// `value` unless any issue was collected while producing it.
    pub fn from_parts(value: T, issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            AnalyzerResult::Result(value)
        } else {
            AnalyzerResult::Issues(issues)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AnalyzerResult::Result(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            AnalyzerResult::Result(value) => Some(value),
            AnalyzerResult::Issues(_) => None,
        }
    }

    /// Issues of a failed result; empty for a successful one.
    pub fn issues(&self) -> &[Issue] {
        match self {
            AnalyzerResult::Result(_) => &[],
            AnalyzerResult::Issues(issues) => issues,
        }
    }

    pub fn into_result(self) -> Option<T> {
        match self {
            AnalyzerResult::Result(value) => Some(value),
            AnalyzerResult::Issues(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AnalyzerResult<U> {
        match self {
            AnalyzerResult::Result(value) => AnalyzerResult::Result(f(value)),
            AnalyzerResult::Issues(issues) => AnalyzerResult::Issues(issues),
        }
    }
}

/// Append the issues of `from` that `into` does not hold yet.
pub(crate) fn merge_issues(into: &mut Vec<Issue>, from: &[Issue]) {
    for issue in from {
        if !into.contains(issue) {
            into.push(issue.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(AnalyzerResult::from_parts(1, vec![]), AnalyzerResult::Result(1));
        let failed = AnalyzerResult::from_parts(1, vec![Issue::new("boom")]);
        assert!(!failed.is_ok());
        assert_eq!(failed.issues()[0].message, "boom");
        assert!(failed.result().is_none());
    }

    #[test]
    fn test_merge_issues_dedupes_shared_causes() {
        let shared = Issue::with_cause("Failed to fetch object: gone", anyhow::anyhow!("gone"));
        let lookalike = Issue::with_cause("Failed to fetch object: gone", anyhow::anyhow!("gone"));

        let mut merged = Vec::new();
        merge_issues(&mut merged, &[shared.clone(), Issue::new("plain")]);
        merge_issues(&mut merged, &[shared, Issue::new("plain"), lookalike]);

        // same cause instance collapses, an independent cause does not
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1], Issue::new("plain"));
    }

    #[test]
    fn test_issue_formatting() {
        let issue = Issue::with_cause("outer", anyhow::anyhow!("inner"));
        assert_eq!(issue.to_string(), "outer");
        assert!(format!("{:?}", issue).contains("inner"));
    }
}
