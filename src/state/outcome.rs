// Test outcome structures

use crate::state::TestStatus;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Group label carrying a Testomat.io test id, e.g. `T1a2b3c4d`
static TEST_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^T((?-u:\w){8})$").expect("valid test id pattern"));

/// What the hosting framework knows about a test
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestDescriptor {
    /// Qualified name (`Suite::method`, `suite: title` or a plain title)
    pub name: String,

    /// Explicit suite title, wins over anything derived from names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,

    /// Group/tag labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Elapsed time in seconds
    #[serde(default)]
    pub time: f64,

    /// Data-provider row of a parameterized test
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Value>,
}

impl TestDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time(mut self, seconds: f64) -> Self {
        self.time = seconds;
        self
    }

    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = data;
        self
    }

    /// Test part of the qualified name. A `suite: title` prefix is only
    /// read as a suite when no explicit suite was given.
    pub fn title(&self) -> &str {
        if let Some((_, method)) = self.name.rsplit_once("::") {
            return method.trim();
        }
        match self.name.split_once(':') {
            Some((_, title)) if self.suite.is_none() => title.trim(),
            _ => self.name.trim(),
        }
    }

    /// Suite implied by the qualified name, if it has one
    pub fn suite_hint(&self) -> Option<String> {
        let suite = if let Some((class, _)) = self.name.rsplit_once("::") {
            suite_title_from_name(class)
        } else if let Some((suite, _)) = self.name.split_once(':') {
            suite.trim().to_string()
        } else {
            return None;
        };

        Some(suite).filter(|s| !s.is_empty())
    }
}

/// One test result, ready to be submitted
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub external_id: Option<String>,
    pub title: String,
    pub suite_title: String,
    pub status: TestStatus,
    pub message: String,
    pub duration_ms: u64,
    pub stack_trace: Option<String>,
    pub examples: Option<Map<String, Value>>,
}

impl TestOutcome {
    /// Build an outcome from a descriptor
    pub fn from_descriptor(
        test: &TestDescriptor,
        suite_title: impl Into<String>,
        status: TestStatus,
    ) -> Self {
        Self {
            external_id: extract_test_id(&test.groups),
            title: normalize_title(test.title()),
            suite_title: suite_title.into().trim().to_string(),
            status,
            message: String::new(),
            duration_ms: seconds_to_millis(test.time),
            stack_trace: None,
            examples: example_from_row(&test.data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_stack_trace(mut self, trace: Option<&str>) -> Self {
        self.stack_trace = trace
            .map(str::trim_end)
            .filter(|t| !t.is_empty())
            .map(String::from);
        self
    }
}

/// Strip a leading `Test` word: `TestFooBar` -> `FooBar`, `Test login` -> `login`
pub fn normalize_title(name: &str) -> String {
    let name = name.trim();
    let Some(rest) = name.strip_prefix("Test") else {
        return name.to_string();
    };

    let starts_word = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == ' ');
    let rest = rest.trim_start_matches([' ', '_']);

    if starts_word && !rest.is_empty() {
        rest.to_string()
    } else {
        name.to_string()
    }
}

/// First group label shaped like `T` + 8 ASCII word characters, without the `T`
pub fn extract_test_id(groups: &[String]) -> Option<String> {
    groups.iter().find_map(|group| {
        TEST_ID_PATTERN
            .captures(group)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Suite title for a class-like name: `App\Tests\LoginTest` -> `Login`
pub fn suite_title_from_name(name: &str) -> String {
    let class = name.split("::").next().unwrap_or(name).trim();
    let short = class
        .rsplit(|c: char| c == '\\' || c == '/')
        .next()
        .unwrap_or(class);

    match short.strip_suffix("Test") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => short.to_string(),
    }
}

/// Elapsed seconds to whole milliseconds
pub fn seconds_to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Data-provider row to `{p0: .., p1: ..}`
pub fn example_from_row(row: &[Value]) -> Option<Map<String, Value>> {
    if row.is_empty() {
        return None;
    }

    let example = row
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (format!("p{}", i), Value::String(text))
        })
        .collect();

    Some(example)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_title_strips_prefix() {
        assert_eq!(normalize_title("TestFooBar"), "FooBar");
        assert_eq!(normalize_title("Test login"), "login");
        assert_eq!(normalize_title("Test_login"), "login");
        assert_eq!(normalize_title("Test42"), "42");
    }

    #[test]
    fn test_normalize_title_keeps_other_names() {
        assert_eq!(normalize_title("checks foo"), "checks foo");
        assert_eq!(normalize_title("Testing"), "Testing");
        assert_eq!(normalize_title("testFoo"), "testFoo");
        assert_eq!(normalize_title("Test"), "Test");
        assert_eq!(normalize_title("MyTestFoo"), "MyTestFoo");
    }

    #[test]
    fn test_normalize_title_strips_once() {
        assert_eq!(normalize_title("TestTestFoo"), "TestFoo");
    }

    #[test]
    fn test_extract_test_id() {
        let groups = vec!["T12345678".to_string(), "smoke".to_string()];
        assert_eq!(extract_test_id(&groups), Some("12345678".to_string()));
    }

    #[test]
    fn test_extract_test_id_missing() {
        assert_eq!(extract_test_id(&["smoke".to_string()]), None);
        assert_eq!(extract_test_id(&[]), None);
    }

    #[test]
    fn test_extract_test_id_is_ascii_only() {
        let groups = vec!["Tabcdéfgh".to_string(), "Tabcdefgh".to_string()];
        assert_eq!(extract_test_id(&groups), Some("abcdefgh".to_string()));
        assert_eq!(extract_test_id(&["Tテストテストテス".to_string()]), None);
    }

    #[test]
    fn test_extract_test_id_requires_exact_shape() {
        let groups = vec![
            "T1234567".to_string(),
            "T123456789".to_string(),
            "t12345678".to_string(),
            "Tabc-defgh".to_string(),
        ];
        assert_eq!(extract_test_id(&groups), None);
    }

    #[test]
    fn test_extract_test_id_first_match_wins() {
        let groups = vec!["Tabcdefgh".to_string(), "T12345678".to_string()];
        assert_eq!(extract_test_id(&groups), Some("abcdefgh".to_string()));
    }

    #[test]
    fn test_seconds_to_millis() {
        assert_eq!(seconds_to_millis(0.5), 500);
        assert_eq!(seconds_to_millis(1.2), 1200);
        assert_eq!(seconds_to_millis(0.0004), 0);
        assert_eq!(seconds_to_millis(0.123), 123);
        assert_eq!(seconds_to_millis(2.0), 2000);
        assert_eq!(seconds_to_millis(-1.0), 0);
        assert_eq!(seconds_to_millis(f64::NAN), 0);
    }

    #[test]
    fn test_example_from_row() {
        let example = example_from_row(&[json!("admin"), json!(42), json!(true)])
            .expect("example expected");
        let keys: Vec<&String> = example.keys().collect();
        assert_eq!(keys, vec!["p0", "p1", "p2"]);
        assert_eq!(example["p0"], json!("admin"));
        assert_eq!(example["p1"], json!("42"));
        assert_eq!(example["p2"], json!("true"));
    }

    #[test]
    fn test_example_from_empty_row() {
        assert!(example_from_row(&[]).is_none());
    }

    #[test]
    fn test_suite_title_from_name() {
        assert_eq!(suite_title_from_name("App\\Tests\\LoginTest"), "Login");
        assert_eq!(suite_title_from_name("App\\Tests\\LoginTest::testLogin"), "Login");
        assert_eq!(suite_title_from_name("LoginTest"), "Login");
        assert_eq!(suite_title_from_name("Test"), "Test");
        assert_eq!(suite_title_from_name("smoke suite"), "smoke suite");
    }

    #[test]
    fn test_descriptor_title_and_suite() {
        let test = TestDescriptor::new("App\\CartTest::testAddItem");
        assert_eq!(test.title(), "testAddItem");
        assert_eq!(test.suite_hint(), Some("Cart".to_string()));

        let test = TestDescriptor::new("acceptance: user logs in");
        assert_eq!(test.title(), "user logs in");
        assert_eq!(test.suite_hint(), Some("acceptance".to_string()));

        let test = TestDescriptor::new("TestLogin");
        assert_eq!(test.title(), "TestLogin");
        assert_eq!(test.suite_hint(), None);
    }

    #[test]
    fn test_descriptor_title_keeps_colon_with_explicit_suite() {
        let test = TestDescriptor::new("handles error: timeout").with_suite("Net");
        assert_eq!(test.title(), "handles error: timeout");

        let test = TestDescriptor::new("App\\CartTest::testAddItem").with_suite("Cart");
        assert_eq!(test.title(), "testAddItem");
    }

    #[test]
    fn test_outcome_from_descriptor() {
        let test = TestDescriptor::new("TestLogin")
            .with_groups(["T12345678", "smoke"])
            .with_time(0.5)
            .with_data(vec![json!("user")]);

        let outcome = TestOutcome::from_descriptor(&test, " Auth ", TestStatus::Passed);
        assert_eq!(outcome.title, "Login");
        assert_eq!(outcome.suite_title, "Auth");
        assert_eq!(outcome.external_id.as_deref(), Some("12345678"));
        assert_eq!(outcome.duration_ms, 500);
        assert!(outcome.examples.is_some());
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn test_outcome_blank_trace_dropped() {
        let test = TestDescriptor::new("checks foo");
        let outcome = TestOutcome::from_descriptor(&test, "", TestStatus::Failed)
            .with_message("boom")
            .with_stack_trace(Some("  \n"));
        assert!(outcome.stack_trace.is_none());
        assert_eq!(outcome.message, "boom");
    }
}
