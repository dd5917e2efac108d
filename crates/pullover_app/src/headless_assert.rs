//! Assertion helpers for headless replay.

use pullover_layout::{RefreshLayout, RefreshPhase};

/// Snapshot of container state used for assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub offset: i32,
    pub loading: bool,
    pub phase: RefreshPhase,
}

impl LayoutSnapshot {
    pub fn capture(layout: &RefreshLayout) -> Self {
        Self {
            offset: layout.offset(),
            loading: layout.is_loading(),
            phase: layout.phase(),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_offset(expected: i32, snapshot: &LayoutSnapshot) -> AssertionResult {
    if snapshot.offset == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "offset_mismatch".to_string(),
            message: format!("expected offset {expected}, got {}", snapshot.offset),
        }
    }
}

pub fn evaluate_assert_loading(expected: bool, snapshot: &LayoutSnapshot) -> AssertionResult {
    if snapshot.loading == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "loading_mismatch".to_string(),
            message: format!("expected loading={expected}, got loading={}", snapshot.loading),
        }
    }
}

pub fn evaluate_assert_phase(expected: &str, snapshot: &LayoutSnapshot) -> AssertionResult {
    let actual = snapshot.phase.as_str();
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "phase_mismatch".to_string(),
            message: format!("expected phase '{expected}', got '{actual}'"),
        }
    }
}

pub fn evaluate_assert_events(expected: &[String], actual: &[String]) -> AssertionResult {
    if expected == actual {
        return AssertionResult::Passed;
    }
    let position = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    AssertionResult::Failed {
        code: "events_mismatch".to_string(),
        message: format!(
            "events differ at index {position}: expected {expected:?}, got {actual:?}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LayoutSnapshot {
        LayoutSnapshot {
            offset: -50,
            loading: true,
            phase: RefreshPhase::Refreshing,
        }
    }

    #[test]
    fn scalar_assertions() {
        assert_eq!(evaluate_assert_offset(-50, &snapshot()), AssertionResult::Passed);
        assert_eq!(evaluate_assert_loading(true, &snapshot()), AssertionResult::Passed);
        assert_eq!(evaluate_assert_phase("refreshing", &snapshot()), AssertionResult::Passed);

        let AssertionResult::Failed { code, message } = evaluate_assert_offset(0, &snapshot())
        else {
            panic!("offset should mismatch");
        };
        assert_eq!(code, "offset_mismatch");
        assert!(message.contains("-50"));
    }

    #[test]
    fn events_mismatch_reports_first_difference() {
        let expected = vec!["header:start:10".to_string(), "header:end".to_string()];
        let actual = vec!["header:start:10".to_string()];
        let AssertionResult::Failed { message, .. } = evaluate_assert_events(&expected, &actual)
        else {
            panic!("events should mismatch");
        };
        assert!(message.starts_with("events differ at index 1"));
    }
}
