//! Check run outcomes.

use pagecheck_protocols::Violation;

/// Why a check run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No tab carried any of the expected labels.
    TabNotFound,
    /// No panel contained the installation marker text.
    PanelNotFound,
    /// The installation panel breaks an accessibility rule.
    Accessibility(Violation),
    /// An unexpected error ended the run.
    Error { message: String },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::TabNotFound => write!(f, "process monitor tab not found"),
            Failure::PanelNotFound => write!(f, "installation instructions not found"),
            Failure::Accessibility(v) => write!(f, "accessibility violation: {}", v),
            Failure::Error { message } => write!(f, "error: {}", message),
        }
    }
}

/// Result of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed(Failure),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Process exit code for this verdict.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Verdict::Passed.exit_code(), 0);
        assert_eq!(Verdict::Failed(Failure::TabNotFound).exit_code(), 1);
        assert_eq!(
            Verdict::Failed(Failure::Error { message: "boom".to_string() }).exit_code(),
            1
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::Accessibility(Violation::SelectionDisabled { index: 0 });
        assert!(failure.to_string().contains("not selectable"));
        assert!(Failure::PanelNotFound.to_string().contains("not found"));
    }
}
