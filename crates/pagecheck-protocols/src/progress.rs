//! Progress events emitted during a check run.

/// Accessibility violation detected on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Text color and background are both white.
    WhiteOnWhite { index: usize },
    /// Text cannot be selected with the pointer.
    SelectionDisabled { index: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::WhiteOnWhite { index } => {
                write!(f, "white text on white background (<code> element {})", index + 1)
            }
            Violation::SelectionDisabled { index } => {
                write!(f, "text not selectable (<p> element {})", index + 1)
            }
        }
    }
}

/// One reportable step of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Opening { url: String },
    WaitingForRender { selector: String },
    TabsFound { count: usize },
    TabSeen { text: String },
    TabSelected { text: String },
    TabNotFound,
    TabClicked,
    PanelFound,
    PanelNotFound,
    CodeInspected {
        index: usize,
        background: String,
        color: String,
        user_select: String,
        text: String,
    },
    KbdInspected {
        index: usize,
        background: String,
        color: String,
        text: String,
    },
    ParagraphInspected { index: usize, user_select: String },
    Violation(Violation),
    Passed,
    /// An unexpected error ended the run. `trace` holds the source chain.
    Errored { message: String, trace: Vec<String> },
    Closing,
}

/// Receives progress events from a check run.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: Progress);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_is_one_based() {
        let v = Violation::WhiteOnWhite { index: 0 };
        assert!(v.to_string().contains("<code> element 1"));

        let v = Violation::SelectionDisabled { index: 1 };
        assert!(v.to_string().contains("<p> element 2"));
    }
}
