//! Progress sink backed by `tracing`.

use pagecheck_protocols::{Progress, ProgressSink};
use tracing::{error, info, warn};

/// Logs every progress event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn report(&self, event: Progress) {
        match event {
            Progress::Opening { url } => info!(%url, "Opening page"),
            Progress::WaitingForRender { selector } => {
                info!(%selector, "Waiting for app to render")
            }
            Progress::TabsFound { count } => info!(count, "Found tabs"),
            Progress::TabSeen { text } => info!(%text, "Tab"),
            Progress::TabSelected { text } => info!(%text, "Found process monitor tab"),
            Progress::TabNotFound => warn!("Process monitor tab not found"),
            Progress::TabClicked => info!("Clicked process monitor tab"),
            Progress::PanelFound => info!("Found installation instructions"),
            Progress::PanelNotFound => warn!("Installation instructions not found"),
            Progress::CodeInspected {
                index,
                background,
                color,
                user_select,
                text,
            } => info!(
                element = index + 1,
                %background,
                %color,
                %user_select,
                %text,
                "<code> element"
            ),
            Progress::KbdInspected {
                index,
                background,
                color,
                text,
            } => info!(element = index + 1, %background, %color, %text, "<kbd> element"),
            Progress::ParagraphInspected { index, user_select } => {
                info!(element = index + 1, %user_select, "<p> element")
            }
            Progress::Violation(violation) => {
                warn!("Accessibility violation: {}", violation)
            }
            Progress::Passed => info!("Accessibility check passed"),
            Progress::Errored { message, trace } => {
                error!("Check aborted: {}", message);
                for (depth, cause) in trace.iter().enumerate() {
                    error!("  caused by ({}): {}", depth, cause);
                }
            }
            Progress::Closing => info!("Closing browser"),
        }
    }
}
