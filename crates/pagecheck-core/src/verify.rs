//! The page verification routine.

use pagecheck_protocols::{Browser, CheckError, Element, Page, Progress, ProgressSink, Violation};
use tracing::{debug, warn};

use crate::settings::CheckSettings;
use crate::style::{is_selection_disabled, is_white_on_white, truncate_chars, user_select};
use crate::verdict::{Failure, Verdict};

/// Characters of element text included in progress reports.
const REPORTED_TEXT_LEN: usize = 50;

/// Run a full check: open a session, verify, and always close the session.
///
/// Errors never escape; they are reported to `sink` and turned into a
/// failed verdict.
pub async fn run(browser: &dyn Browser, settings: &CheckSettings, sink: &dyn ProgressSink) -> Verdict {
    let page = match browser.open().await {
        Ok(page) => page,
        Err(e) => return errored(sink, &e),
    };

    let verdict = match verify(page.as_ref(), settings, sink).await {
        Ok(verdict) => verdict,
        Err(e) => errored(sink, &e),
    };

    sink.report(Progress::Closing);
    if let Err(e) = page.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    verdict
}

/// Verify the page. Expected negative outcomes come back as
/// `Ok(Verdict::Failed(..))`; driver problems as `Err`.
pub async fn verify(
    page: &dyn Page,
    settings: &CheckSettings,
    sink: &dyn ProgressSink,
) -> Result<Verdict, CheckError> {
    sink.report(Progress::Opening {
        url: settings.url.clone(),
    });
    page.navigate(&settings.url).await?;

    sink.report(Progress::WaitingForRender {
        selector: settings.tab_selector.clone(),
    });
    page.wait_for(&settings.tab_selector, settings.render_timeout)
        .await?;
    tokio::time::sleep(settings.settle_delay).await;

    let tabs = page.find_all(&settings.tab_selector).await?;
    sink.report(Progress::TabsFound { count: tabs.len() });

    let Some(tab) = select_tab(&tabs, settings, sink).await? else {
        sink.report(Progress::TabNotFound);
        return Ok(Verdict::Failed(Failure::TabNotFound));
    };

    tab.click().await?;
    sink.report(Progress::TabClicked);
    tokio::time::sleep(settings.settle_delay).await;

    let panels = page.find_all(&settings.panel_selector).await?;
    let Some(panel) = select_panel(&panels, settings).await? else {
        sink.report(Progress::PanelNotFound);
        return Ok(Verdict::Failed(Failure::PanelNotFound));
    };
    sink.report(Progress::PanelFound);

    if let Some(violation) = inspect_code(panel, settings, sink).await? {
        return Ok(violated(sink, violation));
    }

    inspect_kbd(panel, settings, sink).await?;

    if let Some(violation) = inspect_paragraphs(panel, settings, sink).await? {
        return Ok(violated(sink, violation));
    }

    sink.report(Progress::Passed);
    Ok(Verdict::Passed)
}

/// First tab whose text carries one of the expected labels.
async fn select_tab<'a>(
    tabs: &'a [Box<dyn Element>],
    settings: &CheckSettings,
    sink: &dyn ProgressSink,
) -> Result<Option<&'a dyn Element>, CheckError> {
    for tab in tabs {
        let text = tab.text().await?;
        sink.report(Progress::TabSeen { text: text.clone() });
        if settings.is_target_tab(&text) {
            sink.report(Progress::TabSelected { text });
            return Ok(Some(tab.as_ref()));
        }
    }
    Ok(None)
}

async fn select_panel<'a>(
    panels: &'a [Box<dyn Element>],
    settings: &CheckSettings,
) -> Result<Option<&'a dyn Element>, CheckError> {
    for panel in panels {
        let text = panel.text().await?;
        if settings.is_target_panel(&text) {
            return Ok(Some(panel.as_ref()));
        }
    }
    debug!("Checked {} candidate panels", panels.len());
    Ok(None)
}

/// Stops at the first white-on-white `<code>` element.
async fn inspect_code(
    panel: &dyn Element,
    settings: &CheckSettings,
    sink: &dyn ProgressSink,
) -> Result<Option<Violation>, CheckError> {
    let elements = panel.find_children("code").await?;
    for (index, code) in elements.iter().take(settings.code_samples).enumerate() {
        let background = code.computed_style("background-color").await?;
        let color = code.computed_style("color").await?;
        let user_select = user_select(code.as_ref()).await?;
        let text = code.text().await?;

        let white_on_white = is_white_on_white(&background, &color);
        sink.report(Progress::CodeInspected {
            index,
            background,
            color,
            user_select,
            text: truncate_chars(&text, REPORTED_TEXT_LEN),
        });

        if white_on_white {
            return Ok(Some(Violation::WhiteOnWhite { index }));
        }
    }
    Ok(None)
}

/// Keyboard shortcuts are reported but not judged.
async fn inspect_kbd(
    panel: &dyn Element,
    settings: &CheckSettings,
    sink: &dyn ProgressSink,
) -> Result<(), CheckError> {
    let elements = panel.find_children("kbd").await?;
    for (index, kbd) in elements.iter().take(settings.kbd_samples).enumerate() {
        let background = kbd.computed_style("background-color").await?;
        let color = kbd.computed_style("color").await?;
        let text = kbd.text().await?;
        sink.report(Progress::KbdInspected {
            index,
            background,
            color,
            text,
        });
    }
    Ok(())
}

async fn inspect_paragraphs(
    panel: &dyn Element,
    settings: &CheckSettings,
    sink: &dyn ProgressSink,
) -> Result<Option<Violation>, CheckError> {
    let elements = panel.find_children("p").await?;
    for (index, p) in elements.iter().take(settings.paragraph_samples).enumerate() {
        let user_select = user_select(p.as_ref()).await?;
        let disabled = is_selection_disabled(&user_select);
        sink.report(Progress::ParagraphInspected { index, user_select });

        if disabled {
            return Ok(Some(Violation::SelectionDisabled { index }));
        }
    }
    Ok(None)
}

fn violated(sink: &dyn ProgressSink, violation: Violation) -> Verdict {
    sink.report(Progress::Violation(violation.clone()));
    Verdict::Failed(Failure::Accessibility(violation))
}

fn errored(sink: &dyn ProgressSink, error: &CheckError) -> Verdict {
    let mut trace = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        trace.push(cause.to_string());
        source = cause.source();
    }

    let message = std::iter::once(error.to_string())
        .chain(trace.iter().cloned())
        .collect::<Vec<_>>()
        .join(": ");

    sink.report(Progress::Errored {
        message: error.to_string(),
        trace,
    });
    Verdict::Failed(Failure::Error { message })
}
