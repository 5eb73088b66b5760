//! Integration tests against a real Chrome.
//!
//! These tests require Chrome or Chromium to be installed.
//! Run with: cargo test -p pagecheck-browser-cdp --test integration_test -- --ignored --nocapture

use std::io::Write;
use std::time::Duration;

use pagecheck_browser_cdp::{BrowserManager, BrowserManagerConfig, CdpBrowser};
use pagecheck_core::{run, CheckSettings, Failure, TracingSink, Verdict};
use pagecheck_protocols::Violation;
use tempfile::NamedTempFile;

fn test_config(port: u16) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: port,
        headless: true,
        ..Default::default()
    }
}

/// Serve `body` from a file and return its `file://` URL.
fn page(body: &str) -> (NamedTempFile, String) {
    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    write!(
        file,
        r#"<!doctype html><html><head><style>
            .white {{ background: #fff; color: #fff; }}
            .locked {{ user-select: none; }}
        </style></head><body>{}</body></html>"#,
        body
    )
    .unwrap();
    let url = url::Url::from_file_path(file.path()).unwrap().to_string();
    (file, url)
}

const TABS_SCRIPT: &str = r#"
<div class="tab" onclick="document.getElementById('panel').hidden = true">Settings</div>
<div class="tab" onclick="document.getElementById('panel').hidden = false">Process Monitor</div>
"#;

fn settings(url: &str) -> CheckSettings {
    CheckSettings::default()
        .with_url(url)
        .with_settle_delay(Duration::from_millis(200))
        .with_render_timeout(Duration::from_secs(5))
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_chrome_detection() {
    let chrome_path = BrowserManager::find_chrome();
    assert!(chrome_path.is_some(), "Chrome should be installed on the system");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_accessible_page_passes() {
    let body = format!(
        r#"{}<div id="panel" class="info-box" hidden>
            <h3>Install Browser Extension</h3>
            <p>Open <code>about:debugging</code> and press <kbd>Ctrl</kbd>.</p>
            <p>Select the manifest.</p>
        </div>"#,
        TABS_SCRIPT
    );
    let (_file, url) = page(&body);
    let browser = CdpBrowser::new(test_config(9341));
    let verdict = run(&browser, &settings(&url), &TracingSink).await;

    assert_eq!(verdict, Verdict::Passed);
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_white_on_white_code_fails() {
    let body = format!(
        r#"{}<div id="panel" class="section">
            <p>Install Browser Extension</p>
            <code class="white">about:debugging</code>
        </div>"#,
        TABS_SCRIPT
    );
    let (_file, url) = page(&body);
    let browser = CdpBrowser::new(test_config(9342));
    let verdict = run(&browser, &settings(&url), &TracingSink).await;

    assert_eq!(
        verdict,
        Verdict::Failed(Failure::Accessibility(Violation::WhiteOnWhite { index: 0 }))
    );
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_unselectable_paragraph_fails() {
    let body = format!(
        r#"{}<div id="panel" class="info-box">
            <p class="locked">Install Browser Extension</p>
        </div>"#,
        TABS_SCRIPT
    );
    let (_file, url) = page(&body);
    let browser = CdpBrowser::new(test_config(9343));
    let verdict = run(&browser, &settings(&url), &TracingSink).await;

    assert_eq!(
        verdict,
        Verdict::Failed(Failure::Accessibility(Violation::SelectionDisabled { index: 0 }))
    );
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_page_without_tabs_times_out() {
    let (_file, url) = page("<p>Loading...</p>");
    let browser = CdpBrowser::new(test_config(9344));
    let settings = settings(&url).with_render_timeout(Duration::from_millis(500));
    let verdict = run(&browser, &settings, &TracingSink).await;

    assert!(matches!(verdict, Verdict::Failed(Failure::Error { .. })));
}
