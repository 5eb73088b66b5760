//! Conversion from the file configuration to runtime settings.

use std::time::Duration;

use pagecheck_browser_cdp::BrowserManagerConfig;
use pagecheck_config::Config;
use pagecheck_core::CheckSettings;

pub(crate) fn check_settings(config: &Config) -> CheckSettings {
    CheckSettings {
        url: config.target.url.clone(),
        tab_selector: config.target.tab_selector.clone(),
        tab_labels: config.target.tab_labels.clone(),
        panel_selector: config.target.panel_selector.clone(),
        panel_marker: config.target.panel_marker.clone(),
        render_timeout: Duration::from_secs(config.check.render_timeout_secs),
        settle_delay: Duration::from_millis(config.check.settle_delay_ms),
        code_samples: config.check.code_samples,
        kbd_samples: config.check.kbd_samples,
        paragraph_samples: config.check.paragraph_samples,
    }
}

pub(crate) fn browser_config(config: &Config) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.browser.debug_port,
        viewport_width: config.browser.viewport_width,
        viewport_height: config.browser.viewport_height,
        profile_dir: config.browser.profile_dir.clone(),
        chrome_path: config.browser.chrome_path.clone(),
        headless: config.browser.headless,
        attach: config.browser.attach,
        ..Default::default()
    }
}
