//! Check run settings.

use std::time::Duration;

/// Default deployment under test.
pub const DEFAULT_URL: &str = "https://swipswaps.github.io/firefox-performance-tuner/";

/// Everything a check run needs to know about the page under test.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Page to load.
    pub url: String,
    /// Selector for navigational tabs.
    pub tab_selector: String,
    /// A tab is selected when its text contains any of these (case-sensitive).
    pub tab_labels: Vec<String>,
    /// Selector for candidate instruction panels.
    pub panel_selector: String,
    /// Text identifying the installation panel.
    pub panel_marker: String,
    /// Upper bound on the initial render wait.
    pub render_timeout: Duration,
    /// Pause after the initial render and after clicking the tab.
    pub settle_delay: Duration,
    /// Number of `<code>` elements inspected.
    pub code_samples: usize,
    /// Number of `<kbd>` elements inspected.
    pub kbd_samples: usize,
    /// Number of `<p>` elements inspected.
    pub paragraph_samples: usize,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            tab_selector: ".tab".to_string(),
            tab_labels: vec!["Process".to_string(), "Monitor".to_string()],
            panel_selector: ".info-box, .section".to_string(),
            panel_marker: "Install Browser Extension".to_string(),
            render_timeout: Duration::from_secs(15),
            settle_delay: Duration::from_secs(2),
            code_samples: 3,
            kbd_samples: 3,
            paragraph_samples: 2,
        }
    }
}

impl CheckSettings {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    /// Whether a tab's text marks it as the process monitor tab.
    pub fn is_target_tab(&self, text: &str) -> bool {
        self.tab_labels.iter().any(|label| text.contains(label.as_str()))
    }

    /// Whether a panel's text marks it as the installation panel.
    pub fn is_target_panel(&self, text: &str) -> bool {
        text.contains(self.panel_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CheckSettings::default();
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.render_timeout, Duration::from_secs(15));
        assert_eq!(settings.code_samples, 3);
        assert_eq!(settings.kbd_samples, 3);
        assert_eq!(settings.paragraph_samples, 2);
    }

    #[test]
    fn test_target_tab_substring_match() {
        let settings = CheckSettings::default();
        assert!(settings.is_target_tab("Process Monitor"));
        assert!(settings.is_target_tab("🖥️ Monitor"));
        assert!(settings.is_target_tab("Processes"));
        assert!(!settings.is_target_tab("process monitor"));
        assert!(!settings.is_target_tab("Settings"));
    }

    #[test]
    fn test_target_panel() {
        let settings = CheckSettings::default();
        assert!(settings.is_target_panel("Step 1\nInstall Browser Extension\n..."));
        assert!(!settings.is_target_panel("Install browser extension"));
    }
}
