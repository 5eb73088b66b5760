//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The page under test and how to find things on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_tab_selector")]
    pub tab_selector: String,

    #[serde(default = "default_tab_labels")]
    pub tab_labels: Vec<String>,

    #[serde(default = "default_panel_selector")]
    pub panel_selector: String,

    #[serde(default = "default_panel_marker")]
    pub panel_marker: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            tab_selector: default_tab_selector(),
            tab_labels: default_tab_labels(),
            panel_selector: default_panel_selector(),
            panel_marker: default_panel_marker(),
        }
    }
}

fn default_url() -> String {
    "https://swipswaps.github.io/firefox-performance-tuner/".to_string()
}

fn default_tab_selector() -> String {
    ".tab".to_string()
}

fn default_tab_labels() -> Vec<String> {
    vec!["Process".to_string(), "Monitor".to_string()]
}

fn default_panel_selector() -> String {
    ".info-box, .section".to_string()
}

fn default_panel_marker() -> String {
    "Install Browser Extension".to_string()
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// Reuse a browser already listening on `debug_port` instead of
    /// launching a fresh one.
    #[serde(default)]
    pub attach: bool,

    /// Browser executable; searched in the usual install locations if unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Profile directory for the launched browser. Kept between runs; a
    /// temporary profile is used when unset.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            attach: false,
            chrome_path: None,
            profile_dir: None,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

/// Timing and sampling of the check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_code_samples")]
    pub code_samples: usize,

    #[serde(default = "default_kbd_samples")]
    pub kbd_samples: usize,

    #[serde(default = "default_paragraph_samples")]
    pub paragraph_samples: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            render_timeout_secs: default_render_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            code_samples: default_code_samples(),
            kbd_samples: default_kbd_samples(),
            paragraph_samples: default_paragraph_samples(),
        }
    }
}

fn default_render_timeout_secs() -> u64 {
    15
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_code_samples() -> usize {
    3
}

fn default_kbd_samples() -> usize {
    3
}

fn default_paragraph_samples() -> usize {
    2
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to daily rolling files in this directory.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
