//! CLI definitions for pagecheck.

use std::path::PathBuf;

use clap::Parser;

use pagecheck_config::Config;

/// pagecheck CLI.
///
/// With no arguments, checks the default deployment with a headed browser.
#[derive(Debug, Parser)]
#[command(name = "pagecheck")]
#[command(about = "Browser accessibility check for the process monitor install instructions")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Page to check (overrides target.url)
    #[arg(long)]
    pub url: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Chrome remote debugging port
    #[arg(long)]
    pub debug_port: Option<u16>,

    /// Reuse a browser already listening on the debug port
    #[arg(long)]
    pub attach: bool,

    /// Browser executable
    #[arg(long)]
    pub chrome: Option<PathBuf>,

    /// Also write logs to daily rolling files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply flags on top of the loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.target.url = url.clone();
        }
        if self.headless {
            config.browser.headless = true;
        }
        if let Some(port) = self.debug_port {
            config.browser.debug_port = port;
        }
        if self.attach {
            config.browser.attach = true;
        }
        if let Some(chrome) = &self.chrome {
            config.browser.chrome_path = Some(chrome.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.logging.log_dir = Some(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["pagecheck"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.headless);

        let config = cli.apply(Config::default());
        assert!(!config.browser.headless);
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "pagecheck",
            "--url",
            "https://staging.example.com/",
            "--headless",
            "--debug-port",
            "9333",
            "--attach",
        ])
        .unwrap();

        let mut config = Config::default();
        config.browser.debug_port = 9400;
        let config = cli.apply(config);

        assert_eq!(config.target.url, "https://staging.example.com/");
        assert!(config.browser.headless);
        assert_eq!(config.browser.debug_port, 9333);
        assert!(config.browser.attach);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let cli = Cli::try_parse_from(["pagecheck", "-c", "pagecheck.toml"]).unwrap();
        let mut config = Config::default();
        config.browser.headless = true;

        let config = cli.apply(config);
        assert!(config.browser.headless);
        assert_eq!(cli.config, Some(PathBuf::from("pagecheck.toml")));
    }
}
