//! BrowserManager: Chrome discovery, launch, connection and teardown.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserManagerConfig};
use crate::cdp::{CdpClient, PageSession};

/// Attempts to reach a freshly launched Chrome before giving up.
const LAUNCH_POLL_ATTEMPTS: u32 = 30;
const LAUNCH_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Manages the browser connection for one check run.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    /// Chrome process handle (if we launched it).
    chrome_process: RwLock<Option<Child>>,
    /// Throwaway profile of the launched Chrome, removed on shutdown.
    temp_profile: RwLock<Option<TempDir>>,
}

impl BrowserManager {
    /// Create a new browser manager.
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            chrome_process: RwLock::new(None),
            temp_profile: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Check if a DevTools endpoint answers on the debug port.
    async fn is_chrome_running(&self) -> bool {
        CdpClient::browser_version(&self.config.endpoint())
            .await
            .is_ok()
    }

    /// Profile directory for a launch: the configured one, or a fresh
    /// temporary directory that lives until [`shutdown`](Self::shutdown).
    pub(crate) async fn profile_dir(&self) -> Result<PathBuf, BrowserError> {
        if let Some(dir) = &self.config.profile_dir {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!("Failed to create profile directory: {}", e);
            }
            return Ok(dir.clone());
        }

        let mut temp_profile = self.temp_profile.write().await;
        if let Some(dir) = temp_profile.as_ref() {
            return Ok(dir.path().to_path_buf());
        }

        let dir = tempfile::Builder::new()
            .prefix("pagecheck-profile-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed(format!("temporary profile: {}", e)))?;
        let path = dir.path().to_path_buf();
        *temp_profile = Some(dir);
        Ok(path)
    }

    /// Launch Chrome with remote debugging enabled.
    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = match &self.config.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };
        let profile_dir = self.profile_dir().await?;

        info!(
            "Launching {} with profile at: {}",
            chrome_path.display(),
            profile_dir.display()
        );

        let child = Command::new(&chrome_path)
            .args(self.config.chrome_args(&profile_dir))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary.
    ///
    /// A browser already on the debug port is only reused when
    /// `attach` is set; otherwise the port conflict is an error.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if self.is_chrome_running().await {
            if !self.config.attach {
                return Err(BrowserError::DebugPortInUse(self.config.debug_port));
            }
            info!("Attaching to browser on port {}", self.config.debug_port);
        } else {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut ready = false;
            for _ in 0..LAUNCH_POLL_ATTEMPTS {
                tokio::time::sleep(LAUNCH_POLL_INTERVAL).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }

            if !ready {
                self.kill_chrome().await;
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        }

        let client = CdpClient::connect(&self.config.endpoint(), self.config.command_timeout).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    /// Get the CDP client.
    async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Open a blank page sized to the configured viewport.
    pub async fn open_page(&self) -> Result<PageSession, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.create_page().await?;
        session
            .set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await?;

        debug!("Opened page {}", session.target_id());
        Ok(session)
    }

    /// Close a page.
    pub async fn close_page(&self, target_id: &str) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(target_id).await?;
        debug!("Closed page {}", target_id);
        Ok(())
    }

    /// Drop the connection, stop Chrome if we launched it and remove its
    /// temporary profile.
    ///
    /// An attached browser is left alone.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        let _ = self.client.write().await.take();
        self.kill_chrome().await;
        if let Some(dir) = self.temp_profile.write().await.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove profile {}: {}", path.display(), e);
            }
        }
        info!("Browser connection closed");
        Ok(())
    }

    async fn kill_chrome(&self) {
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to kill Chrome: {}", e);
            }
        }
    }
}
