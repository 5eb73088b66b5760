//! [`Browser`], [`Page`] and [`Element`] backed by CDP.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagecheck_protocols::{Browser, CheckError, Element, Page};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cdp::{CdpError, PageSession};
use crate::manager::{BrowserError, BrowserManager, BrowserManagerConfig};

/// Interval between selector polls while waiting for render.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

const TEXT_FN: &str = "function() { return this.innerText ?? this.textContent ?? ''; }";
const STYLE_FN: &str =
    "function(property) { return window.getComputedStyle(this).getPropertyValue(property); }";

impl From<CdpError> for CheckError {
    fn from(e: CdpError) -> Self {
        if e.is_stale_node() {
            return CheckError::StaleElement(e.to_string());
        }
        match e {
            CdpError::ChromeNotAvailable(msg) => CheckError::Launch(msg),
            CdpError::NavigationFailed(msg) => CheckError::Navigation(msg),
            CdpError::ElementNotFound(msg) => CheckError::ElementNotFound(msg),
            CdpError::JavaScript(msg) => CheckError::Script(msg),
            CdpError::Timeout(msg) => CheckError::Timeout(msg),
            CdpError::SessionClosed => CheckError::Closed,
            other => CheckError::driver(other),
        }
    }
}

impl From<BrowserError> for CheckError {
    fn from(e: BrowserError) -> Self {
        match e {
            BrowserError::ChromeNotFound
            | BrowserError::LaunchFailed(_)
            | BrowserError::DebugPortInUse(_) => {
                CheckError::Launch(e.to_string())
            }
            BrowserError::NotConnected => CheckError::Closed,
            BrowserError::Cdp(cdp) => cdp.into(),
        }
    }
}

/// Chrome driven over CDP.
pub struct CdpBrowser {
    manager: Arc<BrowserManager>,
}

impl CdpBrowser {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            manager: Arc::new(BrowserManager::new(config)),
        }
    }
}

#[async_trait]
impl Browser for CdpBrowser {
    async fn open(&self) -> Result<Box<dyn Page>, CheckError> {
        let session = match self.manager.open_page().await {
            Ok(session) => session,
            Err(e) => {
                // A browser may have been launched before the failure.
                let _ = self.manager.shutdown().await;
                return Err(e.into());
            }
        };

        Ok(Box::new(CdpPage {
            manager: self.manager.clone(),
            session: Arc::new(session),
            root: Mutex::new(None),
        }))
    }
}

/// One page session of a check run.
pub struct CdpPage {
    manager: Arc<BrowserManager>,
    session: Arc<PageSession>,
    /// Document root node id. Fetching a new root invalidates issued node ids,
    /// so it is reused until the next navigation.
    root: Mutex<Option<i64>>,
}

impl CdpPage {
    async fn root(&self) -> Result<i64, CdpError> {
        let mut root = self.root.lock().await;
        if let Some(id) = *root {
            return Ok(id);
        }
        let id = self.session.document_root().await?;
        *root = Some(id);
        Ok(id)
    }

    fn elements(&self, node_ids: Vec<i64>) -> Vec<Box<dyn Element>> {
        node_ids
            .into_iter()
            .map(|node_id| {
                Box::new(CdpElement {
                    session: self.session.clone(),
                    node_id,
                }) as Box<dyn Element>
            })
            .collect()
    }
}

#[async_trait]
impl Page for CdpPage {
    async fn navigate(&self, url: &str) -> Result<(), CheckError> {
        *self.root.lock().await = None;
        self.session
            .navigate(url, self.manager.config().command_timeout)
            .await?;

        match self.session.get_title().await {
            Ok(title) => debug!("Loaded '{}'", title),
            Err(e) => debug!("Could not read page title: {}", e),
        }
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), CheckError> {
        let found = poll_until(timeout, move || async move {
            let root = self.session.document_root().await?;
            let matched = self.session.query_selector(root, selector).await?;
            Ok(matched.map(|_| root))
        })
        .await?;

        match found {
            Some(root) => {
                *self.root.lock().await = Some(root);
                Ok(())
            }
            None => Err(CheckError::Timeout(format!(
                "Waiting for selector '{}' timed out after {:?}",
                selector, timeout
            ))),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError> {
        let root = self.root().await?;
        let node_ids = self.session.query_selector_all(root, selector).await?;
        debug!("'{}' matched {} elements", selector, node_ids.len());
        Ok(self.elements(node_ids))
    }

    async fn close(&self) -> Result<(), CheckError> {
        if let Err(e) = self.session.release_objects().await {
            debug!("Failed to release remote objects: {}", e);
        }
        let closed = self.manager.close_page(self.session.target_id()).await;
        if let Err(ref e) = closed {
            warn!("Failed to close page {}: {}", self.session.target_id(), e);
        }
        self.manager.shutdown().await?;
        closed.map_err(Into::into)
    }
}

/// Repeat `poll` until it yields a value. Gives `Ok(None)` once `timeout`
/// has passed, even while a poll is still waiting on the browser.
async fn poll_until<T, F, Fut>(timeout: Duration, mut poll: F) -> Result<Option<T>, CdpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, CdpError>>,
{
    let polling = async {
        loop {
            if let Some(value) = poll().await? {
                return Ok::<T, CdpError>(value);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    };

    match tokio::time::timeout(timeout, polling).await {
        Ok(result) => result.map(Some),
        Err(_) => Ok(None),
    }
}

/// DOM element addressed by CDP node id.
pub struct CdpElement {
    session: Arc<PageSession>,
    node_id: i64,
}

impl CdpElement {
    async fn call(&self, function: &str, args: Vec<serde_json::Value>) -> Result<String, CheckError> {
        let object = self.session.resolve_node(self.node_id).await?;
        let object_id = object
            .object_id
            .ok_or_else(|| CheckError::StaleElement(format!("node {} has no object", self.node_id)))?;

        let value = self
            .session
            .call_function_on(&object_id, function, args)
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl Element for CdpElement {
    async fn text(&self) -> Result<String, CheckError> {
        self.call(TEXT_FN, Vec::new()).await
    }

    async fn find_children(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError> {
        let node_ids = self
            .session
            .query_selector_all(self.node_id, selector)
            .await?;

        Ok(node_ids
            .into_iter()
            .map(|node_id| {
                Box::new(CdpElement {
                    session: self.session.clone(),
                    node_id,
                }) as Box<dyn Element>
            })
            .collect())
    }

    async fn computed_style(&self, property: &str) -> Result<String, CheckError> {
        self.call(STYLE_FN, vec![json!(property)]).await
    }

    async fn click(&self) -> Result<(), CheckError> {
        self.session.scroll_into_view(self.node_id).await?;

        let box_model = self
            .session
            .get_box_model(self.node_id)
            .await?
            .ok_or_else(|| CheckError::ElementNotFound(format!("node {} (not visible)", self.node_id)))?;

        let (x, y) = PageSession::quad_center(&box_model.content);
        self.session.click(x, y).await?;
        Ok(())
    }
}
