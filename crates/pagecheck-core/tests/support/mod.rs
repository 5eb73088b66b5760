//! In-memory browser used by the scenario tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagecheck_core::CheckSettings;
use pagecheck_protocols::{Browser, CheckError, Element, Page, Progress, ProgressSink};
use parking_lot::Mutex;

pub const WHITE: &str = "rgb(255, 255, 255)";

pub fn settings() -> CheckSettings {
    CheckSettings::default()
        .with_url("https://example.test/app/")
        .with_settle_delay(Duration::ZERO)
        .with_render_timeout(Duration::from_millis(50))
}

/// Observations shared by every handle of one fake browser.
#[derive(Default)]
pub struct Calls {
    pub opened: Mutex<usize>,
    pub closed: Mutex<usize>,
    pub navigated: Mutex<Vec<String>>,
    pub clicks: Mutex<Vec<String>>,
    pub style_reads: Mutex<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct FakeNode {
    text: String,
    styles: HashMap<String, String>,
    children: HashMap<String, Vec<FakeNode>>,
}

impl FakeNode {
    pub fn new(text: &str) -> Self {
        let styles = [
            ("background-color", "rgba(0, 0, 0, 0)"),
            ("color", "rgb(33, 37, 41)"),
            ("user-select", "auto"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            text: text.to_string(),
            styles,
            children: HashMap::new(),
        }
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, tag: &str, node: FakeNode) -> Self {
        self.children.entry(tag.to_string()).or_default().push(node);
        self
    }
}

/// Installation panel that passes every check.
pub fn healthy_panel() -> FakeNode {
    FakeNode::new("Install Browser Extension\nOpen about:debugging")
        .child(
            "code",
            FakeNode::new("about:debugging#/runtime/this-firefox")
                .style("background-color", "rgb(240, 240, 240)")
                .style("color", "rgb(20, 20, 20)")
                .style("user-select", "all"),
        )
        .child("code", FakeNode::new("manifest.json"))
        .child("kbd", FakeNode::new("Ctrl").style("background-color", WHITE))
        .child("p", FakeNode::new("Load the extension temporarily."))
        .child("p", FakeNode::new("Reload the page afterwards."))
}

#[derive(Clone)]
pub struct FakePage {
    pub tabs: Vec<FakeNode>,
    pub panels: Vec<FakeNode>,
    pub navigate_error: Option<String>,
    pub driver_error_on_click: bool,
    pub close_error: bool,
    calls: Arc<Calls>,
}

impl FakePage {
    pub fn new(tabs: &[&str], panels: Vec<FakeNode>) -> Self {
        Self {
            tabs: tabs.iter().map(|t| FakeNode::new(t)).collect(),
            panels,
            navigate_error: None,
            driver_error_on_click: false,
            close_error: false,
            calls: Arc::new(Calls::default()),
        }
    }

    pub fn calls(&self) -> Arc<Calls> {
        self.calls.clone()
    }

    fn handles(&self, nodes: &[FakeNode]) -> Vec<Box<dyn Element>> {
        nodes
            .iter()
            .map(|node| {
                Box::new(FakeElement {
                    node: node.clone(),
                    fail_click: self.driver_error_on_click,
                    calls: self.calls.clone(),
                }) as Box<dyn Element>
            })
            .collect()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn navigate(&self, url: &str) -> Result<(), CheckError> {
        self.calls.navigated.lock().push(url.to_string());
        match &self.navigate_error {
            Some(message) => Err(CheckError::Navigation(message.clone())),
            None => Ok(()),
        }
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), CheckError> {
        if self.tabs.is_empty() {
            tokio::time::sleep(timeout).await;
            return Err(CheckError::Timeout(format!(
                "Waiting for selector '{}' timed out",
                selector
            )));
        }
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError> {
        Ok(match selector {
            ".tab" => self.handles(&self.tabs),
            ".info-box, .section" => self.handles(&self.panels),
            _ => Vec::new(),
        })
    }

    async fn close(&self) -> Result<(), CheckError> {
        *self.calls.closed.lock() += 1;
        if self.close_error {
            return Err(CheckError::Closed);
        }
        Ok(())
    }
}

pub struct FakeElement {
    node: FakeNode,
    fail_click: bool,
    calls: Arc<Calls>,
}

#[async_trait]
impl Element for FakeElement {
    async fn text(&self) -> Result<String, CheckError> {
        Ok(self.node.text.clone())
    }

    async fn find_children(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError> {
        let children = self.node.children.get(selector).cloned().unwrap_or_default();
        Ok(children
            .into_iter()
            .map(|node| {
                Box::new(FakeElement {
                    node,
                    fail_click: self.fail_click,
                    calls: self.calls.clone(),
                }) as Box<dyn Element>
            })
            .collect())
    }

    async fn computed_style(&self, property: &str) -> Result<String, CheckError> {
        self.calls
            .style_reads
            .lock()
            .push(format!("{}|{}", self.node.text, property));
        Ok(self.node.styles.get(property).cloned().unwrap_or_default())
    }

    async fn click(&self) -> Result<(), CheckError> {
        if self.fail_click {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket closed");
            return Err(CheckError::driver(io));
        }
        self.calls.clicks.lock().push(self.node.text.clone());
        Ok(())
    }
}

pub struct FakeBrowser {
    page: FakePage,
    pub fail_open: bool,
}

impl FakeBrowser {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            fail_open: false,
        }
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open(&self) -> Result<Box<dyn Page>, CheckError> {
        if self.fail_open {
            return Err(CheckError::Launch("Chrome not found".to_string()));
        }
        *self.page.calls.opened.lock() += 1;
        Ok(Box::new(self.page.clone()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Progress>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Progress> {
        self.events.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Progress) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(*e)).count()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, event: Progress) {
        self.events.lock().push(event);
    }
}
