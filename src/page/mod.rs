//! Page lifecycle: the shared document, the document-ready notification,
//! and rendering of the page.

pub mod actions;
pub mod runner;

use serde::Deserialize;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::info;

use crate::config::PageConfig;
use crate::dom::{Document, Element};
use crate::error::{ConfigError, PageError};

/// How the page is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// One markup line per element.
    #[default]
    Markup,
    /// The document as JSON.
    Json,
}

impl FromStr for RenderFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" => Ok(Self::Markup),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                key: "render.format",
                reason: format!("'{}' is not one of markup, json", other),
            }),
        }
    }
}

/// Handle to a page. Clones share the same document and ready state.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

#[derive(Debug)]
struct PageInner {
    document: Mutex<Document>,
    ready: watch::Sender<bool>,
}

impl Page {
    /// Create a page with an empty document, still loading.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create a loading page around an existing document.
    pub fn with_document(document: Document) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            inner: Arc::new(PageInner {
                document: Mutex::new(document),
                ready,
            }),
        }
    }

    /// Build the page markup described by the configuration.
    pub fn from_config(config: &PageConfig) -> Self {
        let mut document = Document::new();
        if config.render_sidebar {
            document.insert(Element::new(config.sidebar_id.as_str()));
        }
        if config.render_clock {
            document.insert(Element::new(config.clock_id.as_str()));
        }
        info!("Page built with {} element(s)", document.len());
        Self::with_document(document)
    }

    /// Fire the document-ready notification.
    ///
    /// Returns true only for the call that made the page ready.
    pub fn mark_ready(&self) -> bool {
        let fired = self.inner.ready.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
        if fired {
            info!("Document ready");
        }
        fired
    }

    #[allow(dead_code)]
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.borrow()
    }

    /// Wait until the page is ready. Resolves immediately if it already is.
    pub async fn ready(&self) {
        let mut rx = self.inner.ready.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Run a closure with read access to the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.lock())
    }

    /// Run a closure with write access to the document.
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.lock())
    }

    /// Render the current document.
    pub fn render(&self, format: RenderFormat) -> Result<String, PageError> {
        self.read(|doc| match format {
            RenderFormat::Markup => Ok(doc
                .elements()
                .map(Element::to_markup)
                .collect::<Vec<_>>()
                .join("\n")),
            RenderFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
