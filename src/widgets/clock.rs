//! Live clock widget.
//!
//! Renders the current time into the clock element once the page is ready,
//! then again on every tick until its [`ClockHandle`] is cancelled or dropped.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use super::format::{self, TimeFormat};
use super::source::{LocalClock, TimeSource};
use crate::config::{ClockConfig, PageConfig};
use crate::error::ConfigError;
use crate::page::Page;

/// Default tick interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Writes the formatted current time into one element of the page.
#[derive(Debug)]
pub struct ClockDisplay {
    page: Page,
    target_id: String,
    format: Arc<dyn TimeFormat>,
    source: Arc<dyn TimeSource>,
    interval: Duration,
}

impl ClockDisplay {
    /// Create a clock ticking at [`DEFAULT_INTERVAL`].
    pub fn new(
        page: Page,
        target_id: impl Into<String>,
        format: Arc<dyn TimeFormat>,
        source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            page,
            target_id: target_id.into(),
            format,
            source,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Create a clock on the local system time, as configured.
    pub fn from_config(
        page: Page,
        page_config: &PageConfig,
        clock_config: &ClockConfig,
    ) -> Result<Self, ConfigError> {
        let format = format::from_config(clock_config)?;
        Ok(Self::new(page, page_config.clock_id.as_str(), format, Arc::new(LocalClock))
            .with_interval(clock_config.interval()))
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Render the current time into the clock element.
    ///
    /// Does nothing when the page has no such element.
    pub fn update_clock(&self) {
        let text = self.format.format(self.source.now());
        self.page.write(|doc| {
            if let Some(element) = doc.get_element_by_id_mut(&self.target_id) {
                element.set_text_content(text);
            }
        });
    }

    /// Start the clock once the page is ready.
    ///
    /// The first render happens as soon as the page is ready, then one per
    /// interval. Must be called within a tokio runtime.
    pub fn run_on_ready(self) -> ClockHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(cancel_rx));
        ClockHandle {
            cancel: Some(cancel_tx),
            task,
        }
    }

    async fn run(self, mut cancel: oneshot::Receiver<()>) {
        tokio::select! {
            _ = self.page.ready() => {}
            _ = &mut cancel => {
                debug!("Clock cancelled before the page was ready");
                return;
            }
        }

        // The first tick completes immediately.
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            "Clock started on '{}' every {:?}",
            self.target_id, self.interval
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.update_clock(),
                _ = &mut cancel => break,
            }
        }

        debug!("Clock on '{}' stopped", self.target_id);
    }
}

/// Running clock. Cancelling or dropping it stops all future ticks.
#[derive(Debug)]
pub struct ClockHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Stop future ticks. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Whether the clock task has exited.
    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel and wait for the clock task to exit.
    pub async fn shutdown(mut self) {
        self.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Element};
    use crate::widgets::format::{LocaleTimeFormat, PatternTimeFormat};
    use crate::widgets::source::ManualTime;
    use chrono::NaiveTime;

    fn page_with_clock() -> Page {
        let mut document = Document::new();
        document.insert(Element::new("hora"));
        Page::with_document(document)
    }

    fn shown(page: &Page) -> String {
        page.read(|doc| {
            doc.get_element_by_id("hora")
                .map(|el| el.text_content().to_string())
                .unwrap_or_default()
        })
    }

    fn clock(page: &Page, start: NaiveTime, format: Arc<dyn TimeFormat>) -> ClockDisplay {
        ClockDisplay::new(
            page.clone(),
            "hora",
            format,
            Arc::new(ManualTime::starting_at(start)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_clock_renders_hour_and_minute() {
        let page = page_with_clock();
        let display = clock(
            &page,
            NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
            Arc::new(LocaleTimeFormat::EsCo),
        );

        display.update_clock();
        assert_eq!(shown(&page), "14:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_clock_without_element_is_noop() {
        let mut document = Document::new();
        document.insert(Element::new("sidebar"));
        let page = Page::with_document(document);
        let display = clock(
            &page,
            NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
            Arc::new(LocaleTimeFormat::EsCo),
        );

        display.update_clock();
        assert!(page.read(|doc| doc.get_element_by_id("hora").is_none()));
        assert_eq!(page.read(|doc| doc.len()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_ready() {
        let page = page_with_clock();
        let _handle = clock(
            &page,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Arc::new(LocaleTimeFormat::EsCo),
        )
        .run_on_ready();

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(shown(&page), "");

        page.mark_ready();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(shown(&page), "08:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_tick_reads_the_clock() {
        let page = page_with_clock();
        page.mark_ready();
        let _handle = clock(
            &page,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Arc::new(PatternTimeFormat::new("%H:%M:%S").unwrap()),
        )
        .run_on_ready();

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(shown(&page), "08:00:00");

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(shown(&page), "08:00:01");

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(shown(&page), "08:00:02");
    }

    #[tokio::test(start_paused = true)]
    async fn test_minute_rollover_after_load() {
        let page = page_with_clock();
        page.mark_ready();
        let _handle = clock(
            &page,
            NaiveTime::from_hms_milli_opt(9, 59, 59, 500).unwrap(),
            Arc::new(LocaleTimeFormat::EsCo),
        )
        .run_on_ready();

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(shown(&page), "09:59");

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(shown(&page), "10:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let page = page_with_clock();
        page.mark_ready();
        let mut handle = clock(
            &page,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Arc::new(PatternTimeFormat::new("%H:%M:%S").unwrap()),
        )
        .run_on_ready();

        time::sleep(Duration::from_millis(1010)).await;
        assert_eq!(shown(&page), "08:00:01");

        handle.cancel();
        handle.cancel();
        time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(shown(&page), "08:00:01");
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let page = page_with_clock();
        page.mark_ready();
        let handle = clock(
            &page,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Arc::new(PatternTimeFormat::new("%H:%M:%S").unwrap()),
        )
        .run_on_ready();

        time::sleep(Duration::from_millis(10)).await;
        drop(handle);

        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(shown(&page), "08:00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_ready_never_renders() {
        let page = page_with_clock();
        let handle = clock(
            &page,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            Arc::new(LocaleTimeFormat::EsCo),
        )
        .run_on_ready();

        handle.shutdown().await;

        page.mark_ready();
        time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(shown(&page), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_configured_interval() {
        let page = page_with_clock();
        let page_config = PageConfig {
            sidebar_id: "sidebar".into(),
            marker_class: "activo".into(),
            clock_id: "hora".into(),
            render_sidebar: true,
            render_clock: true,
        };
        let clock_config = ClockConfig {
            locale: "es-CO".into(),
            pattern: None,
            interval_ms: 250,
        };

        let display = ClockDisplay::from_config(page.clone(), &page_config, &clock_config).unwrap();
        assert_eq!(display.interval, Duration::from_millis(250));

        display.update_clock();
        assert_eq!(shown(&page).len(), "HH:MM".len());
    }
}
