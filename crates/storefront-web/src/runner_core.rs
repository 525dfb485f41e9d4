//! Platform-independent runner wrapping a [`Page`].
//!
//! Shared by the wasm-bindgen exports and native tests. No JS types here.

use core::time::Duration;

use anyhow::anyhow;
use tracing::{debug, warn};

use storefront_core::catalog::parse_json;
use storefront_core::config::Settings;
use storefront_core::types::{ReviewPayload, SubmitAck};
use storefront_page::{Disposer, EventEffect, Page, PageEvent, PageHandles};

use crate::patch::{Patch, PatchView};

pub struct RunnerCore {
    page: Page,
    disposers: Vec<Disposer>,
    view: PatchView,
    settings: Settings,
    /// Time since page load, advanced only by the host.
    now: Duration,
    /// Validated body waiting to be picked up by the host.
    outgoing: Option<ReviewPayload>,
    logs: Vec<String>,
}

impl RunnerCore {
    /// Build the page from JSON-encoded handles and catalog.
    pub fn new(handles_json: &str, catalog_json: &str, path: &str) -> Result<Self, String> {
        Self::with_settings(handles_json, catalog_json, path, Settings::default())
    }

    pub fn with_settings(
        handles_json: &str,
        catalog_json: &str,
        path: &str,
        settings: Settings,
    ) -> Result<Self, String> {
        settings.validate().map_err(|e| e.to_string())?;
        let handles: PageHandles =
            serde_json::from_str(handles_json).map_err(|e| format!("invalid page handles: {e}"))?;
        let catalog = parse_json(catalog_json).map_err(|e| format!("invalid catalog: {e}"))?;
        let mut view = PatchView::new();
        let (page, disposers) = Page::init(&handles, &settings, catalog, path, &mut view);
        Ok(Self {
            page,
            disposers,
            view,
            settings,
            now: Duration::ZERO,
            outgoing: None,
            logs: Vec::new(),
        })
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Endpoint path the host posts review bodies to.
    pub fn review_endpoint(&self) -> &str {
        &self.settings.reviews.endpoint
    }

    /// Advance the clock by `dt_ms` and fire whatever became due.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host timestamps can be NaN or negative; ignore those.
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let step = Duration::try_from_secs_f64(dt_ms / 1000.0).unwrap_or(Duration::MAX);
        self.now = self.now.saturating_add(step);
        self.page.tick(self.now, &mut self.view);
    }

    /// Set the clock to an absolute time since page load. Time never runs backwards.
    pub fn set_time_ms(&mut self, ts_ms: f64) {
        if !ts_ms.is_finite() || ts_ms <= 0.0 {
            return;
        }
        let at = Duration::try_from_secs_f64(ts_ms / 1000.0).unwrap_or(Duration::MAX);
        if at > self.now {
            self.now = at;
        }
        self.page.tick(self.now, &mut self.view);
    }

    /// Milliseconds since page load at which the host should advance next.
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.page.next_deadline().map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Parse and dispatch one JSON-encoded [`PageEvent`].
    ///
    /// Returns `false` if the event was malformed or nothing listens for it.
    pub fn push_event_json(&mut self, json: &str) -> bool {
        let event: PageEvent = match serde_json::from_str(json) {
            Ok(event) => event,
            Err(e) => {
                self.logs.push(format!("malformed event: {e}"));
                return false;
            }
        };
        match self.page.dispatch(event, self.now, &mut self.view) {
            EventEffect::Handled => true,
            EventEffect::Ignored => false,
            EventEffect::SendReview(payload) => {
                debug!(rating = %payload.rating, "review ready for the host to send");
                self.outgoing = Some(payload);
                true
            }
        }
    }

    /// JSON body of a review the host must POST, if one is waiting.
    pub fn take_review_request(&mut self) -> Option<String> {
        let payload = self.outgoing.take()?;
        match serde_json::to_string(&payload) {
            Ok(body) => Some(body),
            Err(e) => {
                self.logs.push(format!("review body encoding failed: {e}"));
                self.page.finish_review(Err(e.into()), self.now, &mut self.view);
                None
            }
        }
    }

    /// Feed back the HTTP result of the last review request.
    ///
    /// `ok` is false for network failures and non-2xx statuses; `body` is
    /// the response text.
    pub fn finish_review(&mut self, ok: bool, body: &str) -> bool {
        let response = if ok {
            SubmitAck::parse(body).map_err(anyhow::Error::from)
        } else {
            Err(anyhow!("review request failed: {body}"))
        };
        match self.page.finish_review(response, self.now, &mut self.view) {
            Some(outcome) => {
                debug!(?outcome, "review response applied");
                true
            }
            None => {
                warn!("review response with no review form installed");
                false
            }
        }
    }

    /// Drain the patches produced since the last call.
    pub fn take_patches(&mut self) -> Vec<Patch> {
        self.view.take()
    }

    pub fn take_patches_json(&mut self) -> String {
        let patches = self.take_patches();
        serde_json::to_string(&patches).unwrap_or_else(|e| {
            self.logs.push(format!("patch encoding failed: {e}"));
            "[]".to_string()
        })
    }

    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// Detach every component. Later events are ignored.
    pub fn dispose(&mut self) {
        let disposers = std::mem::take(&mut self.disposers);
        self.page.dispose_all(disposers, &mut self.view);
        self.outgoing = None;
    }
}
