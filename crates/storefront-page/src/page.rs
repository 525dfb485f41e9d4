use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use storefront_core::config::Settings;
use storefront_core::timer::earliest;
use storefront_core::traits::{CatalogView, ChromeView, ReviewTransport, ReviewView};
use storefront_core::types::{Catalog, ReviewPayload, SubmitAck};
use storefront_reviews::{ReviewPanel, SubmitOutcome};
use storefront_search::SearchPanel;

use crate::chrome::{reveal_allowed, Anchors, FaqAccordion, NavMenu, RevealAnimator};

/// Everything a page handler may touch.
pub trait PageView: CatalogView + ReviewView + ChromeView {}

impl<T: CatalogView + ReviewView + ChromeView> PageView for T {}

/// Elements present on the page. A component is installed only when the
/// elements it needs are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageHandles {
    pub search_input: Option<String>,
    pub search_results: Option<String>,
    pub review_form: Option<String>,
    pub reviews_list: Option<String>,
    pub hamburger: Option<String>,
    pub nav_menu: Option<String>,
    pub faq_items: usize,
    pub anchor_targets: Vec<String>,
    pub reveal_targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Search,
    Reviews,
    NavMenu,
    Anchors,
    Faq,
    Reveal,
}

/// Detaches one component's listeners when passed to [`Page::dispose`].
#[must_use = "dropping a Disposer leaves the component attached for the page lifetime"]
#[derive(Debug, PartialEq, Eq)]
pub struct Disposer(Component);

impl Disposer {
    pub fn component(&self) -> Component {
        self.0
    }
}

/// Host events, in the shape the web runner receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    SearchInput { value: String },
    ResultClicked { name: String },
    MenuToggled,
    NavLinkClicked,
    AnchorClicked { href: String },
    FaqClicked { index: usize },
    StarHovered { index: usize },
    StarsLeft,
    StarClicked { index: usize },
    FormSubmitted { display_name: String, review_text: String },
    Intersection { element: String, intersecting: bool },
}

/// What the host has to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventEffect {
    Handled,
    /// No installed component listens for this event.
    Ignored,
    /// The form validated; send this body and pass the response to
    /// [`Page::finish_review`].
    SendReview(ReviewPayload),
}

pub struct Page {
    search: Option<SearchPanel>,
    reviews: Option<ReviewPanel>,
    menu: Option<NavMenu>,
    anchors: Option<Anchors>,
    faq: Option<FaqAccordion>,
    reveal: Option<RevealAnimator>,
}

impl Page {
    /// Install every component whose elements are present.
    ///
    /// `path` is the current location path; it only decides whether the
    /// scroll-reveal observer is installed.
    pub fn init(
        handles: &PageHandles,
        settings: &Settings,
        catalog: Catalog,
        path: &str,
        view: &mut dyn PageView,
    ) -> (Self, Vec<Disposer>) {
        let mut disposers = Vec::new();

        let search = (handles.search_input.is_some() && handles.search_results.is_some()).then(|| {
            disposers.push(Disposer(Component::Search));
            SearchPanel::new(catalog, &settings.search)
        });
        let reviews = handles.review_form.is_some().then(|| {
            disposers.push(Disposer(Component::Reviews));
            ReviewPanel::new(&settings.reviews)
        });
        let menu = (handles.hamburger.is_some() && handles.nav_menu.is_some()).then(|| {
            disposers.push(Disposer(Component::NavMenu));
            NavMenu::default()
        });
        let anchors = (!handles.anchor_targets.is_empty()).then(|| {
            disposers.push(Disposer(Component::Anchors));
            Anchors::new(handles.anchor_targets.iter().cloned())
        });
        let faq = (handles.faq_items > 0).then(|| {
            disposers.push(Disposer(Component::Faq));
            FaqAccordion::new(handles.faq_items)
        });
        let reveal = if reveal_allowed(path, &settings.page.reveal_exempt_path) {
            disposers.push(Disposer(Component::Reveal));
            Some(RevealAnimator::install(handles.reveal_targets.iter().cloned(), view))
        } else {
            debug!(path, "scroll reveal skipped for this path");
            None
        };

        info!(
            components = ?disposers.iter().map(Disposer::component).collect::<Vec<_>>(),
            "page initialized"
        );
        (Self { search, reviews, menu, anchors, faq, reveal }, disposers)
    }

    pub fn search(&self) -> Option<&SearchPanel> {
        self.search.as_ref()
    }

    pub fn reviews(&self) -> Option<&ReviewPanel> {
        self.reviews.as_ref()
    }

    pub fn menu(&self) -> Option<&NavMenu> {
        self.menu.as_ref()
    }

    pub fn faq(&self) -> Option<&FaqAccordion> {
        self.faq.as_ref()
    }

    pub fn is_installed(&self, component: Component) -> bool {
        match component {
            Component::Search => self.search.is_some(),
            Component::Reviews => self.reviews.is_some(),
            Component::NavMenu => self.menu.is_some(),
            Component::Anchors => self.anchors.is_some(),
            Component::Faq => self.faq.is_some(),
            Component::Reveal => self.reveal.is_some(),
        }
    }

    /// Route one host event to the component that listens for it.
    pub fn dispatch(&mut self, event: PageEvent, now: Duration, view: &mut dyn PageView) -> EventEffect {
        let handled = match event {
            PageEvent::SearchInput { value } => match self.search.as_mut() {
                Some(search) => {
                    search.input(value, now);
                    true
                }
                None => false,
            },
            PageEvent::ResultClicked { name } => match self.search.as_mut() {
                Some(search) => {
                    search.activate(&name, now, view);
                    true
                }
                None => false,
            },
            PageEvent::MenuToggled => match self.menu.as_mut() {
                Some(menu) => {
                    menu.toggle(view);
                    true
                }
                None => false,
            },
            PageEvent::NavLinkClicked => match self.menu.as_mut() {
                Some(menu) => {
                    menu.close(view);
                    true
                }
                None => false,
            },
            PageEvent::AnchorClicked { href } => self.anchors.as_ref().is_some_and(|a| a.follow(&href, view)),
            PageEvent::FaqClicked { index } => match self.faq.as_mut() {
                Some(faq) => {
                    faq.toggle(index, view);
                    true
                }
                None => false,
            },
            PageEvent::StarHovered { index } => match self.reviews.as_mut() {
                Some(reviews) => {
                    reviews.hover_star(index, view);
                    true
                }
                None => false,
            },
            PageEvent::StarsLeft => match self.reviews.as_mut() {
                Some(reviews) => {
                    reviews.leave_stars(view);
                    true
                }
                None => false,
            },
            PageEvent::StarClicked { index } => match self.reviews.as_mut() {
                Some(reviews) => {
                    reviews.click_star(index, view);
                    true
                }
                None => false,
            },
            PageEvent::FormSubmitted { display_name, review_text } => {
                let Some(reviews) = self.reviews.as_mut() else {
                    return EventEffect::Ignored;
                };
                return match reviews.begin_submit(&display_name, &review_text, view) {
                    Ok(payload) => EventEffect::SendReview(payload),
                    Err(_) => EventEffect::Handled,
                };
            }
            PageEvent::Intersection { element, intersecting } => {
                self.reveal.as_ref().is_some_and(|r| r.on_intersection(&element, intersecting, view))
            }
        };
        if handled { EventEffect::Handled } else { EventEffect::Ignored }
    }

    /// Dispatch and, if a review must be sent, send it through `transport`
    /// and apply the response before returning.
    pub fn dispatch_with(
        &mut self,
        event: PageEvent,
        now: Duration,
        view: &mut dyn PageView,
        transport: &dyn ReviewTransport,
    ) -> EventEffect {
        match self.dispatch(event, now, view) {
            EventEffect::SendReview(payload) => {
                let response = transport.submit(&payload);
                self.finish_review(response, now, view);
                EventEffect::Handled
            }
            other => other,
        }
    }

    /// Apply the response to a request started by `EventEffect::SendReview`.
    pub fn finish_review(
        &mut self,
        response: anyhow::Result<SubmitAck>,
        now: Duration,
        view: &mut dyn PageView,
    ) -> Option<SubmitOutcome> {
        self.reviews.as_mut().map(|r| r.finish_submit(response, now, view))
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Duration, view: &mut dyn PageView) {
        if let Some(search) = self.search.as_mut() {
            search.tick(now, view);
        }
        if let Some(reviews) = self.reviews.as_mut() {
            reviews.tick(now, view);
        }
    }

    /// When the host should call [`Page::tick`] next, if anything is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        earliest([
            self.search.as_ref().and_then(SearchPanel::next_deadline),
            self.reviews.as_ref().and_then(ReviewPanel::next_deadline),
        ])
    }

    /// Detach a component: its pending timers are cancelled and later events
    /// for it are ignored.
    pub fn dispose(&mut self, disposer: Disposer, view: &mut dyn PageView) {
        match disposer.0 {
            Component::Search => {
                if let Some(mut search) = self.search.take() {
                    search.dispose(view);
                }
            }
            Component::Reviews => {
                if let Some(mut reviews) = self.reviews.take() {
                    reviews.dispose(view);
                }
            }
            Component::NavMenu => self.menu = None,
            Component::Anchors => self.anchors = None,
            Component::Faq => self.faq = None,
            Component::Reveal => {
                if let Some(mut reveal) = self.reveal.take() {
                    reveal.disconnect(view);
                }
            }
        }
        debug!(component = ?disposer.0, "component disposed");
    }

    pub fn dispose_all(&mut self, disposers: Vec<Disposer>, view: &mut dyn PageView) {
        for disposer in disposers {
            self.dispose(disposer, view);
        }
    }
}
