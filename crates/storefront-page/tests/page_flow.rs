use std::cell::Cell;
use std::time::Duration;

use pretty_assertions::assert_eq;

use storefront_core::config::Settings;
use storefront_core::traits::ReviewTransport;
use storefront_core::types::{Catalog, MatchSummary, ProductId, ReviewPayload, SubmitAck};
use storefront_page::{Component, EventEffect, MemoryPage, Page, PageEvent, PageHandles, ScrollTarget};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let home = catalog.push_category("Home");
    let office = catalog.push_category("Office");
    catalog.push_product(home, "Red Mug", Some("Stoneware".into())).unwrap();
    catalog.push_product(home, "Blue Mug", None).unwrap();
    catalog.push_product(office, "Notebook", Some("A5, dotted".into())).unwrap();
    catalog
}

fn full_handles() -> PageHandles {
    PageHandles {
        search_input: Some("searchInput".into()),
        search_results: Some("searchResults".into()),
        review_form: Some("reviewForm".into()),
        reviews_list: Some("reviews".into()),
        hamburger: Some("hamburger".into()),
        nav_menu: Some("navMenu".into()),
        faq_items: 3,
        anchor_targets: vec!["faq".into(), "contact".into()],
        reveal_targets: vec!["hero".into(), "features".into()],
    }
}

struct CountingTransport {
    calls: Cell<usize>,
}

impl ReviewTransport for CountingTransport {
    fn submit(&self, _payload: &ReviewPayload) -> anyhow::Result<SubmitAck> {
        self.calls.set(self.calls.get() + 1);
        Ok(SubmitAck::parse(r#"{"success": true}"#)?)
    }
}

#[test]
fn init_installs_only_components_with_handles() {
    let mut view = MemoryPage::new();
    let handles = PageHandles { review_form: Some("reviewForm".into()), ..PageHandles::default() };
    let (page, disposers) = Page::init(&handles, &Settings::default(), catalog(), "/reviews", &mut view);

    let installed: Vec<_> = disposers.iter().map(|d| d.component()).collect();
    assert_eq!(installed, vec![Component::Reviews, Component::Reveal]);
    assert!(!page.is_installed(Component::Search));
}

#[test]
fn products_path_skips_reveal_observer() {
    let mut view = MemoryPage::new();
    let (page, _disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/products", &mut view);
    assert!(!page.is_installed(Component::Reveal));
    assert!(view.revealed.is_empty());
}

#[test]
fn typing_filters_after_debounce_and_click_scrolls() {
    let mut view = MemoryPage::new();
    let (mut page, _disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/products", &mut view);

    for (t, value) in [(0, "m"), (80, "mu"), (160, "mug")] {
        let effect = page.dispatch(PageEvent::SearchInput { value: value.into() }, ms(t), &mut view);
        assert_eq!(effect, EventEffect::Handled);
    }
    assert_eq!(page.next_deadline(), Some(ms(460)));
    page.tick(ms(460), &mut view);

    assert!(view.is_product_visible(ProductId(0)));
    assert!(view.is_product_visible(ProductId(1)));
    assert!(!view.is_product_visible(ProductId(2)));
    assert!(!view.is_category_shown(storefront_core::types::CategoryId(1)));
    assert_eq!(view.summary.message().as_deref(), Some("Found 2 products:"));

    let name = view.summary.entries()[0].name.clone();
    page.dispatch(PageEvent::ResultClicked { name }, ms(500), &mut view);
    assert_eq!(view.viewport(), Some(&ScrollTarget::Product(ProductId(0))));
    assert!(view.highlighted.contains(&ProductId(0)));

    page.tick(ms(3_500), &mut view);
    assert!(view.highlighted.is_empty());

    page.dispatch(PageEvent::SearchInput { value: "  ".into() }, ms(4_000), &mut view);
    page.tick(ms(4_300), &mut view);
    assert_eq!(view.summary, MatchSummary::Cleared);
    assert!(view.hidden_products.is_empty() && view.hidden_categories.is_empty());
}

#[test]
fn review_submission_round_trip() {
    let mut view = MemoryPage::new();
    let (mut page, _disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/reviews", &mut view);
    let transport = CountingTransport { calls: Cell::new(0) };

    let submit = PageEvent::FormSubmitted { display_name: "Ana".into(), review_text: "Great".into() };
    page.dispatch_with(submit.clone(), ms(0), &mut view, &transport);
    assert_eq!(transport.calls.get(), 0);
    assert_eq!(view.last_alert(), Some(storefront_reviews::MISSING_FIELDS_ALERT));

    page.dispatch(PageEvent::StarHovered { index: 4 }, ms(10), &mut view);
    assert_eq!((view.stars_lit, view.stars_selected), (5, 0));
    page.dispatch(PageEvent::StarClicked { index: 2 }, ms(20), &mut view);
    page.dispatch(PageEvent::StarsLeft, ms(30), &mut view);
    assert_eq!((view.stars_lit, view.stars_selected), (3, 3));

    view.display_name = "Ana".into();
    view.review_text = "Great".into();
    page.dispatch_with(submit, ms(40), &mut view, &transport);
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(view.reviews.len(), 1);
    assert_eq!(view.reviews[0].display_name, "Ana");
    assert!(view.display_name.is_empty());
    assert_eq!(view.last_alert(), Some(storefront_reviews::THANK_YOU_ALERT));

    page.tick(ms(140), &mut view);
    assert!(view.visible_reviews.contains(&view.reviews[0].id));
}

#[test]
fn two_phase_submission_for_async_hosts() {
    let mut view = MemoryPage::new();
    let (mut page, _disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/", &mut view);
    page.dispatch(PageEvent::StarClicked { index: 0 }, ms(0), &mut view);

    let effect = page.dispatch(
        PageEvent::FormSubmitted { display_name: "Bo".into(), review_text: "Fine".into() },
        ms(5),
        &mut view,
    );
    let EventEffect::SendReview(payload) = effect else {
        panic!("expected a request, got {effect:?}");
    };
    assert_eq!(payload.rating.get(), 1);
    assert!(page.reviews().is_some_and(|r| r.is_in_flight()));

    page.finish_review(Err(anyhow::anyhow!("offline")), ms(50), &mut view);
    assert_eq!(view.last_alert(), Some(storefront_reviews::SUBMIT_FAILED_ALERT));
    assert!(view.reviews.is_empty());
}

#[test]
fn chrome_menu_anchor_faq_and_reveal() {
    let mut view = MemoryPage::new();
    let (mut page, _disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/", &mut view);
    assert_eq!(view.revealed.get("hero"), Some(&false));

    page.dispatch(PageEvent::MenuToggled, ms(0), &mut view);
    assert!(view.menu_open);
    page.dispatch(PageEvent::NavLinkClicked, ms(1), &mut view);
    assert!(!view.menu_open);

    assert_eq!(page.dispatch(PageEvent::AnchorClicked { href: "#faq".into() }, ms(2), &mut view), EventEffect::Handled);
    assert_eq!(view.viewport(), Some(&ScrollTarget::Anchor("faq".into())));
    assert_eq!(page.dispatch(PageEvent::AnchorClicked { href: "#gone".into() }, ms(3), &mut view), EventEffect::Ignored);

    page.dispatch(PageEvent::FaqClicked { index: 1 }, ms(4), &mut view);
    page.dispatch(PageEvent::FaqClicked { index: 2 }, ms(5), &mut view);
    page.dispatch(PageEvent::FaqClicked { index: 1 }, ms(6), &mut view);
    assert_eq!(view.open_faq.iter().copied().collect::<Vec<_>>(), vec![2]);

    page.dispatch(PageEvent::Intersection { element: "hero".into(), intersecting: true }, ms(7), &mut view);
    assert_eq!(view.revealed.get("hero"), Some(&true));
    page.dispatch(PageEvent::Intersection { element: "hero".into(), intersecting: false }, ms(8), &mut view);
    assert_eq!(view.revealed.get("hero"), Some(&false));
    let effect = page.dispatch(PageEvent::Intersection { element: "footer".into(), intersecting: true }, ms(9), &mut view);
    assert_eq!(effect, EventEffect::Ignored);
}

#[test]
fn disposed_components_stop_listening() {
    let mut view = MemoryPage::new();
    let (mut page, disposers) = Page::init(&full_handles(), &Settings::default(), catalog(), "/", &mut view);

    page.dispatch(PageEvent::SearchInput { value: "note".into() }, ms(0), &mut view);
    page.dispatch(PageEvent::ResultClicked { name: "Notebook".into() }, ms(0), &mut view);
    page.dispose_all(disposers, &mut view);

    assert!(view.highlighted.is_empty());
    assert_eq!(view.revealed.get("features"), Some(&true));
    assert_eq!(page.next_deadline(), None);
    assert_eq!(page.dispatch(PageEvent::MenuToggled, ms(10), &mut view), EventEffect::Ignored);
    page.tick(ms(10_000), &mut view);
    assert_eq!(view.summary, MatchSummary::Cleared);
}

#[test]
fn events_parse_from_host_json() {
    let event: PageEvent = serde_json::from_str(r#"{"type": "search_input", "value": "mug"}"#).unwrap();
    assert_eq!(event, PageEvent::SearchInput { value: "mug".into() });
    let event: PageEvent = serde_json::from_str(
        r#"{"type": "form_submitted", "display_name": "Ana", "review_text": "Nice"}"#,
    )
    .unwrap();
    assert!(matches!(event, PageEvent::FormSubmitted { .. }));
    let handles: PageHandles = serde_json::from_str(r#"{"search_input": "q", "faq_items": 2}"#).unwrap();
    assert_eq!(handles.faq_items, 2);
    assert!(handles.review_form.is_none());
}
