use std::time::Duration;
use tracing::{info, warn};

use storefront_core::config::ReviewSettings;
use storefront_core::error::{Error, Result};
use storefront_core::timer::TimerSet;
use storefront_core::traits::{ReviewTransport, ReviewView};
use storefront_core::types::{ReviewCard, ReviewPayload, SubmitAck};

use crate::rating::StarRating;
use crate::{card, form};
use crate::{IN_FLIGHT_ALERT, MISSING_FIELDS_ALERT, SUBMIT_FAILED_ALERT, THANK_YOU_ALERT};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required field was missing; nothing was sent.
    Invalid,
    /// A previous submission has not returned yet; nothing was sent.
    Busy,
    /// The server acknowledged and the card was added.
    Accepted(ReviewCard),
    /// Transport error or a response other than `{success: true}`.
    Failed,
}

/// Review form state: the star picker, the request in flight, and card fade-ins.
///
/// Submission is split in two so hosts with asynchronous I/O can perform the
/// request themselves: [`ReviewPanel::begin_submit`] validates and yields the
/// body, [`ReviewPanel::finish_submit`] consumes the response.
pub struct ReviewPanel {
    stars: StarRating,
    in_flight: Option<ReviewPayload>,
    fade_in: TimerSet<u64, ()>,
    fade_delay: Duration,
    next_card_id: u64,
}

impl ReviewPanel {
    pub fn new(settings: &ReviewSettings) -> Self {
        Self {
            stars: StarRating::new(),
            in_flight: None,
            fade_in: TimerSet::new(),
            fade_delay: settings.card_fade_in(),
            next_card_id: 0,
        }
    }

    pub fn stars(&self) -> &StarRating {
        &self.stars
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn hover_star<V: ReviewView + ?Sized>(&mut self, index: usize, view: &mut V) {
        self.stars.hover(index);
        self.draw_stars(view);
    }

    pub fn leave_stars<V: ReviewView + ?Sized>(&mut self, view: &mut V) {
        self.stars.leave();
        self.draw_stars(view);
    }

    pub fn click_star<V: ReviewView + ?Sized>(&mut self, index: usize, view: &mut V) {
        self.stars.click(index);
        self.draw_stars(view);
    }

    /// Validate the form and mark a request as in flight.
    ///
    /// On error the matching alert has already been shown and no state changed.
    pub fn begin_submit<V: ReviewView + ?Sized>(
        &mut self,
        display_name: &str,
        review_text: &str,
        view: &mut V,
    ) -> Result<ReviewPayload> {
        if self.in_flight.is_some() {
            view.alert(IN_FLIGHT_ALERT);
            return Err(Error::SubmissionInFlight);
        }
        let payload = form::validate(display_name, self.stars.selected(), review_text).inspect_err(|e| {
            info!(error = %e, "review form incomplete");
            view.alert(MISSING_FIELDS_ALERT);
        })?;
        self.in_flight = Some(payload.clone());
        Ok(payload)
    }

    /// Consume the response to the request started by `begin_submit`.
    pub fn finish_submit<V: ReviewView + ?Sized>(
        &mut self,
        response: anyhow::Result<SubmitAck>,
        now: Duration,
        view: &mut V,
    ) -> SubmitOutcome {
        let Some(payload) = self.in_flight.take() else {
            warn!("review response arrived with no submission in flight");
            return SubmitOutcome::Failed;
        };
        match response {
            Ok(ack) if ack.success => {
                let card = card::from_payload(self.next_card_id, &payload);
                self.next_card_id += 1;
                view.prepend_review(&card);
                self.fade_in.schedule(card.id, now, self.fade_delay, ());
                view.reset_form();
                self.stars.reset();
                self.draw_stars(view);
                view.alert(THANK_YOU_ALERT);
                info!(card = card.id, rating = %card.rating, "review accepted");
                SubmitOutcome::Accepted(card)
            }
            Ok(_) => {
                warn!("review endpoint answered success=false");
                view.alert(SUBMIT_FAILED_ALERT);
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!(error = %e, "review submission failed");
                view.alert(SUBMIT_FAILED_ALERT);
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, send through `transport`, and apply the response.
    pub fn submit<V: ReviewView + ?Sized>(
        &mut self,
        display_name: &str,
        review_text: &str,
        transport: &dyn ReviewTransport,
        now: Duration,
        view: &mut V,
    ) -> SubmitOutcome {
        let payload = match self.begin_submit(display_name, review_text, view) {
            Ok(payload) => payload,
            Err(Error::SubmissionInFlight) => return SubmitOutcome::Busy,
            Err(_) => return SubmitOutcome::Invalid,
        };
        let response = transport.submit(&payload);
        self.finish_submit(response, now, view)
    }

    pub fn tick<V: ReviewView + ?Sized>(&mut self, now: Duration, view: &mut V) {
        for (id, ()) in self.fade_in.poll_due(now) {
            view.reveal_review(id);
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.fade_in.next_due()
    }

    /// Show pending cards immediately and forget any request in flight.
    pub fn dispose<V: ReviewView + ?Sized>(&mut self, view: &mut V) {
        for (id, ()) in self.fade_in.drain() {
            view.reveal_review(id);
        }
        self.in_flight = None;
    }

    fn draw_stars<V: ReviewView + ?Sized>(&self, view: &mut V) {
        view.render_stars(self.stars.lit(), self.stars.selected_count());
    }
}
