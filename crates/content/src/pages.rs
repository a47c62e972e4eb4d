//! Page state machines. Each page starts out loading and settles once its
//! requests complete.

use askama::Template;
use tracing::warn;

use crate::api::PlaceFetch;
use crate::currency::Currency;
use crate::filters::{self, JourneyFilter};
use crate::records::{ContentError, Journey, PLACE_NOT_FOUND, Place};
use crate::views::{JourneyCard, JourneysTemplate, PlaceDetail, PlaceState, PlaceTemplate};

pub const PLACE_LOAD_FAILED: &str = "Failed to load place";

#[derive(Debug, Clone, PartialEq)]
pub struct JourneysPage {
    /// `None` while loading.
    journeys: Option<Vec<Journey>>,
    filter: JourneyFilter,
    currency: Currency,
}

impl JourneysPage {
    pub fn new(currency: Currency) -> Self {
        Self {
            journeys: None,
            filter: JourneyFilter::All,
            currency,
        }
    }

    /// A failed request is logged and leaves an empty list.
    pub fn finish(&mut self, result: Result<Vec<Journey>, ContentError>) {
        let journeys = match result {
            Ok(all) => filters::regular_journeys(all),
            Err(err) => {
                warn!("journeys unavailable: {err}");
                Vec::new()
            }
        };
        self.journeys = Some(journeys);
    }

    pub fn is_loading(&self) -> bool {
        self.journeys.is_none()
    }

    pub fn filter(&self) -> JourneyFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: JourneyFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Journey> {
        match &self.journeys {
            Some(journeys) => filters::apply(self.filter, journeys),
            None => Vec::new(),
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        let cards = self
            .visible()
            .into_iter()
            .enumerate()
            .map(|(i, j)| JourneyCard::new(j, i, self.currency))
            .collect();
        JourneysTemplate::new(self.filter, self.is_loading(), cards).render()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacePage {
    Loading,
    Failed(String),
    Ready { place: Place, related: Vec<Journey> },
}

impl PlacePage {
    pub fn from_fetch(fetch: PlaceFetch) -> Self {
        match fetch.into_result() {
            Ok((place, journeys)) => {
                let related = filters::related_journeys(&place, &journeys)
                    .into_iter()
                    .cloned()
                    .collect();
                PlacePage::Ready { place, related }
            }
            Err(ContentError::NotFound(message)) => PlacePage::Failed(message),
            Err(ContentError::InvalidSlug(_)) => PlacePage::Failed(PLACE_NOT_FOUND.to_string()),
            Err(err) => {
                warn!("place unavailable: {err}");
                PlacePage::Failed(PLACE_LOAD_FAILED.to_string())
            }
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        let state = match self {
            PlacePage::Loading => PlaceState::Loading,
            PlacePage::Failed(message) => PlaceState::Failed(message.clone()),
            PlacePage::Ready { place, related } => {
                PlaceState::Ready(PlaceDetail::new(place, related))
            }
        };
        PlaceTemplate { state }.render()
    }
}
