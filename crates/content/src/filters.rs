use crate::records::{Journey, Place};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JourneyFilter {
    #[default]
    All,
    Desert,
    Mountains,
    Culture,
    Coast,
}

impl JourneyFilter {
    pub const ALL: [JourneyFilter; 5] = [
        JourneyFilter::All,
        JourneyFilter::Desert,
        JourneyFilter::Mountains,
        JourneyFilter::Culture,
        JourneyFilter::Coast,
    ];

    pub fn id(self) -> &'static str {
        match self {
            JourneyFilter::All => "all",
            JourneyFilter::Desert => "desert",
            JourneyFilter::Mountains => "mountains",
            JourneyFilter::Culture => "culture",
            JourneyFilter::Coast => "coast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JourneyFilter::All => "All Journeys",
            JourneyFilter::Desert => "Desert",
            JourneyFilter::Mountains => "Mountains",
            JourneyFilter::Culture => "Culture",
            JourneyFilter::Coast => "Coast",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Case-insensitive substring match on the journey's focus.
    pub fn matches(self, journey: &Journey) -> bool {
        match self {
            JourneyFilter::All => true,
            other => journey
                .focus
                .as_deref()
                .is_some_and(|focus| focus.to_lowercase().contains(other.id())),
        }
    }
}

/// Everything except epic journeys, which have their own listing.
pub fn regular_journeys(journeys: Vec<Journey>) -> Vec<Journey> {
    journeys.into_iter().filter(|j| !j.is_epic()).collect()
}

pub fn apply(filter: JourneyFilter, journeys: &[Journey]) -> Vec<&Journey> {
    journeys.iter().filter(|j| filter.matches(j)).collect()
}

/// Non-epic journeys passing through the place's destination.
pub fn related_journeys<'a>(place: &Place, journeys: &'a [Journey]) -> Vec<&'a Journey> {
    let destination = place.destination().trim().to_lowercase();
    if destination.is_empty() {
        return Vec::new();
    }
    journeys
        .iter()
        .filter(|j| !j.is_epic())
        .filter(|j| {
            j.destinations
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&destination))
        })
        .collect()
}

/// Split on blank lines; empty paragraphs are dropped.
pub fn body_paragraphs(body: &str) -> Vec<&str> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
