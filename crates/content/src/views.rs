//! Markup for pages and navigation. All text is HTML-escaped on output.

use askama::Template;

use crate::currency::Currency;
use crate::filters::{JourneyFilter, body_paragraphs};
use crate::nav::{ArchiveFooter, FooterColumn, HeaderState, NavLink, Site};
use crate::records::{Journey, Place, present};

pub struct FilterButton {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub struct JourneyCard {
    pub href: String,
    pub title: String,
    pub image: String,
    pub days: String,
    pub focus: String,
    pub description: String,
    pub destinations: String,
    pub price: String,
    pub reversed: bool,
}

impl JourneyCard {
    pub fn new(journey: &Journey, index: usize, currency: Currency) -> Self {
        Self {
            href: journey.href(),
            title: journey.title.clone(),
            image: text(&journey.hero_image),
            days: journey.days().map(|d| format!("{d} Days")).unwrap_or_default(),
            focus: text(&journey.focus),
            description: text(&journey.description),
            destinations: text(&journey.destinations),
            price: journey
                .listed_price()
                .map(|p| currency.format(p))
                .unwrap_or_default(),
            reversed: index % 2 == 1,
        }
    }

    /// Carousel variant: short description preferred, no price.
    pub fn related(journey: &Journey) -> Self {
        Self {
            description: journey.summary().to_string(),
            price: String::new(),
            ..Self::new(journey, 0, Currency::default())
        }
    }
}

fn text(field: &Option<String>) -> String {
    present(field).unwrap_or_default().to_string()
}

#[derive(Template)]
#[template(path = "journeys.html")]
pub struct JourneysTemplate {
    pub filters: Vec<FilterButton>,
    pub loading: bool,
    pub cards: Vec<JourneyCard>,
}

impl JourneysTemplate {
    pub fn new(active: JourneyFilter, loading: bool, cards: Vec<JourneyCard>) -> Self {
        let filters = JourneyFilter::ALL
            .into_iter()
            .map(|f| FilterButton {
                id: f.id(),
                label: f.label(),
                active: f == active,
            })
            .collect();
        Self {
            filters,
            loading,
            cards,
        }
    }
}

pub struct PlaceFact {
    pub label: &'static str,
    pub value: String,
}

pub struct PlaceDetail {
    pub title: String,
    pub destination: String,
    pub destination_title: String,
    pub image: String,
    pub caption: String,
    pub excerpt: String,
    pub paragraphs: Vec<String>,
    pub facts: Vec<PlaceFact>,
    pub notes: String,
    pub sources: String,
    pub related: Vec<JourneyCard>,
}

impl PlaceDetail {
    pub fn new(place: &Place, related: &[Journey]) -> Self {
        let facts = [
            ("Address", &place.address),
            ("Hours", &place.opening_hours),
            ("Entry Fee", &place.fees),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            present(value).map(|v| PlaceFact {
                label,
                value: v.to_string(),
            })
        })
        .collect();

        Self {
            title: place.title.clone(),
            destination: place.destination().to_string(),
            destination_title: capitalize(place.destination()),
            image: text(&place.hero_image),
            caption: text(&place.hero_caption),
            excerpt: text(&place.excerpt),
            paragraphs: body_paragraphs(place.body.as_deref().unwrap_or_default())
                .into_iter()
                .map(str::to_string)
                .collect(),
            facts,
            notes: text(&place.notes),
            sources: text(&place.sources),
            related: related.iter().map(JourneyCard::related).collect(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub enum PlaceState {
    Loading,
    Failed(String),
    Ready(PlaceDetail),
}

#[derive(Template)]
#[template(path = "place.html")]
pub struct PlaceTemplate {
    pub state: PlaceState,
}

#[derive(Template)]
#[template(path = "header.html")]
pub struct HeaderTemplate {
    pub brand: &'static str,
    pub links: &'static [NavLink],
    pub action: NavLink,
    pub scrolled: bool,
    pub menu_open: bool,
}

impl HeaderTemplate {
    pub fn new(site: Site, state: HeaderState) -> Self {
        Self {
            brand: site.brand(),
            links: site.links(),
            action: site.action(),
            scrolled: state.is_scrolled(),
            menu_open: state.is_menu_open(),
        }
    }
}

#[derive(Template)]
#[template(path = "archive_footer.html")]
pub struct ArchiveFooterTemplate {
    pub brand: &'static str,
    pub blurb: &'static str,
    pub columns: &'static [FooterColumn],
    pub copyright: &'static str,
    pub motto: &'static str,
}

impl Default for ArchiveFooterTemplate {
    fn default() -> Self {
        Self {
            brand: Site::ArtArchive.brand(),
            blurb: ArchiveFooter::BLURB,
            columns: ArchiveFooter::COLUMNS,
            copyright: ArchiveFooter::COPYRIGHT,
            motto: ArchiveFooter::MOTTO,
        }
    }
}
