//! Page views for the travel and art archive sites: API records, journey
//! filtering, navigation chrome and the markup they render to.

pub mod api;
pub mod currency;
pub mod filters;
pub mod nav;
pub mod pages;
pub mod records;
pub mod views;

pub use api::{ApiConfig, ContentSource, PlaceFetch, load_journeys, load_place};
pub use currency::Currency;
pub use filters::JourneyFilter;
pub use nav::{HeaderState, Site};
pub use pages::{JourneysPage, PlacePage};
pub use records::{ContentError, Journey, Place, PlaceResponse};
