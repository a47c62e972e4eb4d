//! Content API routes and the transport seam.

use futures_util::future::{self, LocalBoxFuture};
use serde::Deserialize;
use tracing::debug;

use crate::records::{ContentError, Journey, Place, PlaceResponse, decode_journeys};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix for API routes; empty means same origin.
    pub base_url: String,
}

impl ApiConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn journeys_url(&self) -> String {
        format!("{}/api/journeys", self.base())
    }

    pub fn place_url(&self, slug: &str) -> Result<String, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        Ok(format!("{}/api/places/{slug}", self.base()))
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Fetches a URL and yields the response body.
pub trait ContentSource {
    fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ContentError>>;
}

pub async fn load_journeys<S>(source: &S, api: &ApiConfig) -> Result<Vec<Journey>, ContentError>
where
    S: ContentSource + ?Sized,
{
    let body = source.get_text(&api.journeys_url()).await?;
    let journeys = decode_journeys(&body)?;
    debug!(count = journeys.len(), "journeys loaded");
    Ok(journeys)
}

/// Outcome of the two concurrent requests behind a place page.
pub struct PlaceFetch {
    pub place: Result<PlaceResponse, ContentError>,
    pub journeys: Result<Vec<Journey>, ContentError>,
}

pub async fn load_place<S>(source: &S, api: &ApiConfig, slug: &str) -> PlaceFetch
where
    S: ContentSource + ?Sized,
{
    let place = async {
        let url = api.place_url(slug)?;
        let body = source.get_text(&url).await?;
        PlaceResponse::from_json_str(&body)
    };
    let (place, journeys) = future::join(place, load_journeys(source, api)).await;
    PlaceFetch { place, journeys }
}

impl PlaceFetch {
    /// Transport failures on either request take precedence.
    pub fn into_result(self) -> Result<(Place, Vec<Journey>), ContentError> {
        let response = self.place?;
        let journeys = self.journeys?;
        Ok((response.into_result()?, journeys))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use futures_util::FutureExt;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct FakeApi {
        pub routes: HashMap<String, Result<String, ContentError>>,
        pub requested: RefCell<Vec<String>>,
    }

    impl FakeApi {
        pub fn route(mut self, url: &str, body: &str) -> Self {
            self.routes.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub fn failing(mut self, url: &str) -> Self {
            self.routes
                .insert(url.to_string(), Err(ContentError::Http("offline".to_string())));
            self
        }
    }

    impl ContentSource for FakeApi {
        fn get_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, ContentError>> {
            self.requested.borrow_mut().push(url.to_string());
            let outcome = self
                .routes
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(ContentError::Http(format!("404 {url}"))));
            async move {
                tokio::task::yield_now().await;
                outcome
            }
            .boxed_local()
        }
    }
}
