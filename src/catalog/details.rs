//! Per-title detail retrieval and resilient response parsing.
//!
//! The details endpoint replies with a map keyed by the requested id, each
//! value carrying a `success` flag and an optional data object. "No data"
//! (absent key, `success: false`, missing data object) is a normal outcome
//! surfaced as `None`, never an error. Individual fields degrade
//! independently: a malformed array or date costs that field, not the
//! whole title.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::sanitise::sanitise;
use crate::types::EnrichedTitle;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Date formats the storefront uses for `release_date.date`, most common
/// first. Chrono's `%b` accepts full month names as well as abbreviated.
const RELEASE_DATE_FORMATS: &[&str] = &["%b %d, %Y", "%d %b, %Y", "%Y-%m-%d"];

/// Client for the storefront's per-title details endpoint.
pub struct DetailsClient {
    client: reqwest::Client,
    config: ScoutConfig,
}

impl DetailsClient {
    /// Create a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        Ok(Self {
            client: http::build_client(config)?,
            config: config.clone(),
        })
    }

    /// Create a client reusing an existing HTTP connection pool.
    pub fn with_client(client: reqwest::Client, config: &ScoutConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Fetch full details for one title.
    ///
    /// Returns `None` when the storefront has no data for the id, and also
    /// when the fetch or top-level parse fails; failures are logged. The
    /// caller cannot distinguish "not found" from "fetch failed" except
    /// via logs.
    pub async fn fetch(&self, external_id: &str) -> Option<EnrichedTitle> {
        match self.try_fetch(external_id).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(external_id, error = %e, "details fetch failed");
                None
            }
        }
    }

    async fn try_fetch(&self, external_id: &str) -> Result<Option<EnrichedTitle>, ScoutError> {
        let url = format!(
            "{}/api/appdetails",
            self.config.store_base_url.trim_end_matches('/')
        );
        tracing::trace!(%url, external_id, "details fetch");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("appids", external_id),
                ("cc", self.config.country_code.as_str()),
                ("l", self.config.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("details request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("details HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("details response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "details response received");

        parse_details(&body, external_id, &self.config.store_page_url(external_id))
    }
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<AppDetails>,
}

/// The per-title data object, with every field optional.
///
/// Structured fields go through [`lenient`] so one malformed array or
/// object degrades to `None` instead of failing the title.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppDetails {
    name: Option<String>,
    is_free: bool,
    detailed_description: Option<String>,
    short_description: Option<String>,
    about_the_game: Option<String>,
    header_image: Option<String>,
    background: Option<String>,
    background_raw: Option<String>,
    #[serde(deserialize_with = "lenient")]
    screenshots: Option<Vec<Screenshot>>,
    #[serde(deserialize_with = "lenient")]
    developers: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    publishers: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    genres: Option<Vec<Descriptor>>,
    #[serde(deserialize_with = "lenient")]
    categories: Option<Vec<Descriptor>>,
    #[serde(deserialize_with = "lenient")]
    release_date: Option<ReleaseDate>,
    #[serde(deserialize_with = "lenient")]
    price_overview: Option<PriceOverview>,
}

#[derive(Debug, Deserialize)]
struct Screenshot {
    path_full: Option<String>,
}

/// Genres and categories share this shape; their `id` types differ on the
/// wire (string vs number) and are ignored.
#[derive(Debug, Deserialize)]
struct Descriptor {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDate {
    #[serde(default)]
    coming_soon: bool,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceOverview {
    final_formatted: Option<String>,
}

/// Deserialize a field into `Some(T)` if it matches the expected shape,
/// `None` otherwise, consuming the raw value either way.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse a details response body for `external_id`.
///
/// Returns `Ok(None)` for the normal "no data" outcomes and `Err` only
/// when the top-level body is not the expected id-keyed map.
///
/// Extracted as a separate function for testability with mock JSON.
pub(crate) fn parse_details(
    body: &str,
    external_id: &str,
    store_url: &str,
) -> Result<Option<EnrichedTitle>, ScoutError> {
    let mut map: HashMap<String, DetailsEnvelope> = serde_json::from_str(body)
        .map_err(|e| ScoutError::Parse(format!("details response is not valid JSON: {e}")))?;

    let Some(envelope) = map.remove(external_id) else {
        tracing::debug!(external_id, "id absent from details response");
        return Ok(None);
    };
    if !envelope.success {
        tracing::debug!(external_id, "details response reports no data");
        return Ok(None);
    }
    let Some(data) = envelope.data else {
        tracing::debug!(external_id, "details response has no data object");
        return Ok(None);
    };

    Ok(Some(build_title(data, external_id, store_url)))
}

fn build_title(data: AppDetails, external_id: &str, store_url: &str) -> EnrichedTitle {
    let short_description = data
        .short_description
        .as_deref()
        .map(sanitise)
        .unwrap_or_default();

    // First non-empty wins: about-the-game body, full description, short.
    let description = [
        data.about_the_game.as_deref(),
        data.detailed_description.as_deref(),
        data.short_description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|text| !text.trim().is_empty())
    .map(sanitise)
    .unwrap_or_default();

    let release_date = data
        .release_date
        .filter(|rd| !rd.coming_soon)
        .and_then(|rd| rd.date)
        .and_then(|date| parse_release_date(&date));

    let price_display = match data.price_overview.and_then(|p| p.final_formatted) {
        Some(price) => Some(price),
        None if data.is_free => Some("Free".to_owned()),
        None => None,
    };

    let screenshots = data
        .screenshots
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| s.path_full)
        .collect();

    let genres = descriptions(data.genres);
    let categories = descriptions(data.categories);

    EnrichedTitle {
        external_id: external_id.to_owned(),
        name: data.name.unwrap_or_else(|| external_id.to_owned()),
        store_url: store_url.to_owned(),
        short_description,
        description,
        header_image: data.header_image,
        background_image: data.background.or(data.background_raw),
        screenshots,
        developers: data.developers.unwrap_or_default(),
        publishers: data.publishers.unwrap_or_default(),
        genres,
        categories,
        release_date,
        price_display,
        is_free: data.is_free,
    }
}

fn descriptions(list: Option<Vec<Descriptor>>) -> Vec<String> {
    list.unwrap_or_default()
        .into_iter()
        .filter_map(|d| d.description)
        .filter(|d| !d.trim().is_empty())
        .collect()
}

/// Parse the storefront's human-oriented date strings.
///
/// Unparseable values ("Coming soon", "Q1 2026", bare years) yield `None`.
pub(crate) fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    RELEASE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DETAILS_JSON: &str = r#"{
        "70": {
            "success": true,
            "data": {
                "type": "game",
                "name": "Half-Life",
                "steam_appid": 70,
                "is_free": false,
                "detailed_description": "<p>Named Game of the Year by over 50 publications.</p>",
                "short_description": "Valve's debut title blends action &amp; adventure.",
                "about_the_game": "<p>Dr. Gordon&nbsp;Freeman races through <i>Black Mesa</i>.</p>",
                "header_image": "https://cdn.example.com/70/header.jpg",
                "background": "https://cdn.example.com/70/page_bg.jpg",
                "screenshots": [
                    {"id": 0, "path_thumbnail": "https://cdn.example.com/70/ss_1_thumb.jpg", "path_full": "https://cdn.example.com/70/ss_1.jpg"},
                    {"id": 1, "path_full": "https://cdn.example.com/70/ss_2.jpg"}
                ],
                "developers": ["Valve"],
                "publishers": ["Valve"],
                "genres": [{"id": "1", "description": "Action"}],
                "categories": [{"id": 2, "description": "Single-player"}, {"id": 22, "description": "Steam Achievements"}],
                "release_date": {"coming_soon": false, "date": "Nov 8, 1998"},
                "price_overview": {"currency": "USD", "initial": 999, "final": 999, "discount_percent": 0, "final_formatted": "$9.99"}
            }
        }
    }"#;

    const STORE_URL: &str = "https://store.steampowered.com/app/70";

    #[test]
    fn parse_full_payload() {
        let title = parse_details(MOCK_DETAILS_JSON, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");

        assert_eq!(title.external_id, "70");
        assert_eq!(title.name, "Half-Life");
        assert_eq!(title.store_url, STORE_URL);
        assert_eq!(
            title.description,
            "Dr. Gordon Freeman races through Black Mesa."
        );
        assert_eq!(
            title.short_description,
            "Valve's debut title blends action & adventure."
        );
        assert_eq!(
            title.header_image.as_deref(),
            Some("https://cdn.example.com/70/header.jpg")
        );
        assert_eq!(
            title.background_image.as_deref(),
            Some("https://cdn.example.com/70/page_bg.jpg")
        );
        assert_eq!(
            title.screenshots,
            [
                "https://cdn.example.com/70/ss_1.jpg",
                "https://cdn.example.com/70/ss_2.jpg"
            ]
        );
        assert_eq!(title.developers, ["Valve"]);
        assert_eq!(title.publishers, ["Valve"]);
        assert_eq!(title.genres, ["Action"]);
        assert_eq!(title.categories, ["Single-player", "Steam Achievements"]);
        assert_eq!(title.release_date, NaiveDate::from_ymd_opt(1998, 11, 8));
        assert_eq!(title.price_display.as_deref(), Some("$9.99"));
        assert!(!title.is_free);
    }

    #[test]
    fn parse_success_false_returns_none() {
        let body = r#"{"70": {"success": false}}"#;
        let title = parse_details(body, "70", STORE_URL).expect("should parse");
        assert!(title.is_none());
    }

    #[test]
    fn parse_missing_id_key_returns_none() {
        let body = r#"{"220": {"success": true, "data": {"name": "Half-Life 2"}}}"#;
        let title = parse_details(body, "70", STORE_URL).expect("should parse");
        assert!(title.is_none());
    }

    #[test]
    fn parse_missing_data_returns_none() {
        let body = r#"{"70": {"success": true}}"#;
        let title = parse_details(body, "70", STORE_URL).expect("should parse");
        assert!(title.is_none());
    }

    #[test]
    fn parse_malformed_body_is_an_error() {
        let result = parse_details("<html>rate limited</html>", "70", STORE_URL);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not valid JSON"));
    }

    #[test]
    fn coming_soon_never_populates_release_date() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life 3",
            "release_date": {"coming_soon": true, "date": "Nov 8, 1998"}
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert!(title.release_date.is_none());
    }

    #[test]
    fn unparseable_date_is_absent() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "release_date": {"coming_soon": false, "date": "To be announced"}
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert!(title.release_date.is_none());
    }

    #[test]
    fn free_title_without_price_overview_shows_free() {
        let body = r#"{"70": {"success": true, "data": {"name": "Dota 2", "is_free": true}}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.price_display.as_deref(), Some("Free"));
        assert!(title.is_free);
    }

    #[test]
    fn paid_title_without_price_overview_has_no_price() {
        let body = r#"{"70": {"success": true, "data": {"name": "Half-Life"}}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert!(title.price_display.is_none());
    }

    #[test]
    fn description_prefers_first_non_empty_variant() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "about_the_game": "   ",
            "detailed_description": "<p>Full description.</p>",
            "short_description": "Short description."
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.description, "Full description.");
        assert_eq!(title.short_description, "Short description.");
    }

    #[test]
    fn description_falls_back_to_short() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "short_description": "Only the short one."
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.description, "Only the short one.");
    }

    #[test]
    fn malformed_fields_degrade_independently() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "screenshots": "not an array",
            "developers": {"oops": 1},
            "genres": 42,
            "release_date": "tomorrow",
            "price_overview": [1, 2, 3]
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.name, "Half-Life");
        assert!(title.screenshots.is_empty());
        assert!(title.developers.is_empty());
        assert!(title.genres.is_empty());
        assert!(title.release_date.is_none());
        assert!(title.price_display.is_none());
    }

    #[test]
    fn empty_data_object_falls_back_to_external_id() {
        let body = r#"{"70": {"success": true, "data": {}}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.name, "70");
        assert!(title.header_image.is_none());
        assert!(title.background_image.is_none());
        assert!(!title.is_free);
    }

    #[test]
    fn background_raw_fallback() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "background_raw": "https://cdn.example.com/70/page_bg_raw.jpg"
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(
            title.background_image.as_deref(),
            Some("https://cdn.example.com/70/page_bg_raw.jpg")
        );
    }

    #[test]
    fn blank_descriptor_entries_are_dropped() {
        let body = r#"{"70": {"success": true, "data": {
            "name": "Half-Life",
            "genres": [{"id": "1", "description": "Action"}, {"id": "2"}, {"id": "3", "description": "  "}]
        }}}"#;
        let title = parse_details(body, "70", STORE_URL)
            .expect("should parse")
            .expect("should have data");
        assert_eq!(title.genres, ["Action"]);
    }

    #[test]
    fn release_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1998, 11, 8);
        assert_eq!(parse_release_date("Nov 8, 1998"), expected);
        assert_eq!(parse_release_date("November 8, 1998"), expected);
        assert_eq!(parse_release_date("8 Nov, 1998"), expected);
        assert_eq!(parse_release_date("1998-11-08"), expected);
        assert_eq!(parse_release_date(" Nov 8, 1998 "), expected);

        assert!(parse_release_date("").is_none());
        assert!(parse_release_date("Coming soon").is_none());
        assert!(parse_release_date("Q1 2026").is_none());
        assert!(parse_release_date("1998").is_none());
    }

    #[tokio::test]
    async fn fetch_failure_returns_none() {
        // Nothing listens on port 1; the request fails immediately.
        let config = ScoutConfig::default().with_store_base_url("http://127.0.0.1:1");
        let client = DetailsClient::new(&config).expect("client should build");
        assert!(client.fetch("70").await.is_none());
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DetailsClient>();
    }

    #[tokio::test]
    #[ignore] // Live network test, run with `cargo test -- --ignored`
    async fn live_details_fetch() {
        let config = ScoutConfig::default();
        let client = DetailsClient::new(&config).expect("client should build");
        let title = client.fetch("70").await.expect("Half-Life should exist");
        assert_eq!(title.name, "Half-Life");
        assert!(title.store_url.ends_with("/app/70"));
        assert!(!title.description.is_empty());
    }
}
