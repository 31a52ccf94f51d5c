/// OMDb metadata provider implementation.
use super::omdb_types::{OmdbSeason, OmdbShow};
use super::{MetadataError, MetadataProvider, RawEpisode, ShowRecord};
use crate::grade::Rating;
use image::DynamicImage;
use std::time::Duration;

/// Per-request timeout. OMDb normally answers well within this bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Metadata provider for the OMDb API.
///
/// This provider fetches show information from https://www.omdbapi.com using
/// title queries (`t=`) with an optional `Season=` parameter. The API key is
/// injected at construction time. Transient failures (timeout, refused
/// connection) are retried exactly once before surfacing as a request error.
pub(crate) struct OmdbProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OmdbProvider {
    /// Creates a new OMDb provider instance with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, MetadataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetadataError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://www.omdbapi.com/".to_string(),
            api_key: api_key.into(),
        })
    }

    /// Sends a query against the API base URL, retrying once on transient
    /// network failures.
    fn query(
        &self,
        params: &[(&str, &str)],
    ) -> Result<reqwest::blocking::Response, MetadataError> {
        let send = || {
            self.client
                .get(&self.base_url)
                .query(&[("apikey", self.api_key.as_str())])
                .query(params)
                .send()
        };

        match send() {
            Ok(response) => Ok(response),
            Err(e) if e.is_timeout() || e.is_connect() => {
                send().map_err(|e| MetadataError::RequestError(e.to_string()))
            }
            Err(e) => Err(MetadataError::RequestError(e.to_string())),
        }
    }

    /// Ensures a non-404 response actually succeeded.
    fn check_status(response: &reqwest::blocking::Response) -> Result<(), MetadataError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(MetadataError::RequestError(format!(
            "HTTP {} {}",
            response.status().as_u16(),
            response.status().canonical_reason().unwrap_or("Unknown")
        )))
    }

    /// Converts an OMDb show payload to our internal ShowRecord.
    ///
    /// A `Response: "False"` envelope means the show does not exist. Fields
    /// missing from a successful payload are invalid-data errors naming the
    /// field, as are unparsable numbers.
    fn convert_show(name: &str, payload: OmdbShow) -> Result<ShowRecord, MetadataError> {
        if payload.response == "False" {
            return Err(MetadataError::ShowNotFound(name.to_string()));
        }

        let title = require("Title", payload.title)?;
        let poster_url = require("Poster", payload.poster)?;
        let rating = require("imdbRating", payload.imdb_rating)?;
        let total_seasons = require("totalSeasons", payload.total_seasons)?;

        if poster_url == "N/A" {
            return Err(MetadataError::InvalidData(
                "show has no poster artwork (field `Poster` is N/A)".to_string(),
            ));
        }

        let overall_rating = Rating::parse(&rating).ok_or_else(|| {
            MetadataError::InvalidData(format!("field `imdbRating` has value {rating:?}"))
        })?;

        let total_seasons = total_seasons.parse().map_err(|_| {
            MetadataError::InvalidData(format!("field `totalSeasons` has value {total_seasons:?}"))
        })?;

        Ok(ShowRecord {
            title,
            poster_url,
            overall_rating,
            total_seasons,
        })
    }

    /// Converts an OMDb season payload to the wire episode list.
    ///
    /// Returns `None` for a `Response: "False"` envelope, which marks the
    /// season as absent.
    fn convert_season(payload: OmdbSeason) -> Option<Vec<RawEpisode>> {
        if payload.response == "False" {
            return None;
        }

        Some(
            payload
                .episodes
                .into_iter()
                .map(|episode| RawEpisode {
                    title: episode.title,
                    number: episode.episode,
                    rating: episode.imdb_rating,
                })
                .collect(),
        )
    }
}

/// Extracts a required field from a successful payload.
fn require<T>(field: &'static str, value: Option<T>) -> Result<T, MetadataError> {
    value.ok_or_else(|| MetadataError::InvalidData(format!("missing field `{field}`")))
}

impl MetadataProvider for OmdbProvider {
    fn fetch_show(&self, name: &str) -> Result<ShowRecord, MetadataError> {
        let response = self.query(&[("t", name)])?;

        // OMDb signals "not found" both ways: 404 and Response: "False"
        if response.status() == 404 {
            return Err(MetadataError::ShowNotFound(name.to_string()));
        }
        Self::check_status(&response)?;

        let payload: OmdbShow = response
            .json()
            .map_err(|e| MetadataError::ParseError(e.to_string()))?;

        Self::convert_show(name, payload)
    }

    fn fetch_season(
        &self,
        show_title: &str,
        season: usize,
    ) -> Result<Option<Vec<RawEpisode>>, MetadataError> {
        let season_number = season.to_string();
        let response = self.query(&[("t", show_title), ("Season", &season_number)])?;

        if response.status() == 404 {
            return Ok(None);
        }
        Self::check_status(&response)?;

        let payload: OmdbSeason = response
            .json()
            .map_err(|e| MetadataError::ParseError(e.to_string()))?;

        Ok(Self::convert_season(payload))
    }

    fn fetch_poster(&self, url: &str) -> Result<DynamicImage, MetadataError> {
        let send = || self.client.get(url).send();
        let response = match send() {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                send().map_err(|e| MetadataError::RequestError(e.to_string()))?
            }
            Err(e) => return Err(MetadataError::RequestError(e.to_string())),
        };
        Self::check_status(&response)?;

        let bytes = response
            .bytes()
            .map_err(|e| MetadataError::RequestError(e.to_string()))?;

        image::load_from_memory(&bytes)
            .map_err(|e| MetadataError::InvalidData(format!("poster could not be decoded: {e}")))
    }
}
