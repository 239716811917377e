//! OSRM HTTP client and strict response normalization.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::{
    directions::{BackendError, DirectionsBackend},
    models::{Coordinate, Profile, RouteCandidate},
};

pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<[f64; 2]>,
}

/// Parse an OSRM `route` service body into candidates.
///
/// `code` must be `"Ok"`. Every route must carry finite, non-negative
/// distance and duration, and a GeoJSON `LineString` geometry when one is
/// present. An `"Ok"` body with no routes yields an empty list.
pub fn parse_route_response(
    profile: Profile,
    body: &[u8],
) -> Result<Vec<RouteCandidate>, BackendError> {
    let response: OsrmResponse = serde_json::from_slice(body)?;
    if response.code != "Ok" {
        return Err(BackendError::Rejected {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    response
        .routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| normalize_route(profile, index, route))
        .collect()
}

fn normalize_route(
    profile: Profile,
    index: usize,
    route: OsrmRoute,
) -> Result<RouteCandidate, BackendError> {
    let malformed = |reason| BackendError::MalformedRoute { index, reason };

    if !route.distance.is_finite() || route.distance < 0.0 {
        return Err(malformed("distance must be a non-negative number"));
    }
    if !route.duration.is_finite() || route.duration < 0.0 {
        return Err(malformed("duration must be a non-negative number"));
    }

    let geometry = match route.geometry {
        None => Vec::new(),
        Some(geometry) if geometry.kind == "LineString" => geometry
            .coordinates
            .into_iter()
            // GeoJSON positions are [lng, lat]
            .map(|[lng, lat]| Coordinate { lat, lng })
            .collect(),
        Some(_) => return Err(malformed("geometry is not a GeoJSON LineString")),
    };

    Ok(RouteCandidate {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry,
        profile,
    })
}

pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/route/v1/{profile}/{lng,lat;...}?overview=full&geometries=geojson[&alternatives=N]`
    pub fn route_url(&self, profile: Profile, coordinates: &[Coordinate], alternatives: u8) -> String {
        let path = coordinates
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");
        let mut url = format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.base_url, profile, path
        );
        if alternatives > 0 {
            url.push_str(&format!("&alternatives={alternatives}"));
        }
        url
    }
}

impl DirectionsBackend for OsrmClient {
    async fn route(
        &self,
        profile: Profile,
        coordinates: &[Coordinate],
        alternatives: u8,
    ) -> Result<Vec<RouteCandidate>, BackendError> {
        let url = self.route_url(profile, coordinates, alternatives);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        parse_route_response(profile, &body)
    }
}
