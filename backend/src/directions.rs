use std::future::Future;

use crate::models::{Coordinate, Profile, RouteCandidate, TravelMode};

/// Seam between the diversification engine and the directions service.
///
/// The production implementation is [`crate::osrm::OsrmClient`]; tests plug
/// in scripted backends. Implementations must:
/// - Return `Ok(vec![])` when the backend answers but has no route
/// - Return `Err` for transport failures, non-success statuses and payloads
///   that do not parse into candidates
pub trait DirectionsBackend: Send + Sync {
    fn route(
        &self,
        profile: Profile,
        coordinates: &[Coordinate],
        alternatives: u8,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, BackendError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("directions request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("directions backend answered with HTTP {0}")]
    Status(u16),
    #[error("invalid directions payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("directions backend rejected the request with code {code}: {message}")]
    Rejected { code: String, message: String },
    #[error("malformed route #{index}: {reason}")]
    MalformedRoute { index: usize, reason: &'static str },
}

/// Ask the backend for paths through `coordinates`, walking the profile
/// fallback list for `mode` until one answers with at least one route.
///
/// An empty result means "no path" and is not an error: every profile either
/// failed or had nothing to offer.
pub async fn fetch_candidates<B: DirectionsBackend>(
    backend: &B,
    coordinates: &[Coordinate],
    mode: TravelMode,
    alternatives: u8,
) -> Vec<RouteCandidate> {
    for &profile in Profile::fallback_order(mode) {
        match backend.route(profile, coordinates, alternatives).await {
            Ok(routes) if !routes.is_empty() => {
                tracing::debug!(
                    "profile {profile} returned {} route(s) for {} point(s)",
                    routes.len(),
                    coordinates.len()
                );
                return routes;
            }
            Ok(_) => tracing::debug!("profile {profile} returned no route"),
            Err(err) => tracing::warn!("profile {profile} failed: {err}"),
        }
    }
    Vec::new()
}
