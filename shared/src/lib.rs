pub mod comfort;
pub mod weather;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
}

impl TravelMode {
    /// Nominal speed used to estimate a duration when the backend time is unusable.
    pub fn nominal_speed_kmh(self) -> f64 {
        match self {
            TravelMode::Walking => 5.0,
            TravelMode::Cycling => 15.0,
        }
    }
}

/// Display ordering chosen by the user: towards the sun or towards the shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightPreference {
    Sun,
    Shade,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    #[serde(default)]
    pub mode: TravelMode,
    /// Re-sort by exposure. When absent the routes stay in distance order;
    /// clients that want a seasonal default send it explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<LightPreference>,
}

impl PlanRouteRequest {
    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lng)
    }

    pub fn destination(&self) -> Coordinate {
        Coordinate::new(self.end_lat, self.end_lng)
    }
}

/// One presented route. `sun_exposure` is a synthetic per-rank scalar, not a
/// solar computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRoute {
    pub id: String,
    pub points: Vec<Coordinate>,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(rename = "sunExposure")]
    pub sun_exposure: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRouteResponse {
    pub routes: Vec<RankedRoute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Stable re-sort for display. `Sun` puts the most exposed route first,
/// `Shade` the least exposed.
pub fn sort_by_preference(routes: &mut [RankedRoute], preference: LightPreference) {
    match preference {
        LightPreference::Sun => routes.sort_by(|a, b| b.sun_exposure.cmp(&a.sun_exposure)),
        LightPreference::Shade => routes.sort_by(|a, b| a.sun_exposure.cmp(&b.sun_exposure)),
    }
}
