pub use shared::{
    ApiError, Coordinate, LightPreference, PlanRouteRequest, PlanRouteResponse, RankedRoute,
    TravelMode,
};

/// Named routing mode understood by the directions backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Foot,
    Bike,
    Driving,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Foot => "foot",
            Profile::Bike => "bike",
            Profile::Driving => "driving",
        }
    }

    /// Profiles to try for a travel mode, preferred first. Public OSRM
    /// deployments frequently only serve `driving`.
    pub fn fallback_order(mode: TravelMode) -> &'static [Profile] {
        match mode {
            TravelMode::Walking => &[Profile::Foot, Profile::Driving],
            TravelMode::Cycling => &[Profile::Bike, Profile::Driving],
        }
    }

    pub fn preferred(mode: TravelMode) -> Profile {
        Self::fallback_order(mode)[0]
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path returned by the directions backend, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<Coordinate>,
    pub profile: Profile,
}
