//! Presentation of diversified candidates.
//!
//! Sun exposure here is a placeholder scalar assigned by rank. It is not
//! derived from the geometry, the time of day or any solar model.

use crate::models::{Coordinate, Profile, RankedRoute, RouteCandidate, TravelMode};

const SUN_EXPOSURE_BY_RANK: [u8; 3] = [85, 65, 45];
const FALLBACK_SUN_EXPOSURE: u8 = 50;
/// Hues in this band read as green on the map and get a darker shade.
const GREEN_HUE_BAND: std::ops::RangeInclusive<f64> = 85.0..=155.0;
const GREEN_LIGHTNESS: u8 = 32;
const DEFAULT_LIGHTNESS: u8 = 52;

pub fn sun_exposure_for_rank(rank: usize) -> u8 {
    SUN_EXPOSURE_BY_RANK
        .get(rank)
        .copied()
        .unwrap_or(FALLBACK_SUN_EXPOSURE)
}

/// Blue (240°) for no exposure through red (0°) for full exposure.
pub fn exposure_hue(sun_exposure: u8) -> f64 {
    240.0 - (f64::from(sun_exposure) / 100.0) * 240.0
}

pub fn exposure_lightness(hue: f64) -> u8 {
    if GREEN_HUE_BAND.contains(&hue) {
        GREEN_LIGHTNESS
    } else {
        DEFAULT_LIGHTNESS
    }
}

/// CSS color token, e.g. `hsl(36, 100%, 52%)`.
pub fn route_color(sun_exposure: u8) -> String {
    let hue = exposure_hue(sun_exposure);
    format!("hsl({}, 100%, {}%)", hue.round(), exposure_lightness(hue))
}

pub fn round_km(distance_m: f64) -> f64 {
    (distance_m / 1000.0 * 100.0).round() / 100.0
}

/// Travel time in whole minutes.
///
/// The backend's own estimate is only trusted when it came from the mode's
/// preferred profile; a generic (driving) answer is re-timed at the mode's
/// nominal speed.
pub fn duration_minutes(candidate: &RouteCandidate, mode: TravelMode) -> u32 {
    let seconds = if candidate.profile == Profile::preferred(mode) && candidate.duration_s > 0.0 {
        candidate.duration_s
    } else {
        candidate.distance_m / 1000.0 / mode.nominal_speed_kmh() * 3600.0
    };
    (seconds / 60.0).round() as u32
}

/// Turn the ordered candidates into presented routes. Rank follows the input
/// order, so the caller passes them sorted by distance.
pub fn rank_routes(
    candidates: &[RouteCandidate],
    origin: Coordinate,
    destination: Coordinate,
    mode: TravelMode,
) -> Vec<RankedRoute> {
    candidates
        .iter()
        .enumerate()
        .map(|(rank, candidate)| {
            let sun_exposure = sun_exposure_for_rank(rank);
            let points = if candidate.geometry.len() < 2 {
                vec![origin, destination]
            } else {
                candidate.geometry.clone()
            };
            RankedRoute {
                id: format!("route-{}", rank + 1),
                points,
                distance_km: round_km(candidate.distance_m),
                duration_minutes: duration_minutes(candidate, mode),
                sun_exposure,
                color: route_color(sun_exposure),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(distance_m: f64, duration_s: f64, profile: Profile) -> RouteCandidate {
        RouteCandidate {
            distance_m,
            duration_s,
            geometry: Vec::new(),
            profile,
        }
    }

    #[test]
    fn single_point_geometry_becomes_straight_line() {
        let origin = Coordinate::new(40.758, -73.9855);
        let destination = Coordinate::new(40.7484, -73.9857);
        let mut stub = candidate(0.0, 0.0, Profile::Foot);
        stub.geometry = vec![Coordinate::new(40.75, -73.98)];

        let routes = rank_routes(&[stub], origin, destination, TravelMode::Walking);
        assert_eq!(routes[0].points, vec![origin, destination]);
    }

    #[test]
    fn exposure_follows_rank() {
        assert_eq!(sun_exposure_for_rank(0), 85);
        assert_eq!(sun_exposure_for_rank(1), 65);
        assert_eq!(sun_exposure_for_rank(2), 45);
        assert_eq!(sun_exposure_for_rank(3), 50);
        assert_eq!(sun_exposure_for_rank(17), 50);
    }

    #[test]
    fn best_route_is_orange_and_bright() {
        assert!((exposure_hue(85) - 36.0).abs() < 1e-9);
        assert_eq!(exposure_lightness(exposure_hue(85)), 52);
        assert_eq!(route_color(85), "hsl(36, 100%, 52%)");
    }

    #[test]
    fn green_band_is_darkened() {
        assert!((exposure_hue(45) - 132.0).abs() < 1e-9);
        assert_eq!(route_color(45), "hsl(132, 100%, 32%)");
        assert_eq!(route_color(50), "hsl(120, 100%, 32%)");
        // 84° sits just outside the band
        assert_eq!(route_color(65), "hsl(84, 100%, 52%)");
    }

    #[test]
    fn distance_is_rounded_to_two_decimals() {
        assert_eq!(round_km(1234.0), 1.23);
        assert_eq!(round_km(1235.6), 1.24);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn preferred_profile_keeps_backend_duration() {
        let c = candidate(2000.0, 1500.0, Profile::Foot);
        assert_eq!(duration_minutes(&c, TravelMode::Walking), 25);
    }

    #[test]
    fn fallback_profile_is_retimed_at_nominal_speed() {
        // 2 km at 5 km/h = 24 min; driving estimate is ignored
        let c = candidate(2000.0, 180.0, Profile::Driving);
        assert_eq!(duration_minutes(&c, TravelMode::Walking), 24);
        // 2 km at 15 km/h = 8 min
        let c = candidate(2000.0, 180.0, Profile::Driving);
        assert_eq!(duration_minutes(&c, TravelMode::Cycling), 8);
    }

    #[test]
    fn missing_duration_is_estimated() {
        let c = candidate(1000.0, 0.0, Profile::Bike);
        assert_eq!(duration_minutes(&c, TravelMode::Cycling), 4);
    }

    #[test]
    fn ranking_assigns_ids_colors_and_fallback_geometry() {
        let origin = Coordinate::new(40.758, -73.9855);
        let destination = Coordinate::new(40.7484, -73.9857);
        let mut with_path = candidate(1100.0, 800.0, Profile::Foot);
        with_path.geometry = vec![origin, Coordinate::new(40.753, -73.984), destination];
        let candidates = [candidate(1000.0, 760.0, Profile::Foot), with_path.clone(), with_path];

        let routes = rank_routes(&candidates, origin, destination, TravelMode::Walking);
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].id, "route-1");
        assert_eq!(routes[2].id, "route-3");
        assert_eq!(routes[0].points, vec![origin, destination]);
        assert_eq!(routes[1].points.len(), 3);
        assert_eq!(routes[0].sun_exposure, 85);
        assert_eq!(routes[0].color, "hsl(36, 100%, 52%)");
        assert_eq!(routes[1].distance_km, 1.1);
        assert_eq!(routes[0].duration_minutes, 13);
    }
}
