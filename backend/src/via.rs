//! Via-point sequences that coax alternative paths out of the backend.

use crate::{geo::perpendicular_offset, models::Coordinate};

/// How far a via point is pushed off the direct line per unit of scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeTier {
    /// Subtle detour a pedestrian would plausibly take.
    Small,
    /// Aggressive detour, only used when the small sweep found too few routes.
    Large,
}

impl MagnitudeTier {
    pub fn degrees_per_unit(self) -> f64 {
        match self {
            MagnitudeTier::Small => 0.0006,
            MagnitudeTier::Large => 0.002,
        }
    }
}

/// One entry of the sweep: where along the line to place the via point and
/// how far (and on which side) to push it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViaStep {
    pub fraction: f64,
    pub scale: f64,
    pub tier: MagnitudeTier,
}

impl ViaStep {
    pub const fn small(fraction: f64, scale: f64) -> Self {
        Self {
            fraction,
            scale,
            tier: MagnitudeTier::Small,
        }
    }

    pub const fn large(fraction: f64, scale: f64) -> Self {
        Self {
            fraction,
            scale,
            tier: MagnitudeTier::Large,
        }
    }

    pub fn sequence(&self, origin: Coordinate, destination: Coordinate) -> [Coordinate; 3] {
        build_via_sequence(origin, destination, self.fraction, self.scale, self.tier)
    }
}

pub const DEFAULT_SMALL_STEPS: [ViaStep; 8] = [
    ViaStep::small(0.5, 1.0),
    ViaStep::small(0.5, -1.0),
    ViaStep::small(0.4, 2.0),
    ViaStep::small(0.6, -2.0),
    ViaStep::small(0.33, 1.0),
    ViaStep::small(0.66, -1.0),
    ViaStep::small(0.5, 3.0),
    ViaStep::small(0.5, -3.0),
];

pub const DEFAULT_LARGE_STEPS: [ViaStep; 2] = [ViaStep::large(0.5, 1.0), ViaStep::large(0.5, -1.0)];

/// `[origin, via, destination]` with the via point displaced perpendicular
/// to the direct line.
pub fn build_via_sequence(
    origin: Coordinate,
    destination: Coordinate,
    fraction: f64,
    offset_scale: f64,
    tier: MagnitudeTier,
) -> [Coordinate; 3] {
    let via = perpendicular_offset(
        origin,
        destination,
        fraction,
        offset_scale * tier.degrees_per_unit(),
    );
    [origin, via, destination]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_km;

    const ORIGIN: Coordinate = Coordinate {
        lat: 40.758,
        lng: -73.9855,
    };
    const DESTINATION: Coordinate = Coordinate {
        lat: 40.7484,
        lng: -73.9857,
    };

    #[test]
    fn sequence_keeps_endpoints() {
        let [first, _, last] = build_via_sequence(ORIGIN, DESTINATION, 0.5, 1.0, MagnitudeTier::Small);
        assert_eq!(first, ORIGIN);
        assert_eq!(last, DESTINATION);
    }

    #[test]
    fn large_tier_detours_further_than_small() {
        let mid = ORIGIN.interpolate(DESTINATION, 0.5);
        let [_, small, _] = build_via_sequence(ORIGIN, DESTINATION, 0.5, 1.0, MagnitudeTier::Small);
        let [_, large, _] = build_via_sequence(ORIGIN, DESTINATION, 0.5, 1.0, MagnitudeTier::Large);
        let small_km = haversine_km(mid, small);
        let large_km = haversine_km(mid, large);
        assert!(small_km > 0.03 && small_km < 0.08, "small detour {small_km} km");
        assert!(large_km > 3.0 * small_km);
    }

    #[test]
    fn scale_sign_selects_side() {
        let [_, left, _] = ViaStep::small(0.5, 2.0).sequence(ORIGIN, DESTINATION);
        let [_, right, _] = ViaStep::small(0.5, -2.0).sequence(ORIGIN, DESTINATION);
        // Line runs almost due south, so the sides differ in longitude.
        assert!(left.lng > ORIGIN.lng);
        assert!(right.lng < ORIGIN.lng);
    }

    #[test]
    fn default_plan_shape() {
        assert!(DEFAULT_SMALL_STEPS.iter().all(|s| s.tier == MagnitudeTier::Small));
        assert!(DEFAULT_SMALL_STEPS
            .iter()
            .all(|s| (0.33..=0.66).contains(&s.fraction) && (1.0..=3.0).contains(&s.scale.abs())));
        assert_eq!(DEFAULT_LARGE_STEPS[0].scale, -DEFAULT_LARGE_STEPS[1].scale);
    }
}
