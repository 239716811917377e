use crate::models::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (phi_a, phi_b) = (a.lat.to_radians(), b.lat.to_radians());
    let half_dphi = (phi_b - phi_a) / 2.0;
    let half_dlambda = (b.lng - a.lng).to_radians() / 2.0;

    let h = half_dphi.sin().powi(2) + phi_a.cos() * phi_b.cos() * half_dlambda.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

/// Unit normal of the planar `(lng, lat)` delta from `start` to `end`,
/// rotated counter-clockwise. Zero when the endpoints coincide.
pub fn perpendicular_unit(start: Coordinate, end: Coordinate) -> Coordinate {
    let (dx, dy) = (end.lng - start.lng, end.lat - start.lat);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return Coordinate::new(0.0, 0.0);
    }
    Coordinate::new(dx / len, -dy / len)
}

/// Point at `fraction` along the straight `start → end` line, pushed
/// `magnitude_deg` degrees along the planar normal. Negative magnitudes
/// land on the other side of the line.
///
/// Not geodesically exact; fine at city scale where the sweep runs.
pub fn perpendicular_offset(
    start: Coordinate,
    end: Coordinate,
    fraction: f64,
    magnitude_deg: f64,
) -> Coordinate {
    let base = start.interpolate(end, fraction);
    let normal = perpendicular_unit(start, end);
    Coordinate {
        lat: base.lat + normal.lat * magnitude_deg,
        lng: base.lng + normal.lng * magnitude_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paris_to_london_is_about_343_km() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1278);
        assert!((haversine_km(paris, london) - 343.0).abs() < 5.0);
    }

    #[test]
    fn offset_pushes_north_bound_line_west() {
        let start = Coordinate::new(40.0, -74.0);
        let end = Coordinate::new(40.1, -74.0);
        let via = perpendicular_offset(start, end, 0.5, 0.0006);
        assert!((via.lat - 40.05).abs() < 1e-12);
        assert!((via.lng - (-74.0006)).abs() < 1e-12);
    }

    #[test]
    fn offset_sign_flips_side() {
        let start = Coordinate::new(40.0, -74.0);
        let end = Coordinate::new(40.02, -73.97);
        let left = perpendicular_offset(start, end, 0.5, 0.002);
        let right = perpendicular_offset(start, end, 0.5, -0.002);
        let mid = start.interpolate(end, 0.5);
        assert!((left.lat - mid.lat + (right.lat - mid.lat)).abs() < 1e-12);
        assert!((left.lng - mid.lng + (right.lng - mid.lng)).abs() < 1e-12);
    }

    #[test]
    fn offset_of_degenerate_segment_stays_put() {
        let point = Coordinate::new(40.0, -74.0);
        let via = perpendicular_offset(point, point, 0.5, 0.002);
        assert_eq!(via, point);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lng)| Coordinate { lat, lng })
        }

        fn city_coord() -> impl Strategy<Value = Coordinate> {
            (40.6..40.9, -74.1..-73.8).prop_map(|(lat, lng)| Coordinate { lat, lng })
        }

        proptest! {
            #[test]
            fn prop_perpendicular_unit_is_perpendicular(
                start in valid_coord(),
                end in valid_coord()
            ) {
                prop_assume!((start.lat - end.lat).abs() > 1e-6 || (start.lng - end.lng).abs() > 1e-6);

                let perp = perpendicular_unit(start, end);
                let dot = (end.lat - start.lat) * perp.lat + (end.lng - start.lng) * perp.lng;
                prop_assert!(dot.abs() < 1e-6);
            }

            #[test]
            fn prop_perpendicular_unit_is_unit_vector(
                start in valid_coord(),
                end in valid_coord()
            ) {
                prop_assume!((start.lat - end.lat).abs() > 1e-6 || (start.lng - end.lng).abs() > 1e-6);

                let perp = perpendicular_unit(start, end);
                let magnitude = (perp.lat * perp.lat + perp.lng * perp.lng).sqrt();
                prop_assert!((magnitude - 1.0).abs() < 1e-6);
            }

            #[test]
            fn prop_offset_distance_matches_magnitude(
                start in city_coord(),
                end in city_coord(),
                fraction in 0.0..=1.0f64,
                scale in -3.0..=3.0f64
            ) {
                prop_assume!((start.lat - end.lat).abs() > 1e-4 || (start.lng - end.lng).abs() > 1e-4);

                let magnitude = 0.002 * scale;
                let base = start.interpolate(end, fraction);
                let via = perpendicular_offset(start, end, fraction, magnitude);
                let planar = ((via.lat - base.lat).powi(2) + (via.lng - base.lng).powi(2)).sqrt();
                prop_assert!((planar - magnitude.abs()).abs() < 1e-9);
            }
        }
    }
}
