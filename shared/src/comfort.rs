//! Weather comfort index used by the dashboard charts.
//!
//! Independent from route diversification: nothing here feeds the route
//! ranking.

const IDEAL_TEMP_C: f64 = 22.0;
const HUMIDITY_THRESHOLD: f64 = 50.0;

/// 0–100 comfort index from temperature (°C), relative humidity (%),
/// UV index and wind speed (km/h).
///
/// ```text
/// score = 100 − |temp − 22|·2 − max(0, humidity − 50)·0.2 − uv·2 − wind·1.5
/// ```
/// rounded and clamped to `[0, 100]`.
pub fn comfort_score(temp_c: f64, humidity: f64, uv_index: f64, wind_kmh: f64) -> u8 {
    let temp_penalty = (temp_c - IDEAL_TEMP_C).abs() * 2.0;
    let humidity_penalty = (humidity - HUMIDITY_THRESHOLD).max(0.0) * 0.2;
    let uv_penalty = uv_index * 2.0;
    let wind_penalty = wind_kmh * 1.5;
    clamp_percent(100.0 - temp_penalty - humidity_penalty - uv_penalty - wind_penalty)
}

/// Short-wave radiation (W/m²) as a 0–100 share of 1000 W/m².
pub fn radiation_to_percent(w_m2: f64) -> u8 {
    clamp_percent(w_m2 / 1000.0 * 100.0)
}

/// Cycling suitability: mostly comfort, nudged by how sunny the day is.
pub fn cycling_score(comfort: u8, radiance: u8) -> u8 {
    clamp_percent(f64::from(comfort) * 0.9 + f64::from(radiance) * 0.1)
}

pub(crate) fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // JS-style rounding (half towards +inf) keeps chart values identical to the web client.
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}
