//! Dashboard series derived from an Open-Meteo forecast payload.
//!
//! The forecast is treated as opaque data: every array may be missing or
//! shorter than `time`, in which case the sample counts as 0.

use serde::{Deserialize, Serialize};

use crate::comfort::{clamp_percent, comfort_score, cycling_score, radiation_to_percent};

const HOURS_PER_DAY: usize = 24;
const DAYS_PER_WEEK: usize = 7;
const WEEKLY_HUMIDITY: f64 = 55.0;
const WEEKLY_WIND_KMH: f64 = 4.0;
const NO_DATA: &str = "--";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub hourly: HourlyForecast,
    #[serde(default)]
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<f64>,
    #[serde(default)]
    pub uv_index: Vec<f64>,
    #[serde(default)]
    pub shortwave_radiation: Vec<f64>,
    #[serde(default)]
    pub wind_speed_10m: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub shortwave_radiation_sum: Vec<f64>,
    #[serde(default)]
    pub uv_index_max: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub time: String,
    pub comfort: u8,
    pub shadow: u8,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAveragePoint {
    pub time: String,
    pub radiance: u8,
    pub shadow_avg: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub day: String,
    pub comfort: u8,
    pub cycling: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetrics {
    pub avg_shadow: String,
    pub avg_temp: String,
    pub avg_radiance: String,
}

impl Default for ChartMetrics {
    fn default() -> Self {
        Self {
            avg_shadow: NO_DATA.to_string(),
            avg_temp: NO_DATA.to_string(),
            avg_radiance: NO_DATA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub daily: Vec<DailyPoint>,
    pub city_averages: Vec<CityAveragePoint>,
    pub weekly: Vec<WeeklyPoint>,
    pub metrics: ChartMetrics,
}

fn sample(values: &[f64], index: usize) -> f64 {
    values.get(index).copied().unwrap_or(0.0)
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Forecast {
    pub fn chart_series(&self) -> ChartSeries {
        let hourly = &self.hourly;
        let hours = hourly.time.len().min(HOURS_PER_DAY);
        let radiance_at = |i: usize| radiation_to_percent(sample(&hourly.shortwave_radiation, i));

        let city_averages = (0..hours)
            .step_by(2)
            .map(|i| {
                let radiance = radiance_at(i);
                CityAveragePoint {
                    time: hourly.time[i].clone(),
                    radiance,
                    shadow_avg: 100 - radiance,
                }
            })
            .collect();

        let daily = (0..hours)
            .step_by(4)
            .map(|i| DailyPoint {
                time: hourly.time[i].clone(),
                comfort: comfort_score(
                    sample(&hourly.temperature_2m, i),
                    sample(&hourly.relative_humidity_2m, i),
                    sample(&hourly.uv_index, i),
                    sample(&hourly.wind_speed_10m, i),
                ),
                shadow: 100 - radiance_at(i),
                temp: round_one_decimal(sample(&hourly.temperature_2m, i)),
            })
            .collect();

        let days = &self.daily;
        let weekly = days
            .time
            .iter()
            .take(DAYS_PER_WEEK)
            .enumerate()
            .map(|(i, day)| {
                let avg_temp =
                    (sample(&days.temperature_2m_max, i) + sample(&days.temperature_2m_min, i)) / 2.0;
                // 24 000 marks a fully sunny day.
                let radiance = clamp_percent(
                    sample(&days.shortwave_radiation_sum, i) / 24_000.0 * 100.0,
                );
                let comfort = comfort_score(
                    avg_temp,
                    WEEKLY_HUMIDITY,
                    sample(&days.uv_index_max, i),
                    WEEKLY_WIND_KMH,
                );
                WeeklyPoint {
                    day: day.clone(),
                    comfort,
                    cycling: cycling_score(comfort, radiance),
                }
            })
            .collect();

        let metrics = if hours == 0 {
            ChartMetrics::default()
        } else {
            let avg_radiance = average((0..hours).map(|i| f64::from(radiance_at(i))));
            let avg_temp = average((0..hours).map(|i| sample(&hourly.temperature_2m, i)));
            ChartMetrics {
                avg_shadow: format!("{}%", (100.0 - avg_radiance).round()),
                avg_temp: format!("{} C", round_one_decimal(avg_temp)),
                avg_radiance: format!("{}%", avg_radiance.round()),
            }
        };

        ChartSeries {
            daily,
            city_averages,
            weekly,
            metrics,
        }
    }
}
