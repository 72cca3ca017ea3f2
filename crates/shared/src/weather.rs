use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::models::{Fetch, WeatherSnapshot};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

// Required blocks are non-optional on purpose: a response missing any of
// them fails to parse, so a partial forecast resolves to Unavailable
// rather than to a half-filled snapshot.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    apparent_temperature: Option<f64>,
    weather_code: u16,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

/// Today's forecast from Open-Meteo (free, no key required).
pub struct WeatherClient {
    client: Client,
    lat: f64,
    lon: f64,
    location_name: String,
}

impl WeatherClient {
    pub fn new(lat: f64, lon: f64, location_name: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            lat,
            lon,
            location_name,
        })
    }

    pub async fn fetch_today(&self) -> Fetch<WeatherSnapshot> {
        match self.try_fetch().await {
            Ok(snapshot) => Fetch::Fetched(snapshot),
            Err(e) => {
                eprintln!("Warning: weather fetch failed: {e:#}");
                Fetch::Unavailable
            }
        }
    }

    async fn try_fetch(&self) -> Result<WeatherSnapshot> {
        let response = self
            .client
            .get(FORECAST_URL)
            .query(&[
                ("latitude", self.lat.to_string()),
                ("longitude", self.lon.to_string()),
                (
                    "current",
                    "temperature_2m,apparent_temperature,weather_code".to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,sunrise,sunset".to_string(),
                ),
                ("timezone", "Europe/London".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await
            .context("Failed to reach Open-Meteo")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Open-Meteo returned error status: {}", status);
        }

        let forecast = response
            .json::<ForecastResponse>()
            .await
            .context("Failed to parse Open-Meteo response")?;

        snapshot_from(forecast, &self.location_name)
    }
}

fn snapshot_from(forecast: ForecastResponse, location: &str) -> Result<WeatherSnapshot> {
    let high = *forecast
        .daily
        .temperature_2m_max
        .first()
        .context("Open-Meteo response has no daily maximum")?;
    let low = *forecast
        .daily
        .temperature_2m_min
        .first()
        .context("Open-Meteo response has no daily minimum")?;

    let sunrise = forecast
        .daily
        .sunrise
        .first()
        .map(|s| clock_time(s))
        .unwrap_or_default();
    let sunset = forecast
        .daily
        .sunset
        .first()
        .map(|s| clock_time(s))
        .unwrap_or_default();

    Ok(WeatherSnapshot {
        temperature: forecast.current.temperature_2m.round() as i32,
        feels_like: forecast
            .current
            .apparent_temperature
            .map(|t| t.round() as i32),
        condition: condition_text(forecast.current.weather_code).to_string(),
        high: high.round() as i32,
        low: low.round() as i32,
        sunrise,
        sunset,
        location: location.to_string(),
    })
}

/// Reformat an Open-Meteo local timestamp ("2025-12-30T08:12") as "08:12".
fn clock_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// WMO weather interpretation codes used by Open-Meteo.
fn condition_text(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "current": {
            "temperature_2m": 6.4,
            "apparent_temperature": 3.8,
            "weather_code": 61
        },
        "daily": {
            "temperature_2m_max": [8.6],
            "temperature_2m_min": [2.1],
            "sunrise": ["2025-12-30T08:12"],
            "sunset": ["2025-12-30T16:05"]
        }
    }"#;

    #[test]
    fn full_response_builds_snapshot() {
        let forecast: ForecastResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let snapshot = snapshot_from(forecast, "Witney, Oxfordshire").unwrap();

        assert_eq!(snapshot.temperature, 6);
        assert_eq!(snapshot.feels_like, Some(4));
        assert_eq!(snapshot.condition, "Slight rain");
        assert_eq!(snapshot.high, 9);
        assert_eq!(snapshot.low, 2);
        assert_eq!(snapshot.sunrise, "08:12");
        assert_eq!(snapshot.sunset, "16:05");
        assert_eq!(snapshot.location, "Witney, Oxfordshire");
    }

    #[test]
    fn partial_response_fails_to_parse() {
        // No daily block at all: must be rejected, never half-filled
        let body = r#"{"current": {"temperature_2m": 6.4, "weather_code": 0}}"#;
        assert!(serde_json::from_str::<ForecastResponse>(body).is_err());
    }

    #[test]
    fn missing_apparent_temperature_is_allowed() {
        let body = r#"{
            "current": {"temperature_2m": 1.2, "weather_code": 71},
            "daily": {
                "temperature_2m_max": [2.0],
                "temperature_2m_min": [-3.0],
                "sunrise": ["2026-01-05T08:10"],
                "sunset": ["2026-01-05T16:12"]
            }
        }"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        let snapshot = snapshot_from(forecast, "Witney").unwrap();
        assert_eq!(snapshot.feels_like, None);
        assert_eq!(snapshot.condition, "Slight snow");
    }

    #[test]
    fn unknown_weather_code_maps_to_unknown() {
        assert_eq!(condition_text(42), "Unknown");
        assert_eq!(condition_text(95), "Thunderstorm");
    }
}
