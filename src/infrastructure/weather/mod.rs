//! OpenWeather client
//!
//! One GET per lookup, no retries. Reserved dialog-control words and empty
//! queries are rejected before the request is built, so they can never be
//! resolved as cities regardless of what the provider would answer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::application::errors::WeatherError;
use crate::domain::entities::{to_celsius_and_fahrenheit, WeatherLookup, WeatherReport};
use crate::domain::traits::WeatherProvider;

/// Inputs that are dialog-control words, never city names.
const RESERVED_WORDS: [&str; 2] = ["start", "stop"];

/// Weather provider backed by the OpenWeather current-weather endpoint.
pub struct OpenWeatherClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherLookup, WeatherError> {
        if is_reserved(city) {
            return Ok(WeatherLookup::NotFound);
        }

        let url = format!("{}/weather", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        parse_payload(city, body)
    }
}

/// Reserved words short-circuit the lookup, case-insensitively; empty and
/// whitespace-only queries are treated the same way.
fn is_reserved(city: &str) -> bool {
    let city = city.trim();
    city.is_empty() || RESERVED_WORDS.iter().any(|w| city.eq_ignore_ascii_case(w))
}

#[derive(Debug, Deserialize)]
struct Payload {
    main: MainSection,
    wind: WindSection,
    weather: Vec<ConditionSection>,
    sys: SysSection,
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    sunrise: i64,
    sunset: i64,
    country: String,
}

/// Map a provider body into a lookup outcome. A string `"404"` in `cod`
/// means no such city; any other payload must carry the full record or the
/// call fails as malformed.
fn parse_payload(city: &str, body: serde_json::Value) -> Result<WeatherLookup, WeatherError> {
    if body.get("cod").and_then(|c| c.as_str()) == Some("404") {
        return Ok(WeatherLookup::NotFound);
    }

    let payload: Payload =
        serde_json::from_value(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse("empty weather conditions".to_string()))?;

    let (temp_celsius, temp_fahrenheit) = to_celsius_and_fahrenheit(payload.main.temp);

    Ok(WeatherLookup::Found(WeatherReport {
        city: city.to_string(),
        country: payload.sys.country,
        temp_celsius,
        temp_fahrenheit,
        humidity_pct: payload.main.humidity,
        wind_speed_mps: payload.wind.speed,
        description: condition.description,
        sunrise: local_naive(payload.sys.sunrise, payload.timezone)?,
        sunset: local_naive(payload.sys.sunset, payload.timezone)?,
    }))
}

/// Shift a UTC epoch by the provider's timezone offset and keep the sum
/// naive: the displayed time is local wall-clock time without a zone
/// label. This exact construction is part of the output contract.
fn local_naive(epoch_utc: i64, offset_seconds: i64) -> Result<NaiveDateTime, WeatherError> {
    DateTime::from_timestamp(epoch_utc + offset_seconds, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            WeatherError::Parse(format!(
                "timestamp out of range: {}",
                epoch_utc + offset_seconds
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn london_body() -> serde_json::Value {
        json!({
            "cod": 200,
            "name": "London",
            "timezone": 3600,
            "main": { "temp": 15.0, "humidity": 60, "pressure": 1012 },
            "wind": { "speed": 3.2, "deg": 250 },
            "weather": [ { "id": 800, "main": "Clear", "description": "clear sky" } ],
            "sys": { "country": "GB", "sunrise": 1_717_210_800i64, "sunset": 1_717_268_400i64 }
        })
    }

    #[test]
    fn reserved_words_match_case_insensitively() {
        assert!(is_reserved("start"));
        assert!(is_reserved("START"));
        assert!(is_reserved("Stop"));
        assert!(is_reserved(""));
        assert!(is_reserved("   "));
        assert!(!is_reserved("Stockholm"));
    }

    #[test]
    fn parses_a_full_payload() {
        let lookup = parse_payload("London", london_body()).unwrap();
        let WeatherLookup::Found(report) = lookup else {
            panic!("expected a report");
        };
        assert_eq!(report.city, "London");
        assert_eq!(report.country, "GB");
        assert_eq!(report.temp_celsius, 15.0);
        assert_eq!(report.temp_fahrenheit, 59.0);
        assert_eq!(report.humidity_pct, 60);
        assert_eq!(report.wind_speed_mps, 3.2);
        assert_eq!(report.description, "clear sky");
    }

    #[test]
    fn sunrise_and_sunset_are_offset_by_the_provider_timezone() {
        let lookup = parse_payload("London", london_body()).unwrap();
        let WeatherLookup::Found(report) = lookup else {
            panic!("expected a report");
        };
        // 1717210800 UTC + 3600s offset, shown as naive local time.
        assert_eq!(report.sunrise.to_string(), "2024-06-01 04:00:00");
        assert_eq!(report.sunset.to_string(), "2024-06-01 20:00:00");
    }

    #[test]
    fn string_404_cod_is_not_found() {
        let body = json!({ "cod": "404", "message": "city not found" });
        assert_eq!(parse_payload("Atlantis", body).unwrap(), WeatherLookup::NotFound);
    }

    #[test]
    fn missing_fields_are_a_parse_error() {
        let body = json!({ "cod": 200, "main": { "temp": 1.0, "humidity": 50 } });
        assert!(matches!(
            parse_payload("London", body),
            Err(WeatherError::Parse(_))
        ));
    }

    #[test]
    fn empty_condition_list_is_a_parse_error() {
        let mut body = london_body();
        body["weather"] = json!([]);
        assert!(matches!(
            parse_payload("London", body),
            Err(WeatherError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn reserved_words_short_circuit_before_any_network_call() {
        // The base URL is unroutable; reaching the network would error.
        let client = OpenWeatherClient::new("dummy-key", "http://127.0.0.1:9");
        for city in ["start", "STOP", "", "  "] {
            let lookup = client.current_weather(city).await.unwrap();
            assert_eq!(lookup, WeatherLookup::NotFound);
        }
    }
}
