use chrono::NaiveDateTime;

/// Expand a metric-units provider temperature into the Celsius/Fahrenheit
/// pair shown in reports. The provider is queried with `units=metric`, so
/// the input is already Celsius and only `F = C * 9/5 + 32` is computed.
pub fn to_celsius_and_fahrenheit(temp_celsius: f64) -> (f64, f64) {
    (temp_celsius, temp_celsius * 9.0 / 5.0 + 32.0)
}

/// A successful current-weather lookup, converted and ready for rendering.
///
/// `city` holds the query string as the user typed it; the report template
/// echoes it back rather than the provider's resolved name. Sunrise and
/// sunset are the provider's UTC epochs shifted by the provider's timezone
/// offset and kept naive: local wall-clock time with no timezone label.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temp_celsius: f64,
    pub temp_fahrenheit: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

/// Outcome of a city lookup. Reserved words, empty input and a provider
/// 404 all map to `NotFound`; transport failures are errors, not variants.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Found(WeatherReport),
    NotFound,
}
