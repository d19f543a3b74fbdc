//! Weather report rendering
//!
//! The template is a fixed output contract: section labels, field order and
//! spacing (including the historical "Temprature" label) must not change,
//! since downstream tests compare the rendered text byte for byte.

use crate::domain::entities::WeatherReport;

/// Render a weather report into the fixed multi-line template.
///
/// Total over all inputs; a failed lookup never reaches this function.
/// Rendering the same report twice yields byte-identical output.
pub fn render(report: &WeatherReport) -> String {
    format!(
        "{header_city}, {country}\n\
         \n\
         \u{1F321}\u{FE0F} Temprature in {city}:{celsius:.2}\u{B0}C or {fahrenheit:.2}\u{B0}F\n\
         \n\
         \u{1F4A7} Humidity in {city}: {humidity}%\n\
         \n\
         \u{1F4A8} Wind Speed in {city}: {wind}m/s\n\
         \n\
         \u{1F325}\u{FE0F} General Weather in {city}: {description}\n\
         \n\
         \u{1F305} Sun rise in {city} AT:  {sunrise}\n\
         \n\
         \u{1F307} Sun set in {city} AT:  {sunset}\n",
        header_city = report.city.to_uppercase(),
        country = report.country,
        city = report.city,
        celsius = report.temp_celsius,
        fahrenheit = report.temp_fahrenheit,
        humidity = report.humidity_pct,
        wind = report.wind_speed_mps,
        description = report.description,
        sunrise = report.sunrise,
        sunset = report.sunset,
    )
}
