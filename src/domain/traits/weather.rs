use async_trait::async_trait;

use crate::application::errors::WeatherError;
use crate::domain::entities::WeatherLookup;

/// WeatherProvider trait - abstraction over the remote weather service.
///
/// One provider call per invocation, no retries. A timeout can be layered
/// behind this seam later without changing the dialog engine's contract.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Look up current weather for a city query used verbatim as the key.
    /// Reserved dialog-control words and empty input yield `NotFound`
    /// without touching the network.
    async fn current_weather(&self, city: &str) -> Result<WeatherLookup, WeatherError>;
}
