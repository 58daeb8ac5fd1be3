use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Current conditions for one city, as reported by the weather collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temp: i32,
    pub condition: String,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

impl WeatherReport {
    /// One-line summary used in proactive context blocks.
    pub fn brief(&self) -> String {
        format!(
            "{}°C, {} ({}). Wind: {}m/s.",
            self.temp, self.condition, self.description, self.wind_speed
        )
    }
}

/// Weather lookup collaborator. A failed or missing lookup is `None`; the
/// caller treats it as "no contribution".
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> anyhow::Result<Option<WeatherReport>>;
}
