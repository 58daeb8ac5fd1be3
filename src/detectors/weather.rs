use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::extract;
use crate::ui::WeatherCard;
use crate::weather::WeatherProvider;

/// Weather intent. Target city comes from an "in/for/at <city>" phrase,
/// falling back to the trip context, then to the default city.
pub struct WeatherIntent {
    weather: Arc<dyn WeatherProvider>,
}

const DEFAULT_CITY: &str = "Goa";

impl WeatherIntent {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Detector for WeatherIntent {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        input
            .utterance
            .mentions_any(&["weather", "temperature", "rain", "forecast"])
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let city = extract::city_hint(&input.utterance.raw)
            .or_else(|| input.context_city().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        let report = match self.weather.current(&city).await {
            Ok(Some(report)) => report,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = ?e, %city, "weather collaborator failed");
                return Ok(None);
            }
        };
        let fragment = format!(
            "[WEATHER AGENT] Current weather in {city}: {}C, {}. Displayed WeatherCard.\n\
             [INSTRUCTION] Give a warm, friendly comment about the weather. Mention if it's \
             nice for a walk, or better to stay indoors. Avoid generic phrases like \"Check this out\".",
            report.temp, report.condition
        );
        let card = WeatherCard {
            city,
            temp: report.temp,
            condition: report.condition,
            description: report.description,
            humidity: report.humidity,
            wind_speed: report.wind_speed,
        };
        Ok(Some(DomainResult::Weather { fragment, card }))
    }
}
