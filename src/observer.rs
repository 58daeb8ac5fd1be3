//! Time/fatigue/weather observer layer.
//!
//! Live turns get a real-time block (wall-clock bucket, fatigue estimate,
//! current weather with heat/rain advisories). Future-planning turns
//! suppress all of that: a plan for day 1 assumes a fresh morning start,
//! not "right now".

use std::sync::Arc;

use chrono::{DateTime, Local, Timelike};
use tracing::warn;

use crate::detect::TurnInput;
use crate::weather::WeatherProvider;

/// Heat advisory threshold in °C.
const HEAT_ALERT_ABOVE: i32 = 30;

/// History length beyond which the user is assumed to be flagging.
const FATIGUE_TURNS: usize = 15;

/// Bucket a wall-clock hour into a display label.
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        12..=15 => "Afternoon (Likely Hot)",
        16..=18 => "Evening (Golden Hour)",
        h if h >= 19 => "Night",
        _ => "Morning",
    }
}

/// True when the turn is planning a future trip rather than asking about
/// the present moment.
pub fn is_future_plan(lower: &str) -> bool {
    (lower.contains("plan") || lower.contains("trip") || lower.contains("vacation"))
        && lower.contains("days")
}

pub struct Observer {
    weather: Arc<dyn WeatherProvider>,
}

impl Observer {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    /// Render the observer block for one turn. `city` is the live-weather
    /// target (trip context, else the detected trusted city).
    pub async fn describe(
        &self,
        input: &TurnInput,
        history_len: usize,
        city: Option<&str>,
        now: DateTime<Local>,
    ) -> String {
        let lower = &input.utterance.lower;
        let future_plan = is_future_plan(lower);
        let mut out = if future_plan {
            "[PLANNING CONTEXT]\nThis is a FUTURE trip plan. Ignore current real-time. \
             Assume Day 1 starts in the Morning (9:00 AM). User is Fresh (Not tired)."
                .to_string()
        } else {
            let tired = lower.contains("tired")
                || lower.contains("walking")
                || history_len > FATIGUE_TURNS;
            format!(
                "[REAL-TIME OBSERVER]\nTime: {} ({}).\nUser Fatigue: {}.",
                now.format("%H:%M:%S"),
                time_of_day(now.hour()),
                if tired {
                    "HIGH -> Suggest Low Energy Activities"
                } else {
                    "NORMAL"
                }
            )
        };

        let Some(city) = city else { return out };
        match self.weather.current(city).await {
            Ok(Some(report)) => {
                if future_plan {
                    out.push_str(&format!(
                        "\n(Reference Only) Current Weather in {city}: {}°C, {}.",
                        report.temp, report.condition
                    ));
                } else {
                    out.push_str(&format!(
                        "\nWeather in {city}: {}°C, {}.",
                        report.temp, report.condition
                    ));
                    if report.temp > HEAT_ALERT_ABOVE {
                        out.push_str(" (HEAT ALERT: Prioritize AC/Shade)");
                    }
                    if report.condition.to_lowercase().contains("rain") {
                        out.push_str(" (RAIN ALERT: Prioritize Indoors)");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = ?e, %city, "observer weather lookup failed"),
        }
        out
    }
}
