use async_trait::async_trait;
use marga_rs::{WeatherProvider, WeatherReport};
use serde::Deserialize;
use tracing::warn;

/// OpenWeather current-conditions gateway (metric units).
///
/// A missing API key or a non-success status degrades to `None`; the
/// engine treats both as "no contribution".
pub struct OpenWeather {
    http: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u32,
}

#[derive(Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
}

#[derive(Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

impl OpenWeather {
    pub fn new(base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            api_key,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeather {
    async fn current(&self, city: &str) -> anyhow::Result<Option<WeatherReport>> {
        let Some(key) = &self.api_key else {
            warn!("OPENWEATHER_API_KEY missing; weather lookups disabled");
            return Ok(None);
        };
        let url = format!("{}/weather", self.base);
        let resp = self
            .http
            .get(&url)
            .query(&[("q", city), ("units", "metric"), ("appid", key)])
            .send()
            .await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), %city, "weather api error");
            return Ok(None);
        }
        let body: OwmResponse = resp.json().await?;
        let Some(condition) = body.weather.first() else {
            return Ok(None);
        };
        Ok(Some(WeatherReport {
            temp: body.main.temp.round() as i32,
            condition: condition.main.clone(),
            description: condition.description.clone(),
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        }))
    }
}
