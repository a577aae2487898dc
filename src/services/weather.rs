use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::state::preferences::TemperatureUnit;
use crate::utils::datetime::format_forecast_date;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const FORECAST_DAYS: u8 = 3;

/// Client for the weatherapi.com forecast endpoint.
#[derive(Clone)]
pub struct WeatherService {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub condition: Condition,
    pub temp_c: f64,
    pub temp_f: f64,
    pub humidity: f64,
    pub wind_kph: f64,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    #[serde(rename = "forecastday")]
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaySummary {
    pub condition: Condition,
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
}

impl WeatherService {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        client: reqwest::Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches current conditions plus a 3-day forecast. `query` is a city
    /// name or a "lat,lon" pair from a shared location.
    pub async fn forecast(&self, query: &str) -> Result<WeatherReport> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("weather API key not configured"))?;

        let url = format!("{}/forecast.json", self.base_url);
        let days = FORECAST_DAYS.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("key", api_key),
                ("days", days.as_str()),
                ("aqi", "yes"),
                ("alerts", "yes"),
            ])
            .send()
            .await
            .context("weather request failed")?
            .error_for_status()
            .context("weather provider returned an error status")?;

        response
            .json::<WeatherReport>()
            .await
            .context("failed to decode weather response")
    }
}

fn condition_emoji(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    if condition.contains("rain") {
        "🌧️"
    } else if condition.contains("cloud") {
        "☁️"
    } else if condition.contains("snow") {
        "❄️"
    } else if condition.contains("storm") || condition.contains("thunder") {
        "⛈️"
    } else if condition.contains("fog") || condition.contains("mist") {
        "🌫️"
    } else {
        "☀️"
    }
}

fn aqi_status(index: u8) -> &'static str {
    if index <= 2 {
        "Good 👍"
    } else if index <= 4 {
        "Moderate 👌"
    } else {
        "Poor 👎"
    }
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Renders a report for display, leading with the user's preferred unit.
pub fn format_report(report: &WeatherReport, unit: TemperatureUnit) -> String {
    let current = &report.current;
    let temp = match unit {
        TemperatureUnit::Celsius => format!("{:.1}°C ({:.1}°F)", current.temp_c, current.temp_f),
        TemperatureUnit::Fahrenheit => format!("{:.1}°F ({:.1}°C)", current.temp_f, current.temp_c),
    };

    let mut out = format!(
        "🌡️ Weather in {}, {}\n\n\
         🌡️ Temperature: {}\n\
         {} Condition: {}\n\
         💧 Humidity: {}%\n\
         💨 Wind: {} km/h\n",
        report.location.name,
        report.location.country,
        temp,
        condition_emoji(&current.condition.text),
        current.condition.text,
        current.humidity,
        current.wind_kph,
    );

    if let Some(index) = current.air_quality.as_ref().and_then(|aq| aq.us_epa_index) {
        out.push_str(&format!("🌬️ Air Quality: {}\n", aqi_status(index)));
    }

    out.push_str("\n3-Day Forecast:\n");
    for day in &report.forecast.days {
        let (max, min, suffix) = match unit {
            TemperatureUnit::Celsius => (day.day.maxtemp_c, day.day.mintemp_c, "°C"),
            TemperatureUnit::Fahrenheit => (
                celsius_to_fahrenheit(day.day.maxtemp_c),
                celsius_to_fahrenheit(day.day.mintemp_c),
                "°F",
            ),
        };
        out.push_str(&format!(
            "• {}: {} {}, Max: {:.1}{}, Min: {:.1}{}\n",
            format_forecast_date(&day.date),
            condition_emoji(&day.day.condition.text),
            day.day.condition.text,
            max,
            suffix,
            min,
            suffix,
        ));
    }

    out
}

/// Fixed apology shown when the provider fails or the city is unknown.
pub fn unavailable_message(query: &str) -> String {
    format!(
        "Sorry, I couldn't fetch the weather for '{query}'. \
         Please check the spelling or try another location."
    )
}

/// Shown when no API key is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Weather lookups are not configured. Ask the bot operator to set WEATHER_API_KEY.";
