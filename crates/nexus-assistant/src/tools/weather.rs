use nexus_core::tool::{Tool, ToolResult};
use reqwest::Client;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

const ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
const MISSING_KEY: &str = "Error: API Key Cuaca belum disetting.";

#[derive(Deserialize, JsonSchema)]
pub struct WeatherParameters {
    #[schemars(description = "Name of the city to check.")]
    city: String,
}

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    main: Option<WeatherReadings>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherReadings {
    temp: f64,
    humidity: f64,
}

/// A tool for checking the current weather of a city, backed by the
/// OpenWeatherMap current weather endpoint.
pub struct WeatherTool {
    parameter_schema: Value,
    client: Client,
    api_key: Option<String>,
}

impl WeatherTool {
    /// Creates a new weather tool.
    ///
    /// Without an API key the tool stays registered and reports the
    /// missing credential as its result.
    #[inline]
    pub fn new(api_key: Option<String>) -> Self {
        WeatherTool {
            parameter_schema: schema_for!(WeatherParameters).to_value(),
            client: Client::new(),
            api_key,
        }
    }
}

impl Tool for WeatherTool {
    type Input = WeatherParameters;

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Cek cuaca saat ini berdasarkan nama kota."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: WeatherParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        async move {
            let Some(api_key) = api_key else {
                return Ok(MISSING_KEY.to_owned());
            };
            info!("checking weather for: {}", input.city);
            let report = fetch_report(&client, &api_key, &input.city)
                .await
                .unwrap_or_else(|err| format!("Error Cuaca: {err}"));
            Ok(report)
        }
    }
}

async fn fetch_report(
    client: &Client,
    api_key: &str,
    city: &str,
) -> Result<String, reqwest::Error> {
    let resp = client
        .get(ENDPOINT)
        .query(&[("q", city), ("appid", api_key), ("units", "metric")])
        .send()
        .await?;
    let success = resp.status().is_success();
    let payload: WeatherPayload = resp.json().await?;
    Ok(format_report(city, success, &payload))
}

fn format_report(
    city: &str,
    success: bool,
    payload: &WeatherPayload,
) -> String {
    if success {
        if let Some(readings) = &payload.main {
            if let Some(condition) = payload.weather.first() {
                return format!(
                    "Laporan Cuaca {city}: {}, Suhu: {}°C, \
                     Kelembaban: {}%",
                    condition.description, readings.temp, readings.humidity
                );
            }
        }
    }
    format!(
        "Gagal mengambil cuaca: {}",
        payload.message.as_deref().unwrap_or("unknown error")
    )
}
