use nexus_core::tool::{Error as ToolError, Tool, ToolResult, sole_argument};
use nexus_model::ArgMap;
use reqwest::Client;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
// Nominatim's usage policy requires a stable, identifying user agent.
const USER_AGENT: &str = "my_ai_nexus_app";
const NOT_FOUND: &str = "Lokasi tidak ditemukan di peta.";

#[derive(JsonSchema)]
#[allow(dead_code)]
pub struct GeocodeParameters {
    #[schemars(description = "Name of the place or city to locate.")]
    location: String,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// A tool for resolving a place name to map coordinates, backed by
/// the Nominatim search endpoint.
///
/// On a hit the result embeds a `[MAP:<lat>,<lon>,<location>]` tag
/// that the web client parses out of the final answer to render a
/// map; the surrounding text instructs the model to keep the tag.
pub struct GeocodeTool {
    parameter_schema: Value,
    client: Client,
}

impl GeocodeTool {
    /// Creates a new geocoding tool.
    #[inline]
    pub fn new() -> Self {
        GeocodeTool {
            parameter_schema: schema_for!(GeocodeParameters).to_value(),
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for GeocodeTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GeocodeTool {
    type Input = String;

    fn name(&self) -> &str {
        "get_coordinates"
    }

    fn description(&self) -> &str {
        "Mendapatkan koordinat peta (latitude/longitude) dari nama \
         tempat/kota."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn bind(&self, arguments: ArgMap) -> Result<String, ToolError> {
        Ok(sole_argument(&arguments))
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: String,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let client = self.client.clone();
        async move {
            info!("looking up coordinates: {input}");
            let result = fetch_coordinates(&client, &input)
                .await
                .unwrap_or_else(|err| format!("Error Map: {err}"));
            Ok(result)
        }
    }
}

async fn fetch_coordinates(
    client: &Client,
    location: &str,
) -> Result<String, reqwest::Error> {
    let places: Vec<Place> = client
        .get(ENDPOINT)
        .query(&[("q", location), ("format", "json"), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(format_place(location, places.first()))
}

fn format_place(location: &str, place: Option<&Place>) -> String {
    let Some(place) = place else {
        return NOT_FOUND.to_owned();
    };
    format!(
        "Koordinat {location} ditemukan: Lat {lat}, Lon {lon}. \
         INSTRUKSI PENTING: Di akhir jawabanmu, WAJIB sertakan tag ini \
         persis: [MAP:{lat},{lon},{location}]",
        lat = place.lat,
        lon = place.lon,
    )
}
