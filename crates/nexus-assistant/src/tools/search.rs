use nexus_core::tool::{Error as ToolError, Tool, ToolResult, sole_argument};
use nexus_model::ArgMap;
use reqwest::Client;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

const ENDPOINT: &str = "https://api.duckduckgo.com/";
const NO_RESULT: &str = "No good DuckDuckGo Search Result was found";
const MAX_SNIPPETS: usize = 3;

#[derive(JsonSchema)]
#[allow(dead_code)]
pub struct SearchParameters {
    #[schemars(description = "What to search for.")]
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchPayload {
    #[serde(default)]
    abstract_text: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelatedTopic {
    #[serde(default)]
    text: String,
    #[serde(default)]
    topics: Vec<RelatedTopic>,
}

/// A tool for searching the internet, backed by the DuckDuckGo
/// instant answer API.
pub struct SearchTool {
    parameter_schema: Value,
    client: Client,
}

impl SearchTool {
    /// Creates a new search tool.
    #[inline]
    pub fn new() -> Self {
        SearchTool {
            parameter_schema: schema_for!(SearchParameters).to_value(),
            client: Client::new(),
        }
    }
}

impl Default for SearchTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SearchTool {
    type Input = String;

    fn name(&self) -> &str {
        "internet_search"
    }

    fn description(&self) -> &str {
        "Mencari informasi, tempat, berita, atau fakta di internet."
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
            info!("searching DuckDuckGo: {input}");
            let results = fetch_results(&client, &input)
                .await
                .unwrap_or_else(|err| format!("Error Search: {err}"));
            Ok(results)
        }
    }
}

async fn fetch_results(
    client: &Client,
    query: &str,
) -> Result<String, reqwest::Error> {
    let payload: SearchPayload = client
        .get(ENDPOINT)
        .query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(format_results(&payload))
}

fn format_results(payload: &SearchPayload) -> String {
    let mut snippets = Vec::new();
    if !payload.abstract_text.is_empty() {
        snippets.push(payload.abstract_text.as_str());
    }
    if !payload.answer.is_empty() {
        snippets.push(payload.answer.as_str());
    }
    // Disambiguation entries nest their results one level deeper.
    for topic in &payload.related_topics {
        if !topic.text.is_empty() {
            snippets.push(topic.text.as_str());
        }
        for nested in &topic.topics {
            if !nested.text.is_empty() {
                snippets.push(nested.text.as_str());
            }
        }
    }

    if snippets.is_empty() {
        return NO_RESULT.to_owned();
    }
    snippets.truncate(MAX_SNIPPETS);
    snippets.join(" ")
}
