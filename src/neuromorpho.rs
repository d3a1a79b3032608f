use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::domain::RawRecord;
use crate::error::MorphoError;

pub const DEFAULT_BASE_URL: &str = "https://neuromorpho.org/api/neuron";

/// Field inside the JSON envelope that holds the page's record array.
const EMBEDDED_FIELD: &str = "_embedded";
const COLLECTION_FIELD: &str = "neuronResources";

/// Fetches one page of records from the remote collection endpoint.
///
/// `Ok(None)` means the response carried no embedded collection, which the
/// service uses as its end-of-data signal. Retry and stop policy belong to
/// the collector, not here.
pub trait PageClient {
    fn fetch_page(&self, page: usize, size: usize) -> Result<Option<Vec<RawRecord>>, MorphoError>;
}

#[derive(Clone)]
pub struct NeuroMorphoHttpClient {
    client: Client,
    base_url: String,
}

impl NeuroMorphoHttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MorphoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("nm-compare/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MorphoError::ClientBuild(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| MorphoError::ClientBuild(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl PageClient for NeuroMorphoHttpClient {
    fn fetch_page(&self, page: usize, size: usize) -> Result<Option<Vec<RawRecord>>, MorphoError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("size", size.to_string()), ("page", page.to_string())])
            .send()
            .map_err(|err| MorphoError::Transport {
                page,
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MorphoError::Status {
                status: status.as_u16(),
                page,
            });
        }

        let body: Value = response.json().map_err(|err| MorphoError::Decode {
            page,
            message: err.to_string(),
        })?;

        extract_page(&body, page)
    }
}

/// Pulls the record array out of the page envelope. A 200 response without
/// the embedded collection is a normal end-of-data signal, not an error.
pub fn extract_page(body: &Value, page: usize) -> Result<Option<Vec<RawRecord>>, MorphoError> {
    let Some(items) = body
        .get(EMBEDDED_FIELD)
        .and_then(|v| v.get(COLLECTION_FIELD))
    else {
        return Ok(None);
    };
    let items = items.as_array().ok_or_else(|| MorphoError::Decode {
        page,
        message: format!("{COLLECTION_FIELD} is not an array"),
    })?;
    Ok(Some(items.iter().map(extract_record).collect()))
}

/// Maps one envelope entry to a [`RawRecord`]. The service is loose about
/// shapes: list-valued fields may arrive as scalars and morphometrics as
/// either numbers or numeric strings, so everything is read defensively
/// and unknown fields are ignored.
pub fn extract_record(item: &Value) -> RawRecord {
    RawRecord {
        neuron_id: item.get("neuron_id").and_then(|v| v.as_u64()),
        neuron_name: string_field(item, "neuron_name"),
        species: string_field(item, "species"),
        strain: string_field(item, "strain"),
        age_classification: string_field(item, "age_classification"),
        experiment_condition: string_list_field(item, "experiment_condition"),
        brain_region: string_list_field(item, "brain_region"),
        volume: numeric_text_field(item, "volume"),
        surface: numeric_text_field(item, "surface"),
        soma_surface: numeric_text_field(item, "soma_surface"),
    }
}

fn string_field(item: &Value, field: &str) -> Option<String> {
    item.get(field)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

fn string_list_field(item: &Value, field: &str) -> Vec<String> {
    match item.get(field) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str())
            .map(|v| v.to_string())
            .collect(),
        Some(Value::String(value)) => vec![value.clone()],
        _ => Vec::new(),
    }
}

/// Morphometric fields keep their raw text form; coercion to f64 is the
/// metric pipeline's job and failures there drop the value silently.
fn numeric_text_field(item: &Value, field: &str) -> Option<String> {
    match item.get(field) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(Value::Number(value)) => Some(value.to_string()),
        _ => None,
    }
}
