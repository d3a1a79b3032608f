use neuromorpho_compare::domain::RawRecord;
use neuromorpho_compare::error::MorphoError;
use neuromorpho_compare::neuromorpho::PageClient;

/// Scripted outcome for one page index.
pub enum PageScript {
    Records(Vec<RawRecord>),
    Empty,
    NoCollection,
    Status(u16),
    Transport,
}

/// Page client that replays a fixed script; pages past the script's end
/// behave like the service's end-of-data response.
pub struct ScriptedClient {
    pub script: Vec<PageScript>,
}

impl PageClient for ScriptedClient {
    fn fetch_page(&self, page: usize, _size: usize) -> Result<Option<Vec<RawRecord>>, MorphoError> {
        match self.script.get(page) {
            Some(PageScript::Records(records)) => Ok(Some(records.clone())),
            Some(PageScript::Empty) => Ok(Some(Vec::new())),
            Some(PageScript::NoCollection) | None => Ok(None),
            Some(PageScript::Status(status)) => Err(MorphoError::Status {
                status: *status,
                page,
            }),
            Some(PageScript::Transport) => Err(MorphoError::Transport {
                page,
                message: "connection reset".to_string(),
            }),
        }
    }
}

/// A record that passes every inclusion filter, with a volume value.
pub fn hippocampal_mouse(name: &str, strain: &str, volume: f64) -> RawRecord {
    RawRecord {
        neuron_id: None,
        neuron_name: Some(name.to_string()),
        species: Some("mouse".to_string()),
        strain: Some(strain.to_string()),
        age_classification: Some("adult".to_string()),
        experiment_condition: vec!["Control".to_string()],
        brain_region: vec!["hippocampus".to_string()],
        volume: Some(volume.to_string()),
        surface: None,
        soma_surface: None,
    }
}
