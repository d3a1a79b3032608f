use std::io::{self, Write};

use serde::Serialize;

use crate::app::PipelineReport;
use crate::error::MorphoError;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_report(report: &PipelineReport) -> Result<(), MorphoError> {
        Self::print_json(report)
    }

    fn print_json<T: Serialize>(value: &T) -> Result<(), MorphoError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| MorphoError::Output(err.to_string()))?;
        let mut stdout = io::stdout();
        stdout
            .write_all(json.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|err| MorphoError::Output(err.to_string()))
    }
}
