use chrono::NaiveDate;
use edulead::config::OutputConfig;
use edulead::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::Path;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Reads a JSON document from `path`, or from stdin when no path is given.
pub(crate) fn read_json_input<T: DeserializeOwned>(path: Option<&Path>) -> Result<T, AppError> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            read_json(io::BufReader::new(file))
        }
        None => read_json(io::stdin().lock()),
    }
}

pub(crate) fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, AppError> {
    Ok(serde_json::from_reader(reader)?)
}

pub(crate) fn write_json<T: Serialize, W: Write>(
    mut writer: W,
    value: &T,
    output: &OutputConfig,
) -> Result<(), AppError> {
    if output.pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

pub(crate) fn emit<T: Serialize>(value: &T, output: &OutputConfig) -> Result<(), AppError> {
    write_json(io::stdout().lock(), value, output)
}
