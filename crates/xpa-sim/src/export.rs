use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use xpa_core::{AssignError, ErrorInfo};

use crate::simulate::AssignmentTable;

fn serde_error(code: &str, err: impl ToString) -> AssignError {
    AssignError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with recursively sorted keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, AssignError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Restores a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, AssignError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-read", err))
}

/// CSV with an `identifier,<key>` header.
pub fn to_csv_bytes(table: &AssignmentTable) -> Result<Vec<u8>, AssignError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(["identifier", table.key.as_str()])
        .map_err(|err| serde_error("csv-header", err))?;
    for row in &table.rows {
        writer
            .write_record([row.identifier.as_str(), row.label.as_str()])
            .map_err(|err| serde_error("csv-row", err))?;
    }
    writer
        .into_inner()
        .map_err(|err| serde_error("csv-flush", err))
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), AssignError> {
    let io_error = |code: &str, err: std::io::Error| {
        AssignError::Io(
            ErrorInfo::new(code, "failed to write output")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| io_error("output-dir", err))?;
    }
    fs::write(path, bytes).map_err(|err| io_error("output-write", err))
}
