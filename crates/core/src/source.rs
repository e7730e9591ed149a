//! Reading records and mappings from files or stdin.
//!
//! Records may be a JSON array of objects or JSON Lines (one object per
//! line, blank lines skipped).

use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{GantryError, GantryResult};
use crate::mapping::FieldMapping;
use crate::record::RawRecord;

/// Read records from a file.
pub fn load_records(path: &Path) -> GantryResult<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|e| GantryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_records(std::io::BufReader::new(file), &path.display().to_string())
}

/// Read records from stdin.
pub fn read_stdin_records() -> GantryResult<Vec<RawRecord>> {
    let stdin = std::io::stdin();
    parse_records(stdin.lock(), "stdin")
}

/// Parse records from a reader. `origin` names the source in errors.
pub fn parse_records<R: BufRead>(mut reader: R, origin: &str) -> GantryResult<Vec<RawRecord>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| GantryError::Io {
            path: PathBuf::from(origin),
            source: e,
        })?;

    if text.trim_start().starts_with('[') {
        parse_array(&text, origin)
    } else {
        parse_lines(&text, origin)
    }
}

fn parse_array(text: &str, origin: &str) -> GantryResult<Vec<RawRecord>> {
    let values: Vec<Value> = serde_json::from_str(text).map_err(|e| GantryError::Parse {
        origin: origin.to_string(),
        line: e.line(),
        reason: e.to_string(),
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::Object(map) => Ok(RawRecord::from(map)),
            _ => Err(GantryError::InvalidElement {
                origin: origin.to_string(),
                index: i + 1,
            }),
        })
        .collect()
}

fn parse_lines(text: &str, origin: &str) -> GantryResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line).map_err(|e| GantryError::Parse {
            origin: origin.to_string(),
            line: line_num + 1,
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(map) => records.push(RawRecord::from(map)),
            _ => {
                return Err(GantryError::InvalidRecord {
                    origin: origin.to_string(),
                    line: line_num + 1,
                });
            }
        }
    }
    Ok(records)
}

/// Read a field mapping from a JSON file.
pub fn load_mapping(path: &Path) -> GantryResult<FieldMapping> {
    let text = std::fs::read_to_string(path).map_err(|e| GantryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| GantryError::InvalidMapping {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
