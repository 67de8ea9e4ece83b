//! Record loading.
//!
//! Records are a JSON array of objects. The table never inspects them
//! beyond what column key paths read.

use std::path::{Path, PathBuf};

/// Reads a JSON array of records from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or is not an
/// array at the top level.
pub fn load_records(path: &Path) -> Result<Vec<serde_json::Value>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let records = parse_records(&text)?;
    tracing::info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Parses a JSON array of records.
///
/// # Errors
///
/// Returns an error if the text is not JSON or not an array.
pub fn parse_records(text: &str) -> Result<Vec<serde_json::Value>, DataError> {
    match serde_json::from_str::<serde_json::Value>(text)? {
        serde_json::Value::Array(items) => Ok(items),
        other => Err(DataError::NotAnArray(kind(&other))),
    }
}

fn kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Data loading error.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// File could not be read.
    #[error("Failed to read data file {path}: {message}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },

    /// File is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is not an array.
    #[error("expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_array() {
        let records = parse_records(r#"[{"name": "Ann"}, {"name": "Bo"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_object() {
        let err = parse_records(r#"{"name": "Ann"}"#).unwrap_err();
        assert!(matches!(err, DataError::NotAnArray("object")));
        assert_eq!(
            err.to_string(),
            "expected a JSON array of records, found object"
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_records("[{"), Err(DataError::Json(_))));
    }

    #[test]
    fn load_missing_file() {
        let err = load_records(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
    }
}
