//! Reading and writing challenge documents.
//!
//! Manifests, ground truth, submissions and reports are JSON files. Inputs may
//! also be YAML when the file extension says so. Reports and normalized
//! submissions are always written as two-space-indented JSON followed by a
//! newline.

use circuit_fingerprint_domain::DocumentError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (default)
    Json,
    /// YAML, selected by a `.yaml` or `.yml` extension
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse document contents into an untyped value.
pub fn parse_document(path: &Path, contents: &str) -> Result<Value, DocumentError> {
    let parsed: Result<Value, String> = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| e.to_string())
            .and_then(yaml_to_json),
    };

    parsed.map_err(|reason| DocumentError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse document contents into a typed value.
pub fn parse_typed<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, DocumentError> {
    let value = parse_document(path, contents)?;
    serde_json::from_value(value).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Render a value as pretty JSON terminated by a newline.
pub fn render_json_pretty<T: Serialize>(value: &T) -> Result<String, DocumentError> {
    let mut rendered =
        serde_json::to_string_pretty(value).map_err(|e| DocumentError::Serialize(e.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Read a whole document into an untyped value.
pub async fn read_document(path: &Path) -> Result<Value, DocumentError> {
    let contents = read_contents(path).await?;
    parse_document(path, &contents)
}

/// Read a whole document into a typed value.
pub async fn read_typed<T: DeserializeOwned>(path: &Path) -> Result<T, DocumentError> {
    let contents = read_contents(path).await?;
    parse_typed(path, &contents)
}

/// Write a value as pretty JSON, creating parent directories as needed.
pub async fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), DocumentError> {
    let rendered = render_json_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| DocumentError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, rendered)
        .await
        .map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Wrote document");
    Ok(())
}

/// Convert a YAML tree to JSON, keeping infinite floats as overflowing
/// numbers rather than collapsing them to null.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_infinite() => overflowing_number(f.is_sign_negative())?,
                    Some(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
                    None => Value::Null,
                }
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let Yaml::String(key) = key else {
                    return Err(format!("mapping keys must be strings (got {:?})", key));
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn overflowing_number(negative: bool) -> Result<Value, String> {
    let literal = if negative { "-1e999" } else { "1e999" };
    serde_json::from_str::<serde_json::Number>(literal)
        .map(Value::Number)
        .map_err(|e| e.to_string())
}

async fn read_contents(path: &Path) -> Result<String, DocumentError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = contents.len(), "Read document");
    Ok(contents)
}
