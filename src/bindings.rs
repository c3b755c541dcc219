//! Parsing of `--bindings` values into the render context.
//!
//! Three forms are accepted:
//! - `key=value`, split once on the first `=` so values may contain `=`
//! - `@path.json`, `@path.yaml` or `@path.yml`, merging a file's top-level object
//! - an inline JSON object such as `{"replicas": 3}`

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::path::Path;

/// Ordered binding mapping. Later keys overwrite earlier ones in place.
pub type Bindings = IndexMap<String, Value>;

/// Accumulates raw binding strings and materializes them as one mapping.
#[derive(Debug, Default)]
pub struct BindingsParser {
    parsed: Bindings,
}

impl BindingsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores one raw binding.
    ///
    /// # Arguments
    /// * `raw` - A `key=value` pair, an `@file` reference or a JSON object
    ///
    /// # Returns
    /// * `Result<()>` - An error naming the offending input if it is malformed
    pub fn add(&mut self, raw: &str) -> Result<()> {
        let bindings = if let Some(path) = raw.strip_prefix('@') {
            parse_file(Path::new(path))?
        } else if let Some(bindings) = parse_json(raw)? {
            bindings
        } else {
            parse_pair(raw)?
        };

        for (key, value) in bindings {
            debug!("Adding binding: {key}");
            self.parsed.insert(key, value);
        }
        Ok(())
    }

    /// Returns the accumulated bindings. No entries yields an empty mapping.
    pub fn parse(&self) -> Bindings {
        self.parsed.clone()
    }
}

/// Builds a [`Bindings`] mapping from a list of raw strings.
pub fn parse_bindings<I, S>(raw: I) -> Result<Bindings>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = BindingsParser::new();
    for binding in raw {
        parser.add(binding.as_ref())?;
    }
    Ok(parser.parse())
}

fn parse_pair(raw: &str) -> Result<Bindings> {
    let (key, value) = raw.split_once('=').ok_or_else(|| Error::MalformedBinding {
        binding: raw.to_string(),
        reason: "expected the form key=value".to_string(),
    })?;
    if key.trim().is_empty() {
        return Err(Error::MalformedBinding {
            binding: raw.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    let mut bindings = Bindings::new();
    bindings.insert(key.to_string(), Value::String(value.to_string()));
    Ok(bindings)
}

/// Returns `Ok(None)` when `raw` is not JSON so it can be tried as a pair.
fn parse_json(raw: &str) -> Result<Option<Bindings>> {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map.into_iter().collect())),
        Ok(_) => Err(Error::MalformedBinding {
            binding: raw.to_string(),
            reason: "expected JSON data to be an object".to_string(),
        }),
        Err(_) => Ok(None),
    }
}

fn parse_file(path: &Path) -> Result<Bindings> {
    let file_error = |reason: String| Error::BindingFile { path: path.to_path_buf(), reason };

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if !matches!(extension, "json" | "yaml" | "yml") {
        return Err(file_error("file does not appear to be JSON or YAML".to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let value: Value = match extension {
        "json" => serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))?,
        _ => serde_yaml::from_str(&content).map_err(|e| file_error(e.to_string()))?,
    };

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(file_error("expected the top level to be a mapping".to_string())),
    }
}
