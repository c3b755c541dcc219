use log::warn;
use minijinja::{value::Value, ErrorKind};
use regex::Regex;
use sha2::{Digest, Sha256};

pub use cruet::case::{kebab::to_kebab_case, snake::to_snake_case};

/// Longest name a DNS label may carry.
const DNS_LABEL_MAX_LEN: usize = 63;

/// Custom regex filter for template processing.
///
/// Tests if a string matches a given regular expression pattern. An invalid
/// pattern logs a warning and never matches.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Turns an arbitrary string into a valid RFC 1123 label: lowercase
/// alphanumerics and `-`, no leading or trailing `-`, at most 63 characters.
pub fn dns_label(val: &str) -> String {
    let mut label = String::with_capacity(val.len());
    for c in val.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            label.push(c);
        } else if !label.ends_with('-') {
            label.push('-');
        }
    }
    let label = label.trim_matches('-');
    let label = &label[..label.len().min(DNS_LABEL_MAX_LEN)];
    label.trim_end_matches('-').to_string()
}

/// Hex encoded SHA-256 digest, useful for checksum annotations.
pub fn sha256(val: &str) -> String {
    hex::encode(Sha256::digest(val.as_bytes()))
}

/// Serializes a value as compact JSON, handy for inline flow values.
pub fn to_json(value: Value) -> Result<String, minijinja::Error> {
    serde_json::to_string(&value).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value cannot be serialized as JSON")
            .with_source(e)
    })
}

/// Serializes a value as a YAML block without the trailing newline.
pub fn to_yaml(value: Value) -> Result<String, minijinja::Error> {
    let yaml = serde_yaml::to_string(&value).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "value cannot be serialized as YAML")
            .with_source(e)
    })?;
    Ok(yaml.trim_end_matches('\n').to_string())
}
