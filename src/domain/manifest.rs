use std::collections::BTreeMap;

use serde_json::Value;

use super::error::AppError;
use super::fingerprint::Fingerprint;

pub const REPO_HASH_KEY: &str = "repo_hash";
pub const GENERATED_AT_KEY: &str = "generated_at";

/// Index entry for one application: where its document lives and what it hashed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Document path relative to the manifest's directory, `/`-separated.
    pub path: String,
    pub fingerprint: Fingerprint,
}

/// The generated index over all configuration documents.
///
/// On disk this is a single JSON object: `repo_hash`, `generated_at`, and one
/// `"<name>": ["<path>", "<fingerprint>"]` pair per application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub repo_hash: Fingerprint,
    pub generated_at: String,
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Build a manifest from its entries, deriving `repo_hash` from their fingerprints.
    pub fn new(entries: BTreeMap<String, ManifestEntry>, generated_at: impl Into<String>) -> Self {
        let repo_hash = Fingerprint::aggregate(entries.values().map(|entry| &entry.fingerprint));
        Self { repo_hash, generated_at: generated_at.into(), entries }
    }

    /// Whether two manifests describe the same document set, ignoring `generated_at`.
    pub fn same_content(&self, other: &Manifest) -> bool {
        self.repo_hash == other.repo_hash && self.entries == other.entries
    }

    /// Serialize with sorted keys, two-space indentation, and a trailing newline.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, AppError> {
        let mut object: BTreeMap<String, Value> = BTreeMap::new();
        object.insert(REPO_HASH_KEY.to_string(), Value::String(self.repo_hash.to_string()));
        object.insert(GENERATED_AT_KEY.to_string(), Value::String(self.generated_at.clone()));
        for (name, entry) in &self.entries {
            object.insert(
                name.clone(),
                Value::Array(vec![
                    Value::String(entry.path.clone()),
                    Value::String(entry.fingerprint.to_string()),
                ]),
            );
        }

        let mut bytes = serde_json::to_vec_pretty(&object)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn from_json_slice(content: &[u8]) -> Result<Self, AppError> {
        let object: BTreeMap<String, Value> =
            serde_json::from_slice(content).map_err(|err| parse_error(err.to_string()))?;

        let mut repo_hash = None;
        let mut generated_at = None;
        let mut entries = BTreeMap::new();

        for (key, value) in object {
            match key.as_str() {
                REPO_HASH_KEY => repo_hash = Some(expect_string(&key, value)?),
                GENERATED_AT_KEY => generated_at = Some(expect_string(&key, value)?),
                _ => {
                    let entry = parse_entry(&key, value)?;
                    entries.insert(key, entry);
                }
            }
        }

        let repo_hash = repo_hash.ok_or_else(|| parse_error("missing repo_hash"))?;
        let generated_at = generated_at.ok_or_else(|| parse_error("missing generated_at"))?;
        Ok(Self { repo_hash: fingerprint_from(repo_hash)?, generated_at, entries })
    }
}

fn parse_entry(name: &str, value: Value) -> Result<ManifestEntry, AppError> {
    let Value::Array(items) = value else {
        return Err(parse_error(format!("entry '{name}' must be a [path, fingerprint] array")));
    };
    match items.as_slice() {
        [Value::String(path), Value::String(fingerprint)] => Ok(ManifestEntry {
            path: path.clone(),
            fingerprint: fingerprint_from(fingerprint.clone())?,
        }),
        _ => Err(parse_error(format!("entry '{name}' must be a [path, fingerprint] array"))),
    }
}

fn expect_string(key: &str, value: Value) -> Result<String, AppError> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(parse_error(format!("{key} must be a string"))),
    }
}

fn fingerprint_from(value: String) -> Result<Fingerprint, AppError> {
    serde_json::from_value(Value::String(value)).map_err(AppError::from)
}

fn parse_error(details: impl Into<String>) -> AppError {
    AppError::ParseError { what: "manifest".to_string(), details: details.into() }
}
