use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const ALGORITHM_PREFIX: &str = "sha256:";

/// Content fingerprint rendered as `sha256:<64 lowercase hex digits>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of exact byte content.
    pub fn of_bytes(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self::from_digest(&hasher.finalize())
    }

    /// Aggregate fingerprint over a set of fingerprints.
    ///
    /// The inputs are sorted and joined with `\n` before hashing, so the
    /// result does not depend on enumeration order.
    pub fn aggregate<'a, I>(fingerprints: I) -> Self
    where
        I: IntoIterator<Item = &'a Fingerprint>,
    {
        let mut values: Vec<&str> = fingerprints.into_iter().map(Fingerprint::as_str).collect();
        values.sort_unstable();
        Self::of_bytes(values.join("\n").as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(digest: &[u8]) -> Self {
        let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
        Self(format!("{ALGORITHM_PREFIX}{hex}"))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
