//! Configuration document vocabulary: field names, supported sources, path rules.

use std::fmt;

/// Fields every configuration document must declare.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "url", "pattern", "download_dir"];

/// Fields holding filesystem paths that must stay relative.
pub const PATH_FIELDS: [&str; 2] = ["download_dir", "symlink_dir"];

/// Fields holding regular expressions.
pub const PATTERN_FIELDS: [&str; 2] = ["pattern", "version_pattern"];

/// Manifest keys that share the namespace with application names.
pub const RESERVED_NAMES: [&str; 2] = ["repo_hash", "generated_at"];

/// Checksum algorithms accepted in the object form of `checksum`.
pub const CHECKSUM_ALGORITHMS: [&str; 3] = ["sha256", "sha512", "md5"];

/// Extension of configuration documents in the document store.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Source-code hosting platform an application is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourcePlatform {
    GitHub,
    GitLab,
    SourceForge,
}

impl SourcePlatform {
    pub const ALL: [SourcePlatform; 3] =
        [SourcePlatform::GitHub, SourcePlatform::GitLab, SourcePlatform::SourceForge];

    /// Registrable domain of the platform.
    pub fn domain(self) -> &'static str {
        match self {
            SourcePlatform::GitHub => "github.com",
            SourcePlatform::GitLab => "gitlab.com",
            SourcePlatform::SourceForge => "sourceforge.net",
        }
    }

    /// Value used by the `source_type` field.
    pub fn source_type(self) -> &'static str {
        match self {
            SourcePlatform::GitHub => "github",
            SourcePlatform::GitLab => "gitlab",
            SourcePlatform::SourceForge => "sourceforge",
        }
    }

    /// Identify the platform serving `host`; subdomains count (`www.github.com`).
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|platform| {
            let domain = platform.domain();
            host == domain
                || host.strip_suffix(domain).is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn from_source_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.source_type() == value)
    }

    /// Comma-separated list of supported domains, for error messages.
    pub fn supported_domains() -> String {
        Self::ALL.iter().map(|platform| platform.domain()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_type())
    }
}

/// Whether `value` names an absolute location rather than a path under the
/// updater's base directory.
///
/// Covers POSIX roots, home-relative `~` paths, backslash roots, and Windows
/// drive prefixes, independent of the host platform.
pub fn is_absolute_path(value: &str) -> bool {
    if value.starts_with('/') || value.starts_with('\\') || value.starts_with('~') {
        return true;
    }
    let mut chars = value.chars();
    matches!((chars.next(), chars.next()), (Some(drive), Some(':')) if drive.is_ascii_alphabetic())
}

/// Whether an application name sticks to the portable character set.
pub fn is_portable_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
