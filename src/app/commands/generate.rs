//! Index generation: validate every document, fingerprint, install atomically.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::app::AppContext;
use crate::domain::{AppError, Fingerprint, Manifest, ManifestEntry, ValidationReport};
use crate::ports::{DocumentStore, ManifestStore};

use super::validate::{
    DocumentValidator, ValidatedBatch, exit_code_for, print_summary, validate_store,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerateMode {
    /// Write the manifest to its install location.
    #[default]
    Write,
    /// Compare against the installed manifest without writing.
    Check,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Treat warnings as failures.
    pub strict: bool,
    pub mode: GenerateMode,
}

#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    /// New manifest installed.
    Written { manifest: Manifest, report: ValidationReport },
    /// Check mode: installed manifest matches the documents.
    UpToDate { manifest: Manifest, report: ValidationReport },
    /// Check mode: installed manifest is missing or differs.
    Stale { manifest: Manifest, report: ValidationReport },
    /// At least one document failed; nothing was written.
    Rejected { report: ValidationReport, exit_code: i32 },
}

impl GenerateOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateOutcome::Written { .. } | GenerateOutcome::UpToDate { .. } => 0,
            GenerateOutcome::Stale { .. } => 1,
            GenerateOutcome::Rejected { exit_code, .. } => *exit_code,
        }
    }

    pub fn report(&self) -> &ValidationReport {
        match self {
            GenerateOutcome::Written { report, .. }
            | GenerateOutcome::UpToDate { report, .. }
            | GenerateOutcome::Stale { report, .. }
            | GenerateOutcome::Rejected { report, .. } => report,
        }
    }

    /// The freshly computed manifest, unless validation rejected the run.
    pub fn manifest(&self) -> Option<&Manifest> {
        match self {
            GenerateOutcome::Written { manifest, .. }
            | GenerateOutcome::UpToDate { manifest, .. }
            | GenerateOutcome::Stale { manifest, .. } => Some(manifest),
            GenerateOutcome::Rejected { .. } => None,
        }
    }
}

/// Format a generation timestamp as RFC 3339 UTC with microseconds.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn execute<D: DocumentStore, M: ManifestStore>(
    ctx: &AppContext<D, M>,
    validator: &DocumentValidator,
    options: GenerateOptions,
    now: DateTime<Utc>,
) -> Result<GenerateOutcome, AppError> {
    let documents = ctx.documents();
    println!("Scanning and validating {}...", documents.location().display());

    let batch = validate_store(documents, validator)?;
    if batch.report.total() == 0 {
        return Err(AppError::NoDocuments(documents.location().display().to_string()));
    }
    batch.report.emit();

    let exit_code = exit_code_for(&batch.report, options.strict);
    if exit_code != 0 {
        print_summary(&batch.report, options.strict);
        tracing::warn!(
            failed = batch.report.failed_count(),
            total = batch.report.total(),
            manifest = %ctx.manifest().location().display(),
            "validation failed; manifest left untouched"
        );
        return Ok(GenerateOutcome::Rejected { report: batch.report, exit_code });
    }

    let manifest_dir = parent_dir(ctx.manifest().location());
    let manifest =
        build_manifest(&batch, documents.location(), manifest_dir, &timestamp(now))?;
    println!("Repo hash: {}", manifest.repo_hash);

    let report = batch.report;
    match options.mode {
        GenerateMode::Check => {
            if installed_matches(ctx.manifest(), &manifest) {
                println!("✓ {} is up to date", ctx.manifest().location().display());
                Ok(GenerateOutcome::UpToDate { manifest, report })
            } else {
                eprintln!(
                    "✗ {} is out of date; run `appindex generate` to refresh it",
                    ctx.manifest().location().display()
                );
                Ok(GenerateOutcome::Stale { manifest, report })
            }
        }
        GenerateMode::Write => {
            let content = manifest.to_json_bytes()?;
            ctx.manifest().install_manifest(&content)?;
            tracing::info!(
                path = %ctx.manifest().location().display(),
                apps = manifest.entries.len(),
                repo_hash = %manifest.repo_hash,
                "manifest installed"
            );
            println!(
                "Updated {} with {} app(s)",
                ctx.manifest().location().display(),
                manifest.entries.len()
            );
            Ok(GenerateOutcome::Written { manifest, report })
        }
    }
}

/// Build the manifest for an all-valid batch.
///
/// Entries are keyed by declared name; paths are relative to `manifest_dir`.
pub fn build_manifest(
    batch: &ValidatedBatch,
    store_dir: &Path,
    manifest_dir: &Path,
    generated_at: &str,
) -> Result<Manifest, AppError> {
    let mut entries = BTreeMap::new();
    let mut sources: BTreeMap<String, String> = BTreeMap::new();

    for (document, result) in batch.documents.iter().zip(batch.report.documents()) {
        let name = match &result.name {
            Some(name) => name.clone(),
            None => file_stem(&document.file),
        };
        if let Some(first) = sources.insert(name.clone(), document.file.clone()) {
            return Err(AppError::DuplicateName { name, first, second: document.file.clone() });
        }

        let entry = ManifestEntry {
            path: relative_path(&document.path, &document.file, store_dir, manifest_dir),
            fingerprint: Fingerprint::of_bytes(&document.content),
        };
        entries.insert(name, entry);
    }

    Ok(Manifest::new(entries, generated_at))
}

fn installed_matches<M: ManifestStore>(store: &M, manifest: &Manifest) -> bool {
    match store.read_manifest() {
        Ok(Some(content)) => match Manifest::from_json_slice(&content) {
            Ok(installed) => installed.same_content(manifest),
            Err(err) => {
                tracing::warn!(error = %err, "installed manifest is unreadable");
                false
            }
        },
        Ok(None) => false,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read installed manifest");
            false
        }
    }
}

fn file_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new(""))
}

/// Document path relative to the manifest directory, `/`-separated.
///
/// Falls back to `<store dir name>/<file>` when the store is not below it.
fn relative_path(document: &Path, file: &str, store_dir: &Path, manifest_dir: &Path) -> String {
    let document = without_cur_dir(document);
    let base = without_cur_dir(manifest_dir);

    let relative = if base.as_os_str().is_empty() {
        document.is_relative().then_some(document.as_path())
    } else {
        document.strip_prefix(&base).ok()
    };

    match relative {
        Some(relative) => relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
        None => match store_dir.file_name() {
            Some(dir) => format!("{}/{}", dir.to_string_lossy(), file),
            None => file.to_string(),
        },
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components().filter(|component| !matches!(component, Component::CurDir)).collect()
}
