use std::fmt;

/// A single problem found in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Document field the problem refers to, when it is tied to one.
    pub field: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(field: Option<&str>, message: impl Into<String>) -> Self {
        Self { field: field.map(str::to_string), message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Validation result for one configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// File name inside the document store (e.g. `FreeCAD.json`).
    pub file: String,
    /// Application name declared by the document, when one could be read.
    pub name: Option<String>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl DocumentResult {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into(), name: None, errors: Vec::new(), warnings: Vec::new() }
    }

    pub fn push_error(&mut self, field: Option<&str>, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(field, message));
    }

    pub fn push_warning(&mut self, field: Option<&str>, message: impl Into<String>) {
        self.warnings.push(Diagnostic::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of validating every document in a store during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    documents: Vec<DocumentResult>,
}

impl ValidationReport {
    pub fn push(&mut self, result: DocumentResult) {
        self.documents.push(result);
    }

    /// Every document result, in enumeration order.
    pub fn documents(&self) -> &[DocumentResult] {
        &self.documents
    }

    pub fn document(&self, file: &str) -> Option<&DocumentResult> {
        self.documents.iter().find(|result| result.file == file)
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|result| !result.is_valid())
    }

    pub fn total(&self) -> usize {
        self.documents.len()
    }

    pub fn passed_count(&self) -> usize {
        self.documents.iter().filter(|result| result.is_valid()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn error_count(&self) -> usize {
        self.documents.iter().map(|result| result.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.documents.iter().map(|result| result.warnings.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.documents.iter().any(|result| !result.is_valid())
    }

    pub fn has_warnings(&self) -> bool {
        self.documents.iter().any(|result| !result.warnings.is_empty())
    }

    /// Print per-document status to stdout and every diagnostic to stderr.
    pub fn emit(&self) {
        for result in &self.documents {
            if result.is_valid() {
                println!("  ✓ {}", result.file);
            } else {
                println!("  ✗ {}", result.file);
            }
        }
        for result in &self.documents {
            for diagnostic in &result.errors {
                eprintln!("[ERROR] {}: {}", result.file, diagnostic);
            }
        }
        for result in &self.documents {
            for diagnostic in &result.warnings {
                eprintln!("[WARN] {}: {}", result.file, diagnostic);
            }
        }
    }
}
