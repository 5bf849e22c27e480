// SPDX-License-Identifier: GPL-3.0-only

//! Errors and diagnostics produced while loading layouts and configs.
//!
//! Loading is permissive: [`Severity::Warning`] issues travel with the
//! loaded value in a [`ParseResult`], while any [`Severity::Error`] issue
//! aborts the load with [`ParseError::ValidationError`].

use std::fmt;

/// How bad a [`ValidationIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The layout cannot be used
    Error,
    /// The layout loads but probably does not do what its author meant
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// One problem found in a layout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Where in the file, e.g. `rows[2].keys[0].width`
    pub field_path: String,
    pub message: String,
    /// How to fix it
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            severity,
            field_path: field_path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn warning(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, field_path)
    }

    pub fn error(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, field_path)
    }

    /// Attaches a fix-it hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.field_path, self.message)?;
        match &self.hint {
            Some(hint) => write!(f, " ({})", hint),
            None => Ok(()),
        }
    }
}

/// Why a layout or config file could not be loaded.
///
/// Every variant remembers the file it came from once one is known.
#[derive(Debug)]
pub enum ParseError {
    /// The file could not be read
    IoError {
        path: Option<String>,
        source: std::io::Error,
    },
    /// The file is not valid JSON, or does not have the expected shape
    JsonError {
        path: Option<String>,
        source: serde_json::Error,
    },
    /// The file parsed but contains at least one fatal issue
    ValidationError {
        path: Option<String>,
        issues: Vec<ValidationIssue>,
    },
}

impl ParseError {
    pub fn io_error(source: std::io::Error) -> Self {
        Self::IoError { path: None, source }
    }

    pub fn io_error_with_path(source: std::io::Error, path: impl Into<String>) -> Self {
        Self::IoError {
            path: Some(path.into()),
            source,
        }
    }

    pub fn json_error(source: serde_json::Error) -> Self {
        Self::JsonError { path: None, source }
    }

    pub fn json_error_with_path(source: serde_json::Error, path: impl Into<String>) -> Self {
        Self::JsonError {
            path: Some(path.into()),
            source,
        }
    }

    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError { path: None, issues }
    }

    /// Fills in the file path if the error does not carry one yet.
    pub fn with_path(mut self, file: &str) -> Self {
        let slot = match &mut self {
            ParseError::IoError { path, .. }
            | ParseError::JsonError { path, .. }
            | ParseError::ValidationError { path, .. } => path,
        };
        if slot.is_none() {
            *slot = Some(file.to_string());
        }
        self
    }

    /// The file the error came from, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::IoError { path, .. }
            | ParseError::JsonError { path, .. }
            | ParseError::ValidationError { path, .. } => path.as_deref(),
        }
    }

    /// Line of a JSON error, as reported by serde_json.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::JsonError { source, .. } => Some(source.line()),
            _ => None,
        }
    }

    /// A short hint on how to fix the error.
    pub fn hint(&self) -> &'static str {
        match self {
            ParseError::IoError { .. } => "check that the file exists and is readable",
            ParseError::JsonError { .. } => "check the JSON syntax around the reported line",
            ParseError::ValidationError { .. } => "fix the listed errors, warnings alone do not block loading",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path() {
            write!(f, "{}: ", path)?;
        }
        match self {
            ParseError::IoError { source, .. } => write!(f, "cannot read file: {}", source)?,
            ParseError::JsonError { source, .. } => write!(f, "invalid JSON: {}", source)?,
            ParseError::ValidationError { issues, .. } => {
                let errors = issues.iter().filter(|issue| issue.is_error()).count();
                write!(f, "{} validation error(s)", errors)?;
                for issue in issues {
                    write!(f, "\n  - {}", issue)?;
                }
            }
        }
        write!(f, "\n  hint: {}", self.hint())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            ParseError::ValidationError { .. } => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

/// A loaded value plus the warnings found while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    pub layout: T,
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    pub fn new(layout: T) -> Self {
        Self::with_warnings(layout, Vec::new())
    }

    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Drops the warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}
