use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which spreadsheet an error refers to. User-facing messages name the first
/// sheet "Excel" and the mapping sheet "VOCI Excel".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetKind {
    Feature,
    Voci,
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feature => write!(f, "Excel"),
            Self::Voci => write!(f, "VOCI Excel"),
        }
    }
}

/// Error taxonomy for one cross-reference request. Every variant is terminal:
/// processing aborts at the first failure and the message is surfaced to the
/// user verbatim.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MatchError {
    #[error("Missing file(s)")]
    MissingInput,

    #[error("Error reading {kind} file: {message}")]
    SheetParse { kind: SheetKind, message: String },

    #[error("Column '{column}' not found in the {kind} file.")]
    MissingColumn { kind: SheetKind, column: String },

    #[error("Error reading Word file: {message}")]
    DocumentParse { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl MatchError {
    pub fn sheet_parse(kind: SheetKind, message: impl Into<String>) -> Self {
        Self::SheetParse {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_column(kind: SheetKind, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            kind,
            column: column.into(),
        }
    }

    pub fn document_parse(message: impl Into<String>) -> Self {
        Self::DocumentParse {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput => "MISSING_INPUT",
            Self::SheetParse { .. } => "SHEET_PARSE_ERROR",
            Self::MissingColumn { .. } => "SCHEMA_ERROR",
            Self::DocumentParse { .. } => "DOCUMENT_PARSE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingInput => 400,
            Self::SheetParse { .. } => 422,
            Self::MissingColumn { .. } => 422,
            Self::DocumentParse { .. } => 422,
            Self::Validation { .. } => 400,
            Self::Storage { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<MatchError> for ErrorResponse {
    fn from(error: MatchError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
        }
    }
}

impl From<std::io::Error> for MatchError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<handlebars::RenderError> for MatchError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::internal(error.to_string())
    }
}
