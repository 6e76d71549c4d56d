//! Error types for quarry operations.
//!
//! Dispatch errors (`UnsupportedVariant`, `NotApplicable`, `MalformedVisitable`)
//! are fatal to a run. Placement errors (`ArtifactWrite`, `MissingResults`) are
//! recovered where they occur and only recorded.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for quarry operations.
pub type QuarryResult<T> = Result<T, QuarryError>;

/// Main error type for all quarry operations.
#[derive(Error, Debug)]
pub enum QuarryError {
    /// The visitor has no handler for the visitable's format.
    #[error("{visitor} is not yet applicable to {visitable}; add a handler for it to the visitor")]
    UnsupportedVariant { visitor: String, visitable: String },

    /// The visitor recognizes the format but refuses to process it.
    #[error("{visitor} cannot be applied to {visitable}")]
    NotApplicable { visitor: String, visitable: String },

    /// A visitable tag outside the closed set of formats.
    #[error("Malformed visitable: {0}")]
    MalformedVisitable(String),

    /// No visitables were resolved from the input.
    #[error("No visitable input")]
    EmptyInput,

    /// Writing one output artifact failed.
    #[error("Cannot create file {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output placement was requested before any results existed.
    #[error("No results tree to write")]
    MissingResults,

    /// Path query could not be parsed.
    #[error("Query error at position {position}: {message}")]
    Query { message: String, position: usize },

    /// Document content could not be parsed.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid regular expression.
    #[error("Pattern error: {0}")]
    Regex(#[from] regex::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Results could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Dispatch (DSP_xxx)
    DspUnsupported,
    DspNotApplicable,
    DspMalformed,

    // Input (IN_xxx)
    InEmpty,

    // Output (OUT_xxx)
    OutWriteFailed,
    OutMissingResults,

    // Query (QRY_xxx)
    QryInvalid,
    QryPattern,

    // Parse (PARSE_xxx)
    ParseHtml,
    ParseXml,
    ParseImage,
    ParsePdf,

    // Configuration
    Config,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DspUnsupported => "DSP_001",
            ErrorCode::DspNotApplicable => "DSP_002",
            ErrorCode::DspMalformed => "DSP_003",
            ErrorCode::InEmpty => "IN_001",
            ErrorCode::OutWriteFailed => "OUT_001",
            ErrorCode::OutMissingResults => "OUT_002",
            ErrorCode::QryInvalid => "QRY_001",
            ErrorCode::QryPattern => "QRY_002",
            ErrorCode::ParseHtml => "PARSE_001",
            ErrorCode::ParseXml => "PARSE_002",
            ErrorCode::ParseImage => "PARSE_003",
            ErrorCode::ParsePdf => "PARSE_004",
            ErrorCode::Config => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl QuarryError {
    /// Create an unsupported-variant error.
    pub fn unsupported(visitor: impl Into<String>, visitable: impl Into<String>) -> Self {
        Self::UnsupportedVariant {
            visitor: visitor.into(),
            visitable: visitable.into(),
        }
    }

    /// Create a not-applicable error.
    pub fn not_applicable(visitor: impl Into<String>, visitable: impl Into<String>) -> Self {
        Self::NotApplicable {
            visitor: visitor.into(),
            visitable: visitable.into(),
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>, position: usize) -> Self {
        Self::Query {
            message: message.into(),
            position,
        }
    }

    /// Create a parse error with the given code.
    pub fn parse(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Parse {
            message: message.into(),
            code,
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an artifact write error.
    pub fn artifact_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArtifactWrite {
            path: path.into(),
            source,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVariant { .. } => ErrorCode::DspUnsupported,
            Self::NotApplicable { .. } => ErrorCode::DspNotApplicable,
            Self::MalformedVisitable(_) => ErrorCode::DspMalformed,
            Self::EmptyInput => ErrorCode::InEmpty,
            Self::ArtifactWrite { .. } => ErrorCode::OutWriteFailed,
            Self::MissingResults => ErrorCode::OutMissingResults,
            Self::Query { .. } => ErrorCode::QryInvalid,
            Self::Regex(_) => ErrorCode::QryPattern,
            Self::Parse { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::Config,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error must end the run.
    ///
    /// Output placement failures are recorded and skipped instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::EmptyInput | Self::ArtifactWrite { .. } | Self::MissingResults
        )
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnsupportedVariant { .. } => {
                Some("Choose a visitor that handles this format or narrow the input extensions")
            }
            Self::Query { .. } => Some("Check the query syntax, e.g. //p[@class='x']/text()"),
            Self::EmptyInput => Some("Check the input path and --extensions filter"),
            _ => None,
        }
    }
}
