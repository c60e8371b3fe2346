use thiserror::Error;

/// Result type alias using TariffWatchError
pub type Result<T> = std::result::Result<T, TariffWatchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by the CLI exit-code mapping,
/// by log events and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Normalization / diff
    /// A row had no usable HTS code
    MalformedRow,
    /// Two snapshots were produced by different normalizer schema versions
    SchemaMismatch,
    InvalidInput,

    // Outer layers
    /// Configuration file missing or invalid
    Config,
    /// The tabular export could not be read or parsed
    Export,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedRow => "ERR_MALFORMED_ROW",
            ExErrorKind::SchemaMismatch => "ERR_SCHEMA_MISMATCH",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Export => "ERR_EXPORT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind plus the context an operator needs for triage:
/// the operation and the offending row verbatim.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    row: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            row: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Attach the offending row, rendered verbatim
    pub fn with_row(mut self, row: impl Into<String>) -> Self {
        self.row = Some(row.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn row(&self) -> Option<&str> {
        self.row.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(row) = &self.row {
            write!(f, " (row: {})", row)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the normalization and diff kernel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TariffWatchError {
    /// A row had no usable HTS code; `row` is the row rendered verbatim
    #[error("Malformed row, no usable HTS code: {row}")]
    MalformedRow { row: String },

    /// Snapshots produced by different normalizer schema versions
    #[error("Snapshot schema mismatch: previous schema v{previous}, current schema v{current}")]
    SchemaMismatch { previous: u32, current: u32 },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<TariffWatchError> for ExError {
    fn from(err: TariffWatchError) -> Self {
        match err {
            TariffWatchError::MalformedRow { row } => ExError::new(ExErrorKind::MalformedRow)
                .with_op("normalize_row")
                .with_row(row)
                .with_message("row has no usable HTS code"),

            TariffWatchError::SchemaMismatch { previous, current } => {
                ExError::new(ExErrorKind::SchemaMismatch)
                    .with_op("ensure_comparable")
                    .with_message(format!(
                        "previous snapshot uses schema v{}, current uses v{}",
                        previous, current
                    ))
            }

            TariffWatchError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for TariffWatchError {
    fn from(err: serde_json::Error) -> Self {
        TariffWatchError::Serialization {
            message: err.to_string(),
        }
    }
}
