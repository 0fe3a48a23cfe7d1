use thiserror::Error;

/// Failure classes of the load/analyze stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    FileNotFound,
    Io,
    ParseError,
    MissingColumn,
    TypeError,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table: {message}")]
    Parse { message: String },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidValue {
        column: String,
        value: String,
        line: u64,
    },

    #[error("{total} is out of range")]
    TotalOutOfRange { total: String },
}

impl AnalysisError {
    pub fn kind(&self) -> AnalysisErrorKind {
        match self {
            AnalysisError::FileNotFound { .. } => AnalysisErrorKind::FileNotFound,
            AnalysisError::Unreadable { .. } => AnalysisErrorKind::Io,
            AnalysisError::Parse { .. } => AnalysisErrorKind::ParseError,
            AnalysisError::MissingColumn { .. } => AnalysisErrorKind::MissingColumn,
            AnalysisError::InvalidValue { .. } | AnalysisError::TotalOutOfRange { .. } => {
                AnalysisErrorKind::TypeError
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            AnalysisErrorKind::FileNotFound => "Check the --input path",
            AnalysisErrorKind::Io => "Check the input file permissions",
            AnalysisErrorKind::ParseError => "Make sure the input is comma-separated text",
            AnalysisErrorKind::MissingColumn => {
                "The header row needs Product, Quantity and Price columns"
            }
            AnalysisErrorKind::TypeError => "Quantity must be an integer and Price a decimal number",
        }
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::Parse {
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Rendering error: {message}")]
    RenderError { message: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ReportError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::IoError(_) => "Check that the output directory exists and is writable",
            ReportError::ConfigError { .. } => "Check the style file is valid TOML",
            ReportError::InvalidConfigValueError { .. } => {
                "Fix the reported value or remove it to use the default"
            }
            ReportError::RenderError { .. } => "Re-run with --verbose for details",
            ReportError::Analysis(err) => err.recovery_suggestion(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_kinds() {
        let missing = AnalysisError::MissingColumn {
            column: "Price".to_string(),
        };
        assert_eq!(missing.kind(), AnalysisErrorKind::MissingColumn);
        assert_eq!(missing.to_string(), "Missing required column: Price");

        let invalid = AnalysisError::InvalidValue {
            column: "Quantity".to_string(),
            value: "two".to_string(),
            line: 3,
        };
        assert_eq!(invalid.kind(), AnalysisErrorKind::TypeError);
        assert_eq!(invalid.to_string(), "Invalid Quantity value \"two\" on line 3");
    }

    #[test]
    fn test_wrapped_analysis_error_keeps_message() {
        let err: ReportError = AnalysisError::FileNotFound {
            path: "sales_data.csv".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "File not found: sales_data.csv");
        assert_eq!(err.recovery_suggestion(), "Check the --input path");
    }
}
