use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreadcrumbError {
    #[error("Invalid number of arguments for {function}: expected {expected}, got {actual}")]
    InvalidArity {
        function: String,
        expected: usize,
        actual: usize,
    },
    #[error("Malformed range: end index {end} smaller than start index {start}")]
    MalformedRange { start: i64, end: i64 },
    #[error("Type mismatch in {function}: expected {expected}, found {found}")]
    TypeMismatch {
        function: String,
        expected: &'static str,
        found: String,
    },
    #[error("Read error: {0}")]
    Read(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Wiring error: {0}")]
    Wiring(String),
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, BreadcrumbError>;

// Helper conversions
impl From<serde_json::Error> for BreadcrumbError {
    fn from(e: serde_json::Error) -> Self {
        Self::Read(e.to_string())
    }
}
impl From<regex::Error> for BreadcrumbError {
    fn from(e: regex::Error) -> Self {
        Self::Read(e.to_string())
    }
}
impl From<config::ConfigError> for BreadcrumbError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
