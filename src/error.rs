use thiserror::Error;

/// Everything that can go wrong while scanning into, extracting from or
/// encoding an [`Optional`](crate::Optional).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("value is not present")]
    NotPresent,
    #[error("invalid destination: {0}")]
    InvalidDestination(String),
    #[error("unsupported destination: cannot scan {wire} into {destination}")]
    UnsupportedDestination {
        wire: &'static str,
        destination: &'static str,
    },
    #[error("value {value} is out of range for {destination}")]
    Range {
        value: String,
        destination: &'static str,
    },
    #[error("value {value} cannot be represented as {destination} without losing precision")]
    PrecisionLoss {
        value: String,
        destination: &'static str,
    },
    #[error("cannot parse {input:?} as {destination}")]
    Parse {
        input: String,
        destination: &'static str,
    },
    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    pub(crate) fn range(value: impl ToString, destination: &'static str) -> Self {
        Self::Range { value: value.to_string(), destination }
    }
    pub(crate) fn parse(input: impl Into<String>, destination: &'static str) -> Self {
        Self::Parse { input: input.into(), destination }
    }
}

// Helper conversions at the driver boundary
impl From<ScanError> for rusqlite::types::FromSqlError {
    fn from(e: ScanError) -> Self {
        Self::Other(Box::new(e))
    }
}
impl From<ScanError> for rusqlite::Error {
    fn from(e: ScanError) -> Self {
        Self::ToSqlConversionFailure(Box::new(e))
    }
}
