/// Failures the export layer can produce.
///
/// Parsing never fails; malformed input degrades to placeholder values
/// instead, so only the export operations return `Result`.
#[derive(Debug)]
pub enum ExportError {
    InvalidOptions(String),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::InvalidOptions(msg) => write!(f, "Invalid export options: {msg}"),
            ExportError::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err)
    }
}
