use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad tolerance, malformed state code, etc.).
    ConfigValidation(String),
    /// A source address does not match the required grammar. Fatal for the
    /// whole run: no partial output is written.
    AddressParse { value: String },
    /// Required input column absent from a source file.
    MissingColumn { source: String, column: String },
    /// IO error (file read/write, CSV decode).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::AddressParse { value } => {
                write!(f, "failed to parse address: {value:?}")
            }
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
