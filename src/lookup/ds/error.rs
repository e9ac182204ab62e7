/// Error type for the fallible edges of the lookup table (configuration).
#[derive(Debug)]
pub enum LookupError {
    /// Configuration file could not be read.
    IoError(String),
    /// Configuration content is malformed.
    ConfigError(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::IoError(msg) => write!(f, "Lookup config io error: {}", msg),
            LookupError::ConfigError(msg) => write!(f, "Lookup config error: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}
