//! Error types for memosource

use std::fmt;

/// Result type alias for value source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Failures a value source can hit while producing a value
#[derive(Debug)]
pub enum SourceError {
    /// Key is not an absolute URL
    MalformedUrl(String),

    /// URL scheme other than http or https
    UnsupportedScheme(String),

    /// Request failed to connect, timed out or broke mid-flight
    Http(reqwest::Error),

    /// HTTP client could not be constructed
    Client(reqwest::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::MalformedUrl(url) => write!(f, "Malformed URL: {:?}", url),
            SourceError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported URL scheme: {}", scheme)
            }
            SourceError::Http(e) => write!(f, "HTTP error: {}", e),
            SourceError::Client(e) => write!(f, "Failed to build HTTP client: {}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Http(e) | SourceError::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SourceError::UnsupportedScheme("file".to_string());
        assert_eq!(err.to_string(), "Unsupported URL scheme: file");

        let err = SourceError::MalformedUrl("htt//".to_string());
        assert_eq!(err.to_string(), "Malformed URL: \"htt//\"");
    }
}
