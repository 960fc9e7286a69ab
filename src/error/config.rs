//! Configuration errors

use super::WpenvError;

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> WpenvError {
    WpenvError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> WpenvError {
    WpenvError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config value error
pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> WpenvError {
    WpenvError::ConfigInvalid {
        key: key.into(),
        reason: reason.into(),
    }
}
