//! File system errors

use std::path::Path;

use super::WpenvError;

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> WpenvError {
    WpenvError::IoError {
        message: message.into(),
    }
}

/// Creates a relocation failure for a single entry
pub fn move_failed(from: &Path, to: &Path, reason: impl ToString) -> WpenvError {
    WpenvError::RelocationFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: reason.to_string(),
    }
}
