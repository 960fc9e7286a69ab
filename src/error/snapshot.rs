//! Snapshot restore errors

use super::WpenvError;

/// Creates a snapshot restore failed error
pub fn restore_failed(name: impl Into<String>, reason: impl ToString) -> WpenvError {
    WpenvError::SnapshotRestoreFailed {
        name: name.into(),
        reason: reason.to_string(),
    }
}
