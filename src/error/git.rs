//! Repository fetch errors

use super::WpenvError;

/// Creates a clone failed error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> WpenvError {
    WpenvError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a branch not found error
pub fn branch_not_found(url: impl Into<String>, branch: impl Into<String>) -> WpenvError {
    WpenvError::GitBranchNotFound {
        url: url.into(),
        branch: branch.into(),
    }
}
