//! Git error interpretation
//!
//! Turns raw libgit2 failures into the short reasons shown to the user.

use git2::{Error, ErrorClass, ErrorCode};

/// What went wrong with a clone, as far as the user is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RepositoryNotFound,
    AuthenticationFailed,
    PermissionDenied,
    NetworkError,
    CertificateError,
    SslError,
    Other,
}

/// Message fragments checked in order, first match wins
const MESSAGE_PATTERNS: &[(&[&str], FailureKind)] = &[
    (
        &["not found", "404", "too many redirects", "authentication replays"],
        FailureKind::RepositoryNotFound,
    ),
    (
        &["authentication", "credentials"],
        FailureKind::AuthenticationFailed,
    ),
    (
        &["permission denied", "access denied"],
        FailureKind::PermissionDenied,
    ),
    (
        &["connection", "network", "timeout", "timed out", "resolve host"],
        FailureKind::NetworkError,
    ),
];

pub fn classify(err: &Error) -> FailureKind {
    let message = err.message().to_lowercase();

    if err.code() == ErrorCode::Auth {
        return FailureKind::AuthenticationFailed;
    }

    for (needles, kind) in MESSAGE_PATTERNS {
        if needles.iter().any(|needle| message.contains(needle)) {
            return *kind;
        }
    }

    match err.class() {
        ErrorClass::Http if message.contains("certificate") => FailureKind::CertificateError,
        ErrorClass::Http | ErrorClass::Ssl if message.contains("ssl") => FailureKind::SslError,
        _ => FailureKind::Other,
    }
}

/// True when libgit2 cloned the remote but could not find the requested branch
pub fn is_missing_branch(err: &Error, branch: &str) -> bool {
    err.code() == ErrorCode::NotFound
        && (err.class() == ErrorClass::Reference || err.message().contains(branch))
}

/// Interpret a git2 error and provide a user-friendly reason
pub fn interpret_git_error(err: &Error) -> String {
    match classify(err) {
        FailureKind::RepositoryNotFound => "Repository not found".to_string(),
        FailureKind::AuthenticationFailed => "Authentication failed".to_string(),
        FailureKind::PermissionDenied => "Permission denied".to_string(),
        FailureKind::NetworkError => "Network error".to_string(),
        FailureKind::CertificateError => "Certificate error".to_string(),
        FailureKind::SslError => "SSL error".to_string(),
        FailureKind::Other => match err.class() {
            ErrorClass::Http => format!("HTTP error: {}", err.message()),
            ErrorClass::Ssh => format!("SSH error: {}", err.message()),
            _ => err.message().to_string(),
        },
    }
}
