use std::io;

use thiserror::Error;

/// Failures while reading an installer descriptor.
///
/// A missing descriptor is not an error: it is reported as
/// [`Report::NotPresent`](crate::model::report::Report::NotPresent). The
/// descriptor path is attached by the caller as context.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot open file")]
    Open(#[source] io::Error),

    #[error("not a valid property list")]
    Malformed(#[source] plist::Error),

    #[error("top level is not a dictionary")]
    NotADictionary,

    #[error("missing key \"{key}\"")]
    MissingKey { key: String },

    #[error("key \"{key}\" is not a {expected}")]
    UnexpectedType { key: String, expected: &'static str },
}
