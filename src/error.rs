use crate::fetch::FetchError;

/// Failures the extractors hand back to the serving layer
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fixed header block of a schedule file is missing a field
    #[error("schedule header line {line} has no second field")]
    MalformedHeader { line: usize },

    #[error("invalid css selector {css}: {reason}")]
    Selector { css: &'static str, reason: String },

    #[error("couldn't resolve {path} against {base}: {reason}")]
    InvalidUrl {
        base: String,
        path: String,
        reason: String,
    },
}
