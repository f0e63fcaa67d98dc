use thiserror::Error;

#[derive(Error, Debug)]
pub enum IcefrontError {
    #[error("invalid configuration, {0}")]
    Config(&'static str),

    #[error("{0}")]
    Profile(#[from] ProfileError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a single ground-track profile can't be processed.
///
/// These never abort a batch; the affected profile is reported with
/// absent features instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unrecognized direction code {0}")]
    UnknownDirection(u8),

    #[error("unrecognized mask code {code} at sample {index}")]
    UnknownMask { index: usize, code: u8 },

    #[error("non-finite delta_time at sample {0}")]
    NonFiniteTime(usize),

    #[error("'{field}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}
