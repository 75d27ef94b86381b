// Error types
// Internal failures are resolved to neutral scores inside the engine; the
// boundary variants are only returned by request validation and table setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("text contains no extractable sentences or words")]
    EmptyOrDegenerateInput,

    #[error("tokenization failed: {0}")]
    TokenizationFailure(String),

    #[error("score combination failed: {0}")]
    CombinerFailure(String),

    #[error("invalid signal pattern `{pattern}`: {source}")]
    InvalidSignal {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("signal weight {0} is outside [-1, 1]")]
    WeightOutOfRange(f64),

    #[error("invalid weight profile: {0}")]
    InvalidProfile(String),

    #[error("input text is empty")]
    InputEmpty,

    #[error("input has {len} characters, the limit is {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("batch of {0} texts is outside the accepted range {min}..={max}", min = crate::models::BATCH_MIN_TEXTS, max = crate::models::BATCH_MAX_TEXTS)]
    BatchSize(usize),
}

pub type Result<T> = std::result::Result<T, DetectionError>;
