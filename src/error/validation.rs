use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid keywords: {keywords}")]
    InvalidKeywords { keywords: String },
    #[error("no keywords selected")]
    NoKeywords,
    #[error("Invalid percentile '{value}': {source}")]
    InvalidPercentile {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
