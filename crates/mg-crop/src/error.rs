use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("invalid crop profile {crop:?}: {reason}")]
    Invalid { crop: String, reason: String },

    #[error("crop name {0:?} defined more than once")]
    DuplicateName(String),

    #[error("soil sample count {got} does not match crop count {expected}")]
    SoilCountMismatch { expected: usize, got: usize },

    #[error("invalid soil range for {what}: {start}..{end}")]
    EmptyRange { what: &'static str, start: f64, end: f64 },

    #[error("crop table must contain at least one crop")]
    Empty,

    #[error("{0} crops exceed the CropId range")]
    TooManyCrops(usize),

    #[error("crop table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CropResult<T> = Result<T, CropError>;
