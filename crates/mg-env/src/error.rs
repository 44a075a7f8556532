use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{series} lookup at {key} is outside the sampled range [{min}, {max}]")]
    OutOfRange {
        series: String,
        key:    f64,
        min:    f64,
        max:    f64,
    },

    #[error("{0} table has no samples")]
    EmptyTable(String),

    #[error("{series} table is not strictly ascending at row {row}")]
    Unsorted { series: String, row: usize },

    #[error("{series} table has a non-finite sample at row {row}")]
    NonFinite { series: String, row: usize },

    #[error("invalid boundary policy for {series}: {reason}")]
    InvalidBoundary { series: String, reason: String },

    #[error("environment parse error: {0}")]
    Parse(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EnvResult<T> = Result<T, EnvError>;
