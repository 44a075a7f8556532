use mg_core::{CropId, Day, MgError};
use mg_env::EnvError;
use mg_growth::GrowthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] MgError),

    /// An environment lookup failed; the whole run is abandoned.
    #[error("environment lookup failed on {day}: {source}")]
    Environment {
        day:    Day,
        #[source]
        source: EnvError,
    },

    /// A crop's growth step failed; the whole run is abandoned.
    #[error("growth of {crop} ({name}) failed on {day}: {source}")]
    Growth {
        crop:   CropId,
        name:   String,
        day:    Day,
        #[source]
        source: GrowthError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
