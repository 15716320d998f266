use thiserror::Error;

/// Component model and occurrence enumeration errors
#[derive(Error, Debug)]
pub enum IcalError {
    #[error("Unbounded occurrence set: add a count or cutoff, or use the lazy iterator")]
    UnboundedOccurrences,

    #[error(transparent)]
    CoreError(#[from] koyomi_core::error::CoreError),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
