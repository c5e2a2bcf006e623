use thiserror::Error;

use crate::data::{CategoryKey, EventId};

/// Errors raised when a request against the event store or the UI state
/// machines cannot be carried out.
#[derive(Debug, Error)]
pub enum TimestoryError {
    #[error("An event with id {0} already exists.")]
    DuplicateEventId(EventId),

    #[error("No event with id {0} exists.")]
    EventNotFound(EventId),

    #[error("The event description is empty.")]
    EmptyDescription,

    #[error("The category label is empty.")]
    EmptyCategoryLabel,

    #[error("The category \"{0}\" does not exist.")]
    UnknownCategory(CategoryKey),

    #[error(
        "The category \"{requested}\" would use the key \"{key}\", which is already taken by \
         \"{existing}\"."
    )]
    CategoryKeyCollision { key: CategoryKey, existing: String, requested: String },

    #[error("A confirmation is already pending.")]
    DialogBusy,

    #[error("Action {index} of the batch was rejected: {source}")]
    ActionRejected {
        index: usize,
        #[source]
        source: Box<TimestoryError>,
    },

    #[error("Invalid timeline configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not parse timeline configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type TimestoryResult<T> = Result<T, TimestoryError>;
