use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Profile with name {0} already exists")]
    ProfileExists(String),

    #[error("Profile '{0}' does not exist")]
    ProfileNotFound(String),

    #[error("Cannot remove default profile")]
    DefaultProfileNotRemovable,

    #[error("Cannot update default profile")]
    DefaultProfileNotUpdatable,

    /// A listener joined work to a will-create/will-remove event and that work failed.
    #[error("Profile operation vetoed: {0}")]
    Participant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;
