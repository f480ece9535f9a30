use crate::landing::error::LandingError;
use crate::sink::error::SinkError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LakeError {
    #[error(transparent)]
    Landing(#[from] LandingError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Failed to create directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
