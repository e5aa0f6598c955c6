use thiserror::Error;

use crate::messaging::MessagingError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
    #[error("reset broadcast failed: {0}")]
    Broadcast(#[from] MessagingError),
}
