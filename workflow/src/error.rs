use store::StoreError;
use thiserror::Error;

use crate::session::SessionId;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("No active session: {0}")]
    StaleSession(SessionId),

    #[error("Invalid choice for the current step: {choice}")]
    InvalidChoice { choice: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
