pub mod controller;
pub mod error;
pub mod prompt;
pub mod session;

pub use controller::{Controller, StepOutcome};
pub use error::WorkflowError;
pub use prompt::{Prompt, PromptOption, Step, NO_DECKS_VALUE};
pub use session::{Session, SessionId, SessionRegistry, SessionState, SESSION_TIMEOUT};
