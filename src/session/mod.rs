mod controller;
mod state;

pub use controller::{SessionController, SessionError};
pub use state::{SessionState, SEARCH_FAILED_MESSAGE};
