mod editor;
mod session_state;

pub use editor::Editor;
pub use session_state::{CompletionRecord, SessionState};
