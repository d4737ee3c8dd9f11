pub mod gate;
pub mod record_editor;
pub mod session;

pub use gate::{GateModal, GateOutcome, GateState};
pub use record_editor::{CancelOutcome, EditorMode, RecordEditor, SaveOutcome, UpdateOutcome};
pub use session::{DraftView, EditorSession, SessionStore};
