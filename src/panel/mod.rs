//! Chat panel: message log, turn state machine and width.

pub mod chat;
pub mod resize;

pub use chat::{ChatMessage, ChatPanel, PanelView, PendingTurn, Role, SubmitError};
pub use resize::{PointerEvent, ResizeState};
