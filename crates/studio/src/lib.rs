//! Studio shell state: tabs, upload flow, and the bridge to the editor.

pub mod app;
pub mod bridge;
pub mod upload;
pub mod widgets;

pub use app::{Effect, Message, StudioState, StudioTab};
pub use bridge::{BridgeError, EditorBridge, spawn_editor_worker};
pub use upload::{UploadError, UploadReceipt, UploadResult, UploadService};
