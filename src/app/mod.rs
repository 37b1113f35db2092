//! Host adapter: document, suggestion popup and the plugin that wires host
//! events to the kernel.

pub mod document;
pub mod plugin;
pub mod popup;

pub use document::Document;
pub use plugin::{EventOutcome, Plugin};
pub use popup::{place, Horizontal, Placement, PopupEntry, PopupView, Vertical, Viewport};
