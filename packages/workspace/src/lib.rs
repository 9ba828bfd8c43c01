//! # Scratchpad Workspace
//!
//! The orchestrating service for the playground. Owns the session event
//! loop that wires the buffers, the persistence adapter, the preview
//! pipeline, and the completion adapter together, plus the HTTP surface
//! that serves the sandboxed preview and streams session state to editor
//! clients.
//!
//! ## Synchronization pipeline
//!
//! ```text
//! edit ──▶ buffer ──500ms──▶ settle ──▶ save all buffers
//!                               │
//!                               └──250ms──▶ preview snapshot
//!
//! cursor activity ──750ms──▶ completion fetch ──▶ suggestion popover
//! ```
//!
//! A manual run bypasses the timers and promotes the current buffers as
//! one atomic snapshot. Superseded timers are aborted, never queued; a
//! superseded completion response is discarded by sequence number when it
//! lands.

pub mod config;
pub mod debounce;
pub mod events;
pub mod server;
pub mod session;

pub use config::SyncDelays;
pub use debounce::Debouncer;
pub use events::{NotificationLevel, SessionEvent, SessionOutput};
pub use session::{PaneView, PlaygroundSession, SessionHandle, SharedView};
