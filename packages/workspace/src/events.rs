//! Session event and output types.
//!
//! Everything the session reacts to arrives as a [`SessionEvent`] on one
//! mpsc channel: editor-surface interactions, toolbar actions, debounce
//! settles, and completion results. State changes leave as
//! [`SessionOutput`] items on a broadcast channel consumed by connected
//! editor clients.

use scratchpad_document::Language;
use scratchpad_suggest::SuggestError;
use serde::Serialize;

/// Input to the session loop
#[derive(Debug)]
pub enum SessionEvent {
    /// Full text replace from the editor surface, with the cursor position
    /// after the edit
    Edit {
        language: Language,
        text: String,
        cursor: usize,
    },

    /// Cursor activity without a text change (pointer click, key release)
    CursorMoved { language: Language, cursor: usize },

    /// The user picked the suggestion at `index` in the open popover
    SelectSuggestion { index: usize },

    /// The user dismissed the popover
    DismissSuggestions,

    /// Manual run: promote the current buffers immediately, regardless of
    /// pending timers
    RunPreview,

    /// Explicit save of all three buffers
    SaveNow,

    /// Package the project archive, confirming with a notification
    DownloadArchive,

    /// Stop the event loop
    Shutdown,

    // Internal events produced by timers and spawned fetches.
    //
    /// The buffer quiet window elapsed
    BuffersSettled,

    /// The preview composition window elapsed
    ComposePreview,

    /// The suggestion quiet window elapsed; payload is the latest activity
    FetchSuggestions {
        language: Language,
        code: String,
        cursor: usize,
    },

    /// A completion result landed for request `seq`
    CompletionArrived {
        seq: u64,
        language: Language,
        result: Result<Vec<String>, SuggestError>,
    },

    /// Deferred cursor reposition after a suggestion insertion was
    /// committed
    RepositionCursor { language: Language, cursor: usize },
}

/// State pushed to connected editor clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionOutput {
    /// A new preview snapshot was promoted
    Preview { version: u64, document: String },

    /// Suggestion popover contents and visibility
    Suggestions { items: Vec<String>, open: bool },

    /// Whether a completion request is in flight
    Loading { loading: bool },

    /// One non-blocking user notification
    Notification {
        level: NotificationLevel,
        title: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}
