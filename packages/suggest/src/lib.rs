//! # Scratchpad Suggest
//!
//! Adapter for the remote code-completion service.
//!
//! The service is an opaque collaborator: it receives the full buffer
//! source, the buffer language, and the cursor offset, and answers with an
//! ordered list of candidate snippets. This crate owns the wire types, the
//! client seam, and the [`SuggestionEngine`] state machine that decides
//! when to fetch, tracks the loading flag, and discards responses that a
//! newer request has superseded.
//!
//! A completion failure is never fatal to the editing session: the engine
//! clears its list and closes, and the caller surfaces one non-blocking
//! notification.

mod client;
mod engine;
mod errors;
mod types;

pub use client::{HttpSuggestionClient, StaticSuggestionClient, SuggestionClient};
pub use engine::{ResponseOutcome, SuggestionEngine};
pub use errors::{SuggestError, SuggestResult};
pub use types::{CompletionRequest, CompletionResponse, Suggestion};
