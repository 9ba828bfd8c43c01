//! # Scratchpad Document
//!
//! Buffer model for the playground: one editable buffer per language
//! (HTML, CSS, JavaScript), each carrying its source text and a tracked
//! cursor offset.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: buffers + cursors + splices       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ bundle: buffers → preview document, archive │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: session loop + debounce chains   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Buffers are mutated two ways: a full text replace (direct edit from the
//! editor surface) or a splice at the cursor (suggestion insertion). All
//! offsets are character offsets.

mod buffer;
mod language;
mod project;

pub use buffer::{Buffer, DocumentError};
pub use language::Language;
pub use project::{Project, SEED_CSS, SEED_HTML, SEED_JS};
