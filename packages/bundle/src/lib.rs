//! # Scratchpad Bundle
//!
//! Composition layer: turns the three buffers into the artifacts the
//! playground ships.
//!
//! - the sandboxed preview document (CSS in a head style block, HTML
//!   verbatim in the body, JS in a module script block), served with a
//!   script-only sandbox policy
//! - the downloadable project archive (a linked `index.html` wrapper plus
//!   the raw stylesheet and script)
//!
//! Buffer contents are embedded verbatim; this layer never interprets or
//! rewrites user code.

mod archive;
mod preview;

pub use archive::{write_archive, BundleError, ARCHIVE_FILE_NAME};
pub use preview::{compose_document, linked_document, SANDBOX_CSP};
