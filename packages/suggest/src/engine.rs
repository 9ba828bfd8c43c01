//! Suggestion state machine.
//!
//! Owns the candidate list, the popover open flag, the loading flag, and a
//! monotonically increasing request sequence. A response applies only when
//! it carries the latest issued sequence number; anything older was
//! superseded while in flight and is dropped without touching state.

use crate::{SuggestError, Suggestion};

/// Outcome of delivering a completion result to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// Result matched the latest request and replaced the list
    Applied { opened: bool },

    /// Result matched the latest request but the service failed; the list
    /// was cleared and the popover closed
    Failed,

    /// Result was superseded by a newer request and was dropped
    Stale,
}

#[derive(Debug, Default)]
pub struct SuggestionEngine {
    suggestions: Vec<Suggestion>,
    open: bool,
    loading: bool,
    latest_seq: u64,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch policy: never fire for a freshly blank editor (empty or
    /// whitespace-only text with the cursor still at offset zero).
    pub fn should_fetch(code: &str, cursor: usize) -> bool {
        !(code.trim().is_empty() && cursor == 0)
    }

    /// Register a new outbound request and return its sequence number.
    /// Any response still in flight for an earlier number becomes stale.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.loading = true;
        self.latest_seq
    }

    /// Deliver the result for request `seq`.
    pub fn apply_response(
        &mut self,
        seq: u64,
        result: Result<Vec<String>, SuggestError>,
    ) -> ResponseOutcome {
        if seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale completion response (seq {} < {})",
                seq,
                self.latest_seq
            );
            return ResponseOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(texts) => {
                self.suggestions = texts.into_iter().map(|text| Suggestion { text }).collect();
                self.open = !self.suggestions.is_empty();
                ResponseOutcome::Applied { opened: self.open }
            }
            Err(e) => {
                tracing::warn!("Completion request failed: {}", e);
                self.clear();
                ResponseOutcome::Failed
            }
        }
    }

    /// Take the suggestion at `index`, closing the popover. Returns `None`
    /// when the index no longer points at a candidate.
    pub fn select(&mut self, index: usize) -> Option<Suggestion> {
        let selected = self.suggestions.get(index).cloned()?;
        self.clear();
        Some(selected)
    }

    /// Close the popover and drop the candidate list
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.open = false;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Candidate texts in order, for pushing over the wire
    pub fn suggestion_texts(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.text.clone()).collect()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
