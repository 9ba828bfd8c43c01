//! # Playground Session
//!
//! The orchestrator. A single-threaded event loop owns the three buffers,
//! the suggestion engine, the debounce chains, and the persistence wiring;
//! every state transition happens on one event at a time. Timers and
//! in-flight completion requests are the only concurrent activity, and
//! both resolve by sending an event back into the loop.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit ⇄ Settle → Save + Preview
//!         │
//!         └─ Cursor activity → Fetch → Suggestions → Insert
//! ```
//!
//! Startup loads all three buffers from the store (seed defaults on a
//! miss) before any save or preview wiring runs, so persisted state is
//! authoritative and placeholder values never leak downstream.

use std::sync::{Arc, RwLock};

use tokio::sync::{broadcast, mpsc};

use scratchpad_bundle::{compose_document, write_archive, ARCHIVE_FILE_NAME};
use scratchpad_common::{load_state, save_state, KeyValueStore};
use scratchpad_document::{Language, Project};
use scratchpad_suggest::{CompletionRequest, ResponseOutcome, SuggestionClient, SuggestionEngine};

use crate::config::SyncDelays;
use crate::debounce::Debouncer;
use crate::events::{NotificationLevel, SessionEvent, SessionOutput};

/// One pane as the server and tests observe it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneView {
    pub text: String,
    pub cursor: usize,
}

/// Read-side view of the session, shared with the HTTP surface.
///
/// `preview_document` only ever changes when a snapshot is promoted
/// (settled or manually run), never mid-keystroke.
#[derive(Debug, Clone, Default)]
pub struct SharedView {
    pub html: PaneView,
    pub css: PaneView,
    pub js: PaneView,
    pub preview_document: String,
    pub preview_version: u64,
}

impl SharedView {
    pub fn pane(&self, language: Language) -> &PaneView {
        match language {
            Language::Html => &self.html,
            Language::Css => &self.css,
            Language::Javascript => &self.js,
        }
    }

    fn pane_mut(&mut self, language: Language) -> &mut PaneView {
        match language {
            Language::Html => &mut self.html,
            Language::Css => &mut self.css,
            Language::Javascript => &mut self.js,
        }
    }
}

/// Cheap cloneable handle for driving a running session
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
    outputs: broadcast::Sender<SessionOutput>,
    view: Arc<RwLock<SharedView>>,
}

impl SessionHandle {
    /// Enqueue an event. Sends after shutdown are dropped.
    pub fn send(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionOutput> {
        self.outputs.subscribe()
    }

    pub fn view(&self) -> SharedView {
        self.view.read().unwrap().clone()
    }
}

pub struct PlaygroundSession {
    project: Project,
    engine: SuggestionEngine,
    store: Arc<dyn KeyValueStore>,
    client: Arc<dyn SuggestionClient>,

    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    outputs: broadcast::Sender<SessionOutput>,
    view: Arc<RwLock<SharedView>>,

    settle: Debouncer<SessionEvent>,
    suggest: Debouncer<SessionEvent>,
    compose: Debouncer<SessionEvent>,

    /// Pane the user last interacted with; suggestion insertion targets it
    active: Language,
    loaded: bool,
}

impl PlaygroundSession {
    pub fn new(store: Arc<dyn KeyValueStore>, client: Arc<dyn SuggestionClient>) -> Self {
        Self::with_delays(store, client, SyncDelays::default())
    }

    pub fn with_delays(
        store: Arc<dyn KeyValueStore>,
        client: Arc<dyn SuggestionClient>,
        delays: SyncDelays,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outputs, _) = broadcast::channel(64);

        Self {
            project: Project::seeded(),
            engine: SuggestionEngine::new(),
            store,
            client,
            settle: Debouncer::new(delays.settle, events_tx.clone()),
            suggest: Debouncer::new(delays.suggest, events_tx.clone()),
            compose: Debouncer::new(delays.compose, events_tx.clone()),
            events_tx,
            events_rx,
            outputs,
            view: Arc::new(RwLock::new(SharedView::default())),
            active: Language::Html,
            loaded: false,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            events: self.events_tx.clone(),
            outputs: self.outputs.clone(),
            view: self.view.clone(),
        }
    }

    /// Load persisted buffers, then process events until shutdown
    pub async fn run(mut self) {
        self.load();

        while let Some(event) = self.events_rx.recv().await {
            match event {
                SessionEvent::Shutdown => break,
                event => self.handle_event(event),
            }
        }

        tracing::info!("Session stopped");
    }

    fn load(&mut self) {
        for language in Language::ALL {
            let stored = load_state(
                self.store.as_ref(),
                language.storage_key(),
                Project::seed(language).to_string(),
            );
            self.project.buffer_mut(language).set_text(stored);
        }
        self.loaded = true;
        self.sync_view();

        // The first snapshot goes through the normal settle chain, so the
        // preview only ever shows settled state.
        self.settle.schedule(SessionEvent::BuffersSettled);
        tracing::info!("Session loaded");
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Edit {
                language,
                text,
                cursor,
            } => {
                let buffer = self.project.buffer_mut(language);
                buffer.set_text(text);
                buffer.set_cursor(cursor);
                self.active = language;
                self.sync_view();

                self.settle.schedule(SessionEvent::BuffersSettled);
                self.schedule_suggest(language);
            }

            SessionEvent::CursorMoved { language, cursor } => {
                self.project.buffer_mut(language).set_cursor(cursor);
                self.active = language;
                self.sync_view();
                self.schedule_suggest(language);
            }

            SessionEvent::BuffersSettled => {
                self.save_all();
                self.compose.schedule(SessionEvent::ComposePreview);
            }

            SessionEvent::ComposePreview => {
                self.promote_preview();
            }

            SessionEvent::RunPreview => {
                // The pending composition, if any, is superseded by this
                // newer snapshot.
                self.compose.cancel();
                self.promote_preview();
                self.notify(
                    NotificationLevel::Info,
                    "Preview updated",
                    "The live preview has been refreshed.",
                );
            }

            SessionEvent::FetchSuggestions {
                language,
                code,
                cursor,
            } => self.fetch_suggestions(language, code, cursor),

            SessionEvent::CompletionArrived {
                seq,
                language,
                result,
            } => self.finish_fetch(seq, language, result),

            SessionEvent::SelectSuggestion { index } => self.apply_suggestion(index),

            SessionEvent::RepositionCursor { language, cursor } => {
                self.project.buffer_mut(language).set_cursor(cursor);
                self.sync_view();
                // Fresh cursor activity from the new offset; may chain into
                // another completion fetch.
                self.schedule_suggest(language);
            }

            SessionEvent::DismissSuggestions => {
                self.engine.clear();
                self.publish_suggestions();
            }

            SessionEvent::SaveNow => {
                self.save_all();
                self.notify(
                    NotificationLevel::Info,
                    "Code saved",
                    "Your code has been stored for the next visit.",
                );
            }

            SessionEvent::DownloadArchive => self.package_archive(),

            // Handled in run()
            SessionEvent::Shutdown => {}
        }
    }

    fn schedule_suggest(&mut self, language: Language) {
        let buffer = self.project.buffer(language);
        self.suggest.schedule(SessionEvent::FetchSuggestions {
            language,
            code: buffer.text().to_string(),
            cursor: buffer.cursor(),
        });
    }

    fn fetch_suggestions(&mut self, language: Language, code: String, cursor: usize) {
        if !SuggestionEngine::should_fetch(&code, cursor) {
            self.engine.clear();
            self.publish_suggestions();
            return;
        }

        let seq = self.engine.begin_request();
        self.publish(SessionOutput::Loading { loading: true });

        let client = self.client.clone();
        let events = self.events_tx.clone();
        let request = CompletionRequest {
            code,
            language,
            cursor_position: cursor,
        };
        tokio::spawn(async move {
            let result = client.complete(request).await.map(|r| r.suggestions);
            let _ = events.send(SessionEvent::CompletionArrived {
                seq,
                language,
                result,
            });
        });
    }

    fn finish_fetch(
        &mut self,
        seq: u64,
        language: Language,
        result: Result<Vec<String>, scratchpad_suggest::SuggestError>,
    ) {
        match self.engine.apply_response(seq, result) {
            ResponseOutcome::Stale => {
                tracing::debug!("Ignoring superseded {} completion (seq {})", language, seq);
            }
            ResponseOutcome::Applied { .. } => {
                self.publish(SessionOutput::Loading { loading: false });
                self.publish_suggestions();
            }
            ResponseOutcome::Failed => {
                self.publish(SessionOutput::Loading { loading: false });
                self.publish_suggestions();
                self.notify(
                    NotificationLevel::Error,
                    "Assistant unavailable",
                    "Could not fetch code suggestions.",
                );
            }
        }
    }

    fn apply_suggestion(&mut self, index: usize) {
        let Some(suggestion) = self.engine.select(index) else {
            return;
        };
        self.publish_suggestions();

        let language = self.active;
        let buffer = self.project.buffer_mut(language);
        let cursor = buffer.cursor();
        match buffer.insert_at(cursor, &suggestion.text) {
            Ok(new_cursor) => {
                self.sync_view();
                self.settle.schedule(SessionEvent::BuffersSettled);

                // Reposition on a later loop iteration, once the widget has
                // re-rendered the committed text.
                let _ = self.events_tx.send(SessionEvent::RepositionCursor {
                    language,
                    cursor: new_cursor,
                });
            }
            Err(e) => tracing::warn!("Suggestion insertion failed: {}", e),
        }
    }

    fn promote_preview(&mut self) {
        let document = compose_document(
            self.project.buffer(Language::Html).text(),
            self.project.buffer(Language::Css).text(),
            self.project.buffer(Language::Javascript).text(),
        );

        let version = {
            let mut view = self.view.write().unwrap();
            view.preview_document = document.clone();
            view.preview_version += 1;
            view.preview_version
        };

        tracing::debug!("Promoted preview snapshot v{}", version);
        self.publish(SessionOutput::Preview { version, document });
    }

    fn save_all(&self) {
        // Saving placeholder values before the load completes would
        // clobber the persisted state that is about to replace them.
        if !self.loaded {
            return;
        }
        for language in Language::ALL {
            let text = self.project.buffer(language).text().to_string();
            save_state(self.store.as_ref(), language.storage_key(), &text);
        }
    }

    fn package_archive(&mut self) {
        let html = self.project.buffer(Language::Html).text();
        let css = self.project.buffer(Language::Css).text();
        let js = self.project.buffer(Language::Javascript).text();

        match write_archive(html, css, js) {
            Ok(bytes) => self.notify(
                NotificationLevel::Info,
                "Download ready",
                format!("Project packaged as {} ({} bytes).", ARCHIVE_FILE_NAME, bytes.len()),
            ),
            Err(e) => {
                tracing::warn!("Failed to package project archive: {}", e);
                self.notify(
                    NotificationLevel::Error,
                    "Download failed",
                    "Could not generate the project archive.",
                );
            }
        }
    }

    fn publish_suggestions(&self) {
        self.publish(SessionOutput::Suggestions {
            items: self.engine.suggestion_texts(),
            open: self.engine.is_open(),
        });
    }

    fn notify(&self, level: NotificationLevel, title: &str, message: impl Into<String>) {
        self.publish(SessionOutput::Notification {
            level,
            title: title.to_string(),
            message: message.into(),
        });
    }

    fn publish(&self, output: SessionOutput) {
        // No connected clients is fine; outputs are best-effort.
        let _ = self.outputs.send(output);
    }

    fn sync_view(&self) {
        let mut view = self.view.write().unwrap();
        for language in Language::ALL {
            let buffer = self.project.buffer(language);
            let pane = view.pane_mut(language);
            pane.text = buffer.text().to_string();
            pane.cursor = buffer.cursor();
        }
    }
}
