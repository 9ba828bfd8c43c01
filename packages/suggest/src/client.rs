//! Client seam for the completion service

use std::collections::VecDeque;
use std::sync::Mutex;

use futures_util::future::BoxFuture;

use crate::{CompletionRequest, CompletionResponse, SuggestResult};

/// Remote completion service abstraction.
///
/// The session holds this behind an `Arc<dyn SuggestionClient>` and issues
/// at most one request per settled burst of cursor activity. An in-flight
/// request is never cancelled; staleness is handled by the engine's
/// sequence check when the response lands.
pub trait SuggestionClient: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'static, SuggestResult<CompletionResponse>>;
}

/// HTTP client posting JSON to a configured completion endpoint
pub struct HttpSuggestionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl SuggestionClient for HttpSuggestionClient {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'static, SuggestResult<CompletionResponse>> {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            tracing::debug!(
                "Requesting completions: language={} cursor={}",
                request.language,
                request.cursor_position
            );

            let response = http
                .post(&endpoint)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;

            let completion: CompletionResponse = response.json().await?;
            Ok(completion)
        })
    }
}

/// Canned client for tests and offline development.
///
/// Responds with queued results in order, falling back to a fixed
/// suggestion list (empty by default) once the queue drains. Every request
/// is recorded for assertions.
pub struct StaticSuggestionClient {
    fixed: Vec<String>,
    queued: Mutex<VecDeque<SuggestResult<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StaticSuggestionClient {
    pub fn new() -> Self {
        Self::with_fixed(Vec::<String>::new())
    }

    /// Client that answers every request with the given suggestions
    pub fn with_fixed<S: Into<String>>(suggestions: Vec<S>) -> Self {
        Self {
            fixed: suggestions.into_iter().map(Into::into).collect(),
            queued: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue one result to be returned before the fixed fallback
    pub fn push_response(&self, result: SuggestResult<CompletionResponse>) {
        self.queued.lock().unwrap().push_back(result);
    }

    /// Requests seen so far, in arrival order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for StaticSuggestionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionClient for StaticSuggestionClient {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'static, SuggestResult<CompletionResponse>> {
        self.requests.lock().unwrap().push(request);

        let result = match self.queued.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(CompletionResponse {
                suggestions: self.fixed.clone(),
            }),
        };

        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SuggestError;
    use scratchpad_document::Language;

    fn request(code: &str, cursor: usize) -> CompletionRequest {
        CompletionRequest {
            code: code.to_string(),
            language: Language::Html,
            cursor_position: cursor,
        }
    }

    #[tokio::test]
    async fn test_static_client_records_requests() {
        let client = StaticSuggestionClient::new();
        client.complete(request("<div>", 5)).await.unwrap();

        let seen = client.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].code, "<div>");
        assert_eq!(seen[0].cursor_position, 5);
    }

    #[tokio::test]
    async fn test_static_client_queue_then_fallback() {
        let client = StaticSuggestionClient::with_fixed(vec!["</div>"]);
        client.push_response(Err(SuggestError::Service("down".to_string())));

        assert!(client.complete(request("a", 1)).await.is_err());

        let fallback = client.complete(request("a", 1)).await.unwrap();
        assert_eq!(fallback.suggestions, vec!["</div>"]);
    }
}
