//! Conversation Controller
//!
//! Owns the message list and the request lifecycle for one chat session.
//!
//! A submission appends the user's question, sends it to the backend and
//! appends exactly one assistant reply: the formatted citations on success,
//! or [`ERROR_REPLY`] on any failure. Only one request may be in flight at a
//! time; submissions made meanwhile are ignored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Instrument;

use crate::client::CompletionBackend;
use crate::format::format_results;
use crate::models::{CompletionRequest, Message, DEFAULT_TOP_K, ERROR_REPLY};

/// Why a submission did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Query was empty or whitespace
    Empty,
    /// Another request is still in flight
    Busy,
}

/// Result of [`Conversation::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended and no request was sent
    Ignored(IgnoreReason),
    /// The formatted results were appended
    Answered(Message),
    /// The request failed and the error reply was appended
    Failed(Message),
}

impl SubmitOutcome {
    /// The assistant message appended by this submission, if any
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SubmitOutcome::Answered(message) | SubmitOutcome::Failed(message) => Some(message),
            SubmitOutcome::Ignored(_) => None,
        }
    }
}

/// Chat session state
pub struct Conversation {
    backend: Arc<dyn CompletionBackend>,
    top_k: u32,
    messages: RwLock<Vec<Message>>,
    busy: AtomicBool,
}

impl Conversation {
    /// Create an empty conversation that requests [`DEFAULT_TOP_K`] results
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self::with_top_k(backend, DEFAULT_TOP_K)
    }

    pub fn with_top_k(backend: Arc<dyn CompletionBackend>, top_k: u32) -> Self {
        Self {
            backend,
            top_k,
            messages: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Snapshot of the conversation so far
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Ask a question.
    ///
    /// Returns immediately with [`SubmitOutcome::Ignored`] for blank queries
    /// or while another submission is pending.
    pub async fn submit(&self, query: &str) -> SubmitOutcome {
        if query.trim().is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Empty);
        }

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Submission ignored: request already in flight");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        self.push(Message::user(query)).await;

        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("submit", %request_id);
        let request = CompletionRequest::new(query, self.top_k);

        let outcome = async {
            tracing::info!(chars = query.len(), top_k = self.top_k, "Sending question");

            match self.backend.complete(&request).await {
                Ok(results) => {
                    tracing::info!(results = results.len(), "Question answered");
                    SubmitOutcome::Answered(Message::assistant(format_results(&results)))
                }
                Err(e) => {
                    tracing::warn!("Search request failed: {}", e);
                    SubmitOutcome::Failed(Message::assistant(ERROR_REPLY))
                }
            }
        }
        .instrument(span)
        .await;

        if let Some(reply) = outcome.reply() {
            self.push(reply.clone()).await;
        }

        outcome
    }

    async fn push(&self, message: Message) {
        self.messages.write().await.push(message);
    }
}

/// Holds the busy flag for the lifetime of one submission
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::models::{LegalResult, Role};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Backend that replays a canned answer and counts calls
    struct StubBackend {
        calls: AtomicUsize,
        answer: fn() -> Result<Vec<LegalResult>, ClientError>,
        gate: Option<Arc<Notify>>,
    }

    impl StubBackend {
        fn new(answer: fn() -> Result<Vec<LegalResult>, ClientError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
                gate: None,
            }
        }

        fn gated(answer: fn() -> Result<Vec<LegalResult>, ClientError>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(answer)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: &CompletionRequest) -> Result<Vec<LegalResult>, ClientError> {
            assert_eq!(request.top_k, DEFAULT_TOP_K);
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.answer)()
        }
    }

    fn no_results() -> Result<Vec<LegalResult>, ClientError> {
        Ok(Vec::new())
    }

    fn server_error() -> Result<Vec<LegalResult>, ClientError> {
        Err(ClientError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        })
    }

    fn one_result() -> Result<Vec<LegalResult>, ClientError> {
        Ok(vec![LegalResult {
            book_roman: "I".to_string(),
            book_name: "General".to_string(),
            chapter_roman: "1".to_string(),
            chapter_name: "Definitions".to_string(),
            article_number: "1".to_string(),
            article_name: "Scope".to_string(),
            content: "This law applies to...".to_string(),
            ..Default::default()
        }])
    }

    fn conversation(backend: &Arc<StubBackend>) -> Conversation {
        Conversation::new(backend.clone())
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let backend = Arc::new(StubBackend::new(no_results));
        let convo = conversation(&backend);

        for query in ["", "   ", "\n\t"] {
            assert_eq!(
                convo.submit(query).await,
                SubmitOutcome::Ignored(IgnoreReason::Empty)
            );
        }

        assert!(convo.is_empty().await);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_results_append_empty_reply() {
        let backend = Arc::new(StubBackend::new(no_results));
        let convo = conversation(&backend);

        let outcome = convo.submit("What is theft?").await;

        assert_eq!(outcome, SubmitOutcome::Answered(Message::assistant("")));
        assert_eq!(
            convo.messages().await,
            vec![Message::user("What is theft?"), Message::assistant("")]
        );
        assert!(!convo.is_busy());
    }

    #[tokio::test]
    async fn test_answer_is_formatted() {
        let backend = Arc::new(StubBackend::new(one_result));
        let convo = conversation(&backend);

        convo.submit("scope").await;

        let messages = convo.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.starts_with("## Article 1: Scope\n"));
    }

    #[tokio::test]
    async fn test_query_text_kept_verbatim() {
        let backend = Arc::new(StubBackend::new(no_results));
        let convo = conversation(&backend);

        convo.submit("  padded question  ").await;

        assert_eq!(convo.messages().await[0], Message::user("  padded question  "));
    }

    #[tokio::test]
    async fn test_server_error_appends_fixed_reply() {
        let backend = Arc::new(StubBackend::new(server_error));
        let convo = conversation(&backend);

        let outcome = convo.submit("What is fraud?").await;

        assert_eq!(outcome, SubmitOutcome::Failed(Message::assistant(ERROR_REPLY)));
        let messages = convo.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, ERROR_REPLY);
        assert!(!convo.is_busy());
    }

    #[tokio::test]
    async fn test_usable_after_failure() {
        let backend = Arc::new(StubBackend::new(server_error));
        let convo = conversation(&backend);

        convo.submit("first").await;
        convo.submit("second").await;

        assert_eq!(convo.len().await, 4);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_ignored() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(StubBackend::gated(no_results, gate.clone()));
        let convo = Arc::new(conversation(&backend));

        let pending = tokio::spawn({
            let convo = convo.clone();
            async move { convo.submit("first").await }
        });

        while !convo.is_busy() {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            convo.submit("second").await,
            SubmitOutcome::Ignored(IgnoreReason::Busy)
        );

        gate.notify_one();
        let outcome = pending.await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Answered(_)));
        assert_eq!(backend.calls(), 1);
        assert_eq!(
            convo.messages().await,
            vec![Message::user("first"), Message::assistant("")]
        );
        assert!(!convo.is_busy());
    }
}
