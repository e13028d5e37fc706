//! Conversation Orchestrator - sequences one visitor turn end to end.
//!
//! Per turn: resolve the session (creating a provider thread only when the
//! request carries none), post the visitor's message verbatim, start a run,
//! wait for it through the poller, fetch the newest assistant reply, then
//! hand the configured source text to the lead extractor and dispatch any
//! qualifying record on a detached task. The turn's reply never waits on
//! lead forwarding and never observes its failure.
//!
//! There is no shared mutable state here: everything a turn needs lives in
//! the request or at the provider, so one orchestrator instance serves any
//! number of concurrent sessions.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::chat::{TurnReply, TurnRequest};
use crate::domain::lead::{extract, ExtractionSource};
use crate::ports::{AssistantClient, AssistantError, LeadSink, MessageRole};

use super::poller::{PollError, RunPoller};

/// Reply used when the completed run produced no textual content.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't get a reply.";

/// Errors that fail a turn.
///
/// Everything here collapses to one generic user-facing failure at the HTTP
/// boundary; the variants exist for logs and tests, not for the visitor.
#[derive(Debug, Error)]
pub enum TurnError {
    /// A provider call failed outside the poll loop.
    #[error("assistant provider error: {0}")]
    Provider(#[from] AssistantError),

    /// The run did not complete successfully.
    #[error("run did not complete: {0}")]
    Run(#[from] PollError),
}

/// Top-level coordinator for conversation turns.
pub struct ChatOrchestrator {
    client: Arc<dyn AssistantClient>,
    poller: RunPoller,
    assistant_id: String,
    extraction_source: ExtractionSource,
    lead_sink: Option<Arc<dyn LeadSink>>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator without lead forwarding.
    pub fn new(
        client: Arc<dyn AssistantClient>,
        poller: RunPoller,
        assistant_id: impl Into<String>,
        extraction_source: ExtractionSource,
    ) -> Self {
        Self {
            client,
            poller,
            assistant_id: assistant_id.into(),
            extraction_source,
            lead_sink: None,
        }
    }

    /// Enables lead forwarding through the given sink.
    pub fn with_lead_sink(mut self, sink: Arc<dyn LeadSink>) -> Self {
        self.lead_sink = Some(sink);
        self
    }

    /// Processes one visitor turn.
    pub async fn handle_turn(&self, request: TurnRequest) -> Result<TurnReply, TurnError> {
        // Session resolve: adopt the caller's thread or create one lazily.
        // A thread id is never invented locally.
        let thread_id = match request.thread_id.clone() {
            Some(id) => id,
            None => {
                let id = self.client.create_thread().await?;
                tracing::info!(thread_id = %id, "new session thread created");
                id
            }
        };

        self.client
            .post_message(&thread_id, MessageRole::User, &request.message)
            .await?;

        let run_id = self
            .client
            .create_run(&thread_id, &self.assistant_id)
            .await?;

        self.poller
            .wait_until_done(self.client.as_ref(), &thread_id, &run_id)
            .await?;

        let messages = self.client.list_messages(&thread_id).await?;
        let response = messages
            .first()
            .filter(|m| m.role == MessageRole::Assistant && !m.text.is_empty())
            .map(|m| m.text.clone())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        self.capture_lead(&request.message, &response);

        Ok(TurnReply {
            response,
            thread_id,
        })
    }

    /// Extracts a lead from the configured source text and, when the record
    /// qualifies, dispatches delivery on a detached task.
    fn capture_lead(&self, user_text: &str, reply_text: &str) {
        let Some(sink) = self.lead_sink.clone() else {
            return;
        };

        let source_text = match self.extraction_source {
            ExtractionSource::User => user_text,
            ExtractionSource::Assistant => reply_text,
        };

        let lead = extract(source_text, self.extraction_source);
        if !lead.has_identity() {
            tracing::trace!("no lead signals in turn");
            return;
        }

        tracing::info!("lead captured, forwarding");
        tokio::spawn(async move {
            if let Err(err) = sink.deliver(&lead).await {
                tracing::warn!(error = %err, "lead forwarding failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::domain::chat::RunStatus;
    use crate::domain::lead::LeadRecord;
    use crate::ports::{LeadSinkError, ThreadMessage};

    /// Fake provider: records calls, serves a scripted run status sequence
    /// and a fixed reply.
    struct FakeProvider {
        created_threads: AtomicUsize,
        posted: Mutex<Vec<(String, String)>>,
        statuses: Mutex<Vec<RunStatus>>,
        reply: Mutex<Vec<ThreadMessage>>,
    }

    impl FakeProvider {
        fn new(statuses: Vec<RunStatus>, reply: Vec<ThreadMessage>) -> Self {
            let mut statuses = statuses;
            statuses.reverse();
            Self {
                created_threads: AtomicUsize::new(0),
                posted: Mutex::new(Vec::new()),
                statuses: Mutex::new(statuses),
                reply: Mutex::new(reply),
            }
        }

        fn answering(text: &str) -> Self {
            Self::new(
                vec![RunStatus::Completed],
                vec![ThreadMessage::new(MessageRole::Assistant, text)],
            )
        }

        fn threads_created(&self) -> usize {
            self.created_threads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssistantClient for FakeProvider {
        async fn create_thread(&self) -> Result<String, AssistantError> {
            self.created_threads.fetch_add(1, Ordering::SeqCst);
            Ok("thread_new".to_string())
        }

        async fn post_message(
            &self,
            thread_id: &str,
            _role: MessageRole,
            content: &str,
        ) -> Result<(), AssistantError> {
            self.posted
                .lock()
                .unwrap()
                .push((thread_id.to_string(), content.to_string()));
            Ok(())
        }

        async fn create_run(
            &self,
            _thread_id: &str,
            _assistant_id: &str,
        ) -> Result<String, AssistantError> {
            Ok("run_1".to_string())
        }

        async fn run_status(
            &self,
            _thread_id: &str,
            _run_id: &str,
        ) -> Result<RunStatus, AssistantError> {
            Ok(self
                .statuses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(RunStatus::Completed))
        }

        async fn list_messages(
            &self,
            _thread_id: &str,
        ) -> Result<Vec<ThreadMessage>, AssistantError> {
            Ok(self.reply.lock().unwrap().clone())
        }
    }

    /// Sink that records deliveries and optionally fails them.
    struct RecordingSink {
        delivered: Mutex<Vec<LeadRecord>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn delivery_count(&self) -> usize {
            self.delivered.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LeadSink for RecordingSink {
        async fn deliver(&self, lead: &LeadRecord) -> Result<(), LeadSinkError> {
            if self.fail {
                return Err(LeadSinkError::Unreachable("simulated outage".to_string()));
            }
            self.delivered.lock().unwrap().push(lead.clone());
            Ok(())
        }
    }

    fn orchestrator(provider: Arc<FakeProvider>) -> ChatOrchestrator {
        ChatOrchestrator::new(
            provider,
            RunPoller::new(Duration::from_millis(10), Duration::from_secs(5)),
            "asst_test",
            ExtractionSource::User,
        )
    }

    /// Lets detached forwarding tasks run to completion.
    async fn drain_tasks() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn new_session_creates_thread_and_returns_its_id() {
        let provider = Arc::new(FakeProvider::answering("Hello!"));
        let orch = orchestrator(provider.clone());

        let request = TurnRequest::new("Hi", None).unwrap();
        let reply = orch.handle_turn(request).await.unwrap();

        assert_eq!(reply.thread_id, "thread_new");
        assert_eq!(reply.response, "Hello!");
        assert_eq!(provider.threads_created(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn existing_session_is_reused_verbatim() {
        let provider = Arc::new(FakeProvider::answering("Welcome back."));
        let orch = orchestrator(provider.clone());

        let request = TurnRequest::new("Hi again", Some("thread_prior".to_string())).unwrap();
        let reply = orch.handle_turn(request).await.unwrap();

        assert_eq!(reply.thread_id, "thread_prior");
        assert_eq!(provider.threads_created(), 0);
        let posted = provider.posted.lock().unwrap();
        assert_eq!(posted[0], ("thread_prior".to_string(), "Hi again".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn run_failure_fails_the_turn() {
        let provider = Arc::new(FakeProvider::new(
            vec![RunStatus::Queued, RunStatus::Failed],
            vec![],
        ));
        let orch = orchestrator(provider);

        let request = TurnRequest::new("Hi", None).unwrap();
        let result = orch.handle_turn(request).await;
        assert!(matches!(
            result,
            Err(TurnError::Run(PollError::RunFailed { .. }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_reply_text_substitutes_fallback() {
        // Newest entry is the visitor's own message: no assistant text.
        let provider = Arc::new(FakeProvider::new(
            vec![RunStatus::Completed],
            vec![ThreadMessage::new(MessageRole::User, "Hi")],
        ));
        let orch = orchestrator(provider);

        let reply = orch
            .handle_turn(TurnRequest::new("Hi", None).unwrap())
            .await
            .unwrap();
        assert_eq!(reply.response, FALLBACK_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn qualifying_lead_is_forwarded() {
        let provider = Arc::new(FakeProvider::answering("Thanks for the info!"));
        let sink = Arc::new(RecordingSink::new());
        let orch = orchestrator(provider).with_lead_sink(sink.clone());

        let request =
            TurnRequest::new("My name is Dana, email dana@example.com", None).unwrap();
        orch.handle_turn(request).await.unwrap();
        drain_tasks().await;

        assert_eq!(sink.delivery_count(), 1);
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered[0].name, "Dana");
        assert_eq!(delivered[0].email, "dana@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_record_is_never_forwarded() {
        let provider = Arc::new(FakeProvider::answering("Happy to help!"));
        let sink = Arc::new(RecordingSink::new());
        let orch = orchestrator(provider).with_lead_sink(sink.clone());

        let request = TurnRequest::new("just chatting, no details", None).unwrap();
        orch.handle_turn(request).await.unwrap();
        drain_tasks().await;

        assert_eq!(sink.delivery_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn forwarding_failure_does_not_affect_the_turn() {
        let provider = Arc::new(FakeProvider::answering("Got it, thanks Dana!"));
        let sink = Arc::new(RecordingSink::failing());
        let orch = orchestrator(provider).with_lead_sink(sink);

        let request =
            TurnRequest::new("My name is Dana, email dana@example.com", None).unwrap();
        let reply = orch.handle_turn(request).await.unwrap();
        drain_tasks().await;

        assert_eq!(reply.response, "Got it, thanks Dana!");
        assert_eq!(reply.thread_id, "thread_new");
    }

    #[tokio::test(start_paused = true)]
    async fn assistant_source_extracts_from_reply() {
        let provider = Arc::new(FakeProvider::answering(
            "Summary - Name: Dana\nEmail: dana@example.com",
        ));
        let sink = Arc::new(RecordingSink::new());
        let orch = ChatOrchestrator::new(
            provider,
            RunPoller::new(Duration::from_millis(10), Duration::from_secs(5)),
            "asst_test",
            ExtractionSource::Assistant,
        )
        .with_lead_sink(sink.clone());

        let request = TurnRequest::new("here you go", None).unwrap();
        orch.handle_turn(request).await.unwrap();
        drain_tasks().await;

        assert_eq!(sink.delivery_count(), 1);
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered[0].email, "dana@example.com");
    }
}
