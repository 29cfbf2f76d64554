//! Hand-rolled port mocks for deterministic tests.
//!
//! Each mock records the calls it receives and plays back scripted responses,
//! so orchestrator and analyst behavior can be tested without any network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::extractor::SnapshotExtractor;
use super::narrative::{NarrativeError, NarrativeGenerator};
use super::page_source::{PageSource, SourceError};
use crate::domain::Snapshot;

/// Mock page source that plays back a scripted sequence of fetch results.
#[derive(Default)]
pub struct MockPageSource {
    responses: Arc<Mutex<VecDeque<Result<String, SourceError>>>>,
    fetch_count: Arc<Mutex<usize>>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful fetch returning the given HTML.
    pub fn with_page(self, html: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(html.to_string()));
        self
    }

    /// Queue a failed fetch.
    pub fn with_failure(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(SourceError::NotSettled { attempts: 3 }));
        self
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_settled(&self) -> Result<String, SourceError> {
        *self.fetch_count.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Http("no scripted response".to_string())))
    }
}

/// Mock extractor that maps exact HTML strings to prebuilt snapshots.
#[derive(Default)]
pub struct MockExtractor {
    pages: Arc<Mutex<Vec<(String, Snapshot)>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the snapshot to return for a given HTML string.
    pub fn with_snapshot(self, html: &str, snapshot: Snapshot) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push((html.to_string(), snapshot));
        self
    }
}

impl SnapshotExtractor for MockExtractor {
    fn extract(&self, html: &str) -> Snapshot {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|(page, _)| page == html)
            .map(|(_, snapshot)| snapshot.clone())
            .unwrap_or_default()
    }
}

/// Mock narrative generator with scripted replies and a call recorder.
#[derive(Default)]
pub struct MockNarrative {
    replies: Arc<Mutex<VecDeque<Result<String, NarrativeError>>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNarrative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next generate call.
    pub fn with_reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    /// Queue an API failure for the next generate call.
    pub fn with_failure(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(NarrativeError::Api("scripted failure".to_string())));
        self
    }

    /// All (system, prompt) pairs received, in order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl NarrativeGenerator for MockNarrative {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, NarrativeError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(NarrativeError::Api("no scripted reply".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_source_plays_back_in_order() {
        let source = MockPageSource::new().with_page("<html>1</html>").with_failure();

        assert_eq!(source.fetch_settled().await.unwrap(), "<html>1</html>");
        assert!(source.fetch_settled().await.is_err());
        // Exhausted script also errors
        assert!(source.fetch_settled().await.is_err());
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn extractor_returns_empty_for_unknown_html() {
        let extractor = MockExtractor::new();
        assert!(extractor.extract("<html></html>").is_empty());
    }

    #[tokio::test]
    async fn narrative_records_prompts() {
        let narrative = MockNarrative::new().with_reply("looks fine");

        let reply = narrative.generate("system", "analyze this").await.unwrap();
        assert_eq!(reply, "looks fine");
        assert_eq!(
            narrative.prompts(),
            vec![("system".to_string(), "analyze this".to_string())]
        );
    }
}
