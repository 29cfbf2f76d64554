//! Monitoring Orchestrator
//!
//! Coordinates the page source, extractor, analyst and update log.
//! Main polling loop that fetches the listing page, diffs against the
//! previous snapshot, and reports changes.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::adapters::update_log::UpdateLog;
use crate::application::analyst::TokenAnalyst;
use crate::domain::{diff, summarize, ChangeSet, Snapshot};
use crate::ports::extractor::SnapshotExtractor;
use crate::ports::page_source::PageSource;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The first fetch failed; without a baseline there is nothing to diff.
    #[error("Initial fetch failed: {0}")]
    InitialFetch(String),
    /// The first page parsed to zero records.
    #[error("Initial snapshot is empty")]
    EmptyInitialSnapshot,
    #[error("Update log write failed: {0}")]
    Log(#[from] std::io::Error),
}

/// Main orchestrator that coordinates polling, diffing and reporting.
pub struct MonitorOrchestrator {
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn SnapshotExtractor>,
    analyst: Option<TokenAnalyst>,
    update_log: UpdateLog,
    poll_interval: Duration,
    retry_delay: Duration,
    recent_limit: usize,
    is_running: Arc<RwLock<bool>>,
}

impl MonitorOrchestrator {
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn SnapshotExtractor>,
        update_log: UpdateLog,
    ) -> Self {
        Self {
            source,
            extractor,
            analyst: None,
            update_log,
            poll_interval: Duration::from_secs(60),
            retry_delay: Duration::from_secs(60),
            recent_limit: 50,
            is_running: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_analyst(mut self, analyst: TokenAnalyst) -> Self {
        self.analyst = Some(analyst);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Fetch the baseline snapshot. Startup is the one place a fetch or
    /// parse failure is fatal.
    pub async fn initialize(&self) -> Result<Snapshot, OrchestratorError> {
        let html = self
            .source
            .fetch_settled()
            .await
            .map_err(|e| OrchestratorError::InitialFetch(e.to_string()))?;

        let snapshot = self.extractor.extract(&html);
        if snapshot.is_empty() {
            return Err(OrchestratorError::EmptyInitialSnapshot);
        }

        info!(agents = snapshot.len(), "initial snapshot captured");

        let summary = summarize(&snapshot, self.recent_limit).render();
        println!("{}", summary);

        // Page order puts the newest listings first
        let recent: Vec<_> = snapshot.iter().take(10).collect();
        self.update_log.log_initial(&recent, &summary)?;

        Ok(snapshot)
    }

    /// Execute one poll cycle against the previous snapshot. Returns the
    /// fresh snapshot, or `None` when the fetch failed and the previous
    /// baseline should be kept.
    pub async fn cycle(
        &self,
        previous: &Snapshot,
    ) -> Result<Option<Snapshot>, OrchestratorError> {
        let html = match self.source.fetch_settled().await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "fetch failed, keeping previous snapshot");
                return Ok(None);
            }
        };

        let snapshot = self.extractor.extract(&html);
        let changes = diff(&snapshot, previous);

        if !changes.is_empty() {
            info!(
                new = changes.new.len(),
                updated = changes.updated.len(),
                removed = changes.removed.len(),
                "changes detected"
            );

            let analyses = self.analyze_new(&changes).await;
            let summary = summarize(&snapshot, self.recent_limit).render();

            self.update_log.log_changes(&changes, &analyses, &summary)?;
            UpdateLog::print_new_agents(&changes);
            println!("{}", summary);
        }

        Ok(Some(snapshot))
    }

    async fn analyze_new(&self, changes: &ChangeSet) -> Vec<String> {
        let Some(analyst) = &self.analyst else {
            return Vec::new();
        };

        let mut analyses = Vec::with_capacity(changes.new.len());
        for token in &changes.new {
            analyses.push(analyst.analyze(token).await);
        }
        analyses
    }

    /// Run the polling loop until stopped.
    pub async fn run(&self) -> Result<(), OrchestratorError> {
        *self.is_running.write().await = true;

        info!(
            poll_interval = ?self.poll_interval,
            recent_limit = self.recent_limit,
            "starting monitor"
        );

        let mut previous = self.initialize().await?;

        while *self.is_running.read().await {
            tokio::time::sleep(self.poll_interval).await;
            if !*self.is_running.read().await {
                break;
            }

            match self.cycle(&previous).await {
                Ok(Some(snapshot)) => previous = snapshot,
                Ok(None) => {
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    // Keep polling; a bad cycle must not kill the monitor
                    error!(error = %e, "cycle failed");
                }
            }
        }

        info!("monitor stopped");
        Ok(())
    }

    /// Stop the polling loop.
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
        info!("stop signal sent to monitor");
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }
}

impl Clone for MonitorOrchestrator {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            extractor: Arc::clone(&self.extractor),
            analyst: self.analyst.clone(),
            update_log: UpdateLog::new(self.update_log.path()),
            poll_interval: self.poll_interval,
            retry_delay: self.retry_delay,
            recent_limit: self.recent_limit,
            is_running: Arc::clone(&self.is_running),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AgentToken;
    use crate::ports::mocks::{MockExtractor, MockPageSource};
    use tempfile::tempdir;

    fn token(name: &str, cap: &str, age: &str) -> AgentToken {
        AgentToken {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            market_cap: cap.to_string(),
            creator: "tester".to_string(),
            age_text: age.to_string(),
            description: "test token".to_string(),
        }
    }

    fn snapshot(tokens: Vec<AgentToken>) -> Snapshot {
        tokens.into_iter().collect()
    }

    fn orchestrator(
        source: MockPageSource,
        extractor: MockExtractor,
        log_path: &std::path::Path,
    ) -> MonitorOrchestrator {
        MonitorOrchestrator::new(
            Arc::new(source),
            Arc::new(extractor),
            UpdateLog::new(log_path),
        )
    }

    #[tokio::test]
    async fn initialize_captures_baseline_and_logs() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("updates_log.txt");

        let source = MockPageSource::new().with_page("<page1>");
        let extractor = MockExtractor::new().with_snapshot(
            "<page1>",
            snapshot(vec![token("Alpha", "12k", "5 minutes ago")]),
        );

        let orch = orchestrator(source, extractor, &log_path);
        let baseline = orch.initialize().await.unwrap();

        assert_eq!(baseline.len(), 1);
        assert!(baseline.contains("Alpha"));

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("=== Initial State at "));
        assert!(content.contains("- Alpha (ALPHA)"));
    }

    #[tokio::test]
    async fn initialize_fails_on_fetch_error() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(
            MockPageSource::new().with_failure(),
            MockExtractor::new(),
            &dir.path().join("updates_log.txt"),
        );

        let result = orch.initialize().await;
        assert!(matches!(result, Err(OrchestratorError::InitialFetch(_))));
    }

    #[tokio::test]
    async fn initialize_fails_on_empty_snapshot() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(
            MockPageSource::new().with_page("<empty>"),
            MockExtractor::new(),
            &dir.path().join("updates_log.txt"),
        );

        let result = orch.initialize().await;
        assert!(matches!(
            result,
            Err(OrchestratorError::EmptyInitialSnapshot)
        ));
    }

    #[tokio::test]
    async fn cycle_reports_new_and_removed() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("updates_log.txt");

        let source = MockPageSource::new().with_page("<page2>");
        let extractor = MockExtractor::new().with_snapshot(
            "<page2>",
            snapshot(vec![token("Bar", "8k", "2 minutes ago")]),
        );

        let orch = orchestrator(source, extractor, &log_path);
        let previous = snapshot(vec![token("Foo", "5k", "an hour ago")]);

        let next = orch.cycle(&previous).await.unwrap().unwrap();
        assert!(next.contains("Bar"));
        assert!(!next.contains("Foo"));

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("New Agents:"));
        assert!(content.contains("- Bar (BAR)"));
        assert!(content.contains("Removed Agents:"));
        assert!(content.contains("- Foo"));
    }

    #[tokio::test]
    async fn cycle_without_changes_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("updates_log.txt");

        let source = MockPageSource::new().with_page("<page>");
        let extractor = MockExtractor::new().with_snapshot(
            "<page>",
            snapshot(vec![token("Same", "5k", "an hour ago")]),
        );

        let orch = orchestrator(source, extractor, &log_path);
        let previous = snapshot(vec![token("Same", "5k", "an hour ago")]);

        let next = orch.cycle(&previous).await.unwrap();
        assert!(next.is_some());
        assert!(!log_path.exists());
    }

    #[tokio::test]
    async fn cycle_fetch_failure_keeps_previous() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(
            MockPageSource::new().with_failure(),
            MockExtractor::new(),
            &dir.path().join("updates_log.txt"),
        );

        let previous = snapshot(vec![token("Keep", "5k", "an hour ago")]);
        let next = orch.cycle(&previous).await.unwrap();
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn stop_clears_running_flag() {
        let dir = tempdir().unwrap();
        let orch = orchestrator(
            MockPageSource::new(),
            MockExtractor::new(),
            &dir.path().join("updates_log.txt"),
        );

        assert!(!orch.is_running().await);
        orch.stop().await;
        assert!(!orch.is_running().await);
    }

    #[tokio::test]
    async fn clone_shares_running_flag() {
        let dir = tempdir().unwrap();
        let orch1 = orchestrator(
            MockPageSource::new(),
            MockExtractor::new(),
            &dir.path().join("updates_log.txt"),
        );
        let orch2 = orch1.clone();

        *orch1.is_running.write().await = true;
        assert!(orch2.is_running().await);

        orch2.stop().await;
        assert!(!orch1.is_running().await);
    }
}
