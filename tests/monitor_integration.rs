//! End-to-end monitor tests over scripted mocks.
//!
//! Drives the orchestrator through initialize and poll cycles without any
//! network, asserting on the returned snapshots and on the update log file.

use std::sync::Arc;

use tempfile::tempdir;

use agentwatch::adapters::update_log::UpdateLog;
use agentwatch::application::{MonitorOrchestrator, TokenAnalyst};
use agentwatch::domain::{AgentToken, Snapshot};
use agentwatch::ports::mocks::{MockExtractor, MockNarrative, MockPageSource};

fn token(name: &str, symbol: &str, cap: &str, age: &str) -> AgentToken {
    AgentToken {
        name: name.to_string(),
        symbol: symbol.to_string(),
        market_cap: cap.to_string(),
        creator: "tester".to_string(),
        age_text: age.to_string(),
        description: format!("{} test token", name),
    }
}

fn snapshot(tokens: Vec<AgentToken>) -> Snapshot {
    tokens.into_iter().collect()
}

#[tokio::test]
async fn full_monitor_pass_reports_all_change_kinds() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("updates_log.txt");

    // First page: Foo and Baz. Second page: Foo repriced, Bar new, Baz gone.
    let source = MockPageSource::new().with_page("<page1>").with_page("<page2>");
    let extractor = MockExtractor::new()
        .with_snapshot(
            "<page1>",
            snapshot(vec![
                token("Foo", "FOO", "5k", "an hour ago"),
                token("Baz", "BAZ", "2k", "2 hours ago"),
            ]),
        )
        .with_snapshot(
            "<page2>",
            snapshot(vec![
                token("Foo", "FOO", "6k", "an hour ago"),
                token("Bar", "BAR", "12k", "5 minutes ago"),
            ]),
        );

    let orchestrator = MonitorOrchestrator::new(
        Arc::new(source),
        Arc::new(extractor),
        UpdateLog::new(&log_path),
    );

    let baseline = orchestrator.initialize().await.unwrap();
    assert_eq!(baseline.len(), 2);

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("=== Initial State at "));
    assert!(content.contains("- Foo (FOO)"));
    assert!(content.contains("- Baz (BAZ)"));
    assert!(content.contains("=== Market Summary"));

    let next = orchestrator.cycle(&baseline).await.unwrap().unwrap();
    assert_eq!(next.len(), 2);
    assert_eq!(next.get("Foo").unwrap().market_cap, "6k");
    assert!(next.contains("Bar"));
    assert!(!next.contains("Baz"));

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("=== Changes detected at "));
    assert!(content.contains("New Agents:"));
    assert!(content.contains("- Bar (BAR)"));
    assert!(content.contains("Updated Agents:"));
    assert!(content.contains("- Foo (FOO)"));
    assert!(content.contains("Market Cap: 6k"));
    assert!(content.contains("Removed Agents:"));
    assert!(content.contains("- Baz"));
}

#[tokio::test]
async fn quiet_cycle_leaves_log_untouched() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("updates_log.txt");

    let page = snapshot(vec![token("Steady", "STD", "8k", "an hour ago")]);
    let source = MockPageSource::new().with_page("<page1>").with_page("<page1>");
    let extractor = MockExtractor::new().with_snapshot("<page1>", page);

    let orchestrator = MonitorOrchestrator::new(
        Arc::new(source),
        Arc::new(extractor),
        UpdateLog::new(&log_path),
    );

    let baseline = orchestrator.initialize().await.unwrap();
    let before = std::fs::read_to_string(&log_path).unwrap();

    let next = orchestrator.cycle(&baseline).await.unwrap().unwrap();
    assert_eq!(next.len(), 1);

    let after = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_baseline() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("updates_log.txt");

    let source = MockPageSource::new().with_page("<page1>").with_failure();
    let extractor = MockExtractor::new().with_snapshot(
        "<page1>",
        snapshot(vec![token("Foo", "FOO", "5k", "an hour ago")]),
    );

    let orchestrator = MonitorOrchestrator::new(
        Arc::new(source),
        Arc::new(extractor),
        UpdateLog::new(&log_path),
    );

    let baseline = orchestrator.initialize().await.unwrap();
    let next = orchestrator.cycle(&baseline).await.unwrap();
    assert!(next.is_none());
    assert!(baseline.contains("Foo"));
}

#[tokio::test]
async fn new_tokens_are_analyzed_with_anchored_rating() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("updates_log.txt");

    // 12k cap at 5 minutes rates Hot. The first reply drops the glyph and is
    // retried; the second carries it and lands in the log.
    let narrative = Arc::new(
        MockNarrative::new()
            .with_reply("promising but no rating emoji")
            .with_reply("\u{1F525} strong early momentum"),
    );

    let source = MockPageSource::new().with_page("<page1>").with_page("<page2>");
    let extractor = MockExtractor::new()
        .with_snapshot(
            "<page1>",
            snapshot(vec![token("Foo", "FOO", "5k", "an hour ago")]),
        )
        .with_snapshot(
            "<page2>",
            snapshot(vec![
                token("Foo", "FOO", "5k", "an hour ago"),
                token("Bar", "BAR", "12k", "5 minutes ago"),
            ]),
        );

    let orchestrator = MonitorOrchestrator::new(
        Arc::new(source),
        Arc::new(extractor),
        UpdateLog::new(&log_path),
    )
    .with_analyst(TokenAnalyst::new(narrative.clone()));

    let baseline = orchestrator.initialize().await.unwrap();
    orchestrator.cycle(&baseline).await.unwrap();

    assert_eq!(narrative.call_count(), 2);
    let (_, prompt) = &narrative.prompts()[0];
    assert!(prompt.contains("Name: Bar"));

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("Initial Analysis:\n\u{1F525} strong early momentum"));
}

#[tokio::test]
async fn analyst_failure_still_logs_the_new_token() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("updates_log.txt");

    let narrative = Arc::new(MockNarrative::new().with_failure());

    let source = MockPageSource::new().with_page("<page1>").with_page("<page2>");
    let extractor = MockExtractor::new()
        .with_snapshot(
            "<page1>",
            snapshot(vec![token("Foo", "FOO", "5k", "an hour ago")]),
        )
        .with_snapshot(
            "<page2>",
            snapshot(vec![
                token("Foo", "FOO", "5k", "an hour ago"),
                token("Bar", "BAR", "12k", "5 minutes ago"),
            ]),
        );

    let orchestrator = MonitorOrchestrator::new(
        Arc::new(source),
        Arc::new(extractor),
        UpdateLog::new(&log_path),
    )
    .with_analyst(TokenAnalyst::new(narrative));

    let baseline = orchestrator.initialize().await.unwrap();
    orchestrator.cycle(&baseline).await.unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("- Bar (BAR)"));
    assert!(content.contains("\u{1F525} Analysis unavailable"));
}
