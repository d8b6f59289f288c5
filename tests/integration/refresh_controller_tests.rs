/*!
 * Integration tests for the refresh workflow
 */

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wordwell::app_config::{Config, WordListKind};
use wordwell::enrichment::Enricher;
use wordwell::errors::SourceError;
use wordwell::providers::WordListSource;
use wordwell::providers::mock::{MockDictionary, MockWordList};
use wordwell::{RefreshController, RefreshState};

use crate::common;

/// Word list whose first fetch is slow and serves a different pool
#[derive(Debug)]
struct SlowFirstWordList {
    calls: AtomicUsize,
    first_delay: Duration,
    second_fails: bool,
}

impl SlowFirstWordList {
    fn new(first_delay_ms: u64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            first_delay: Duration::from_millis(first_delay_ms),
            second_fails: false,
        }
    }

    fn failing_after_first(first_delay_ms: u64) -> Self {
        Self {
            second_fails: true,
            ..Self::new(first_delay_ms)
        }
    }
}

#[async_trait]
impl WordListSource for SlowFirstWordList {
    async fn fetch_all(&self) -> Result<Vec<String>, SourceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.first_delay).await;
            return Ok(common::words(&["old1", "old2", "old3", "old4", "old5", "old6"]));
        }

        if self.second_fails {
            return Err(SourceError::Unavailable("word list went away".to_string()));
        }
        Ok(common::words(&["new1", "new2", "new3", "new4", "new5", "new6"]))
    }
}

fn build_controller(word_list: Arc<dyn WordListSource>, sample_size: usize) -> RefreshController {
    let enricher = Enricher::with_source(Arc::new(MockDictionary::working()));
    RefreshController::new(word_list, enricher, sample_size)
}

#[tokio::test]
async fn test_refresh_withLargePool_shouldReturnFullSample() {
    common::init_logging();
    let controller = build_controller(Arc::new(MockWordList::generated(200)), 5);
    assert!(matches!(controller.latest(), RefreshState::Idle));

    let report = controller.refresh().await.unwrap();

    assert_eq!(report.sample.len(), 5);
    assert_eq!(report.details.len(), 5);
    assert_eq!(report.failed_count(), 0);
    assert!(!report.superseded);

    let distinct: HashSet<&String> = report.sample.iter().collect();
    assert_eq!(distinct.len(), 5);
    for (word, detail) in report.sample.iter().zip(&report.details) {
        assert_eq!(&detail.word, word);
    }

    match controller.latest() {
        RefreshState::Ready(latest) => assert_eq!(latest.ticket, report.ticket),
        other => panic!("expected a published report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_withSmallPool_shouldSampleWholePool() {
    let controller = build_controller(Arc::new(MockWordList::with_words(["cat", "dog"])), 5);

    let report = controller.refresh().await.unwrap();

    let mut sample = report.sample.clone();
    sample.sort();
    assert_eq!(sample, vec!["cat", "dog"]);
    assert_eq!(report.details.len(), 2);
}

#[tokio::test]
async fn test_refresh_withUnavailableWordList_shouldFailWithoutLookups() {
    let dictionary = MockDictionary::working();
    let enricher = Enricher::with_source(Arc::new(dictionary.clone()));
    let controller = RefreshController::new(Arc::new(MockWordList::unavailable()), enricher, 5);

    let result = controller.refresh().await;

    assert!(matches!(result, Err(SourceError::Unavailable(_))));
    assert_eq!(dictionary.request_count(), 0);
    match controller.latest() {
        RefreshState::Failed(message) => assert!(message.contains("unreachable")),
        other => panic!("expected a failed state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_repeated_shouldProduceIndependentSamples() {
    let word_list = MockWordList::generated(500);
    let controller = build_controller(Arc::new(word_list.clone()), 5);

    let first = controller.refresh().await.unwrap();
    let mut any_different = false;
    for _ in 0..20 {
        let next = controller.refresh().await.unwrap();
        assert!(next.ticket > first.ticket);
        any_different |= next.sample != first.sample;
    }

    assert!(any_different);
    assert_eq!(word_list.request_count(), 21);
}

#[tokio::test]
async fn test_refresh_overlapping_shouldPublishNewestOnly() {
    let controller = build_controller(Arc::new(SlowFirstWordList::new(300)), 3);

    let (older, newer) = tokio::join!(controller.refresh(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.refresh().await
    });

    let older = older.unwrap();
    let newer = newer.unwrap();
    assert!(older.superseded);
    assert!(!newer.superseded);
    assert!(newer.ticket > older.ticket);

    match controller.latest() {
        RefreshState::Ready(latest) => {
            assert_eq!(latest.ticket, newer.ticket);
            assert!(latest.sample.iter().all(|w| w.starts_with("new")));
        }
        other => panic!("expected the newer report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_overlapping_withNewerFailure_shouldKeepFailedState() {
    let controller = build_controller(Arc::new(SlowFirstWordList::failing_after_first(300)), 3);

    let (older, newer) = tokio::join!(controller.refresh(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.refresh().await
    });

    assert!(older.unwrap().superseded);
    assert!(newer.is_err());
    assert!(matches!(controller.latest(), RefreshState::Failed(_)));
}

#[tokio::test]
async fn test_withConfig_usingWordFile_shouldRefreshFromFile() -> anyhow::Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "words.txt",
        "alpha\nbravo\ncharlie\ndelta\necho\nfoxtrot\n",
    )?;

    let mut config = Config::default();
    config.sample_size = 3;
    config.word_list.source = WordListKind::File;
    config.word_list.path = Some(path.to_string_lossy().to_string());
    config.dictionary.api_key = "test-key".to_string();
    config.dictionary.endpoint = "http://127.0.0.1:9/".to_string();
    config.dictionary.lookup_timeout_secs = Some(2);
    config.validate()?;

    let controller = RefreshController::with_config(&config)?;
    assert_eq!(controller.sample_size(), 3);

    let report = controller.refresh().await?;
    assert_eq!(report.sample.len(), 3);
    // Nothing listens on the dictionary endpoint
    assert_eq!(report.failed_count(), 3);
    assert!(report.details.iter().all(|d| d.is_empty()));
    Ok(())
}

#[test]
fn test_withConfig_withoutApiKey_shouldFail() {
    let mut config = Config::default();
    config.dictionary.api_key_env = "WORDWELL_TEST_UNSET_KEY_VAR_B".to_string();

    assert!(RefreshController::with_config(&config).is_err());
}
