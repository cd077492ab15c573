use rand::Rng;
use std::time::Duration;

use crate::api::models::{
    DetectedLabels, LlmResponse, ProcessingInfo, QueryResponse, SearchResult, ToxicityLabels,
};
use crate::config::{DEFAULT_DELAY_MAX_MS, DEFAULT_DELAY_MIN_MS};
use crate::error::ConfigError;

/// Inclusive bounds for the artificial processing latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl Default for DelayRange {
    fn default() -> Self {
        DelayRange {
            min: Duration::from_millis(DEFAULT_DELAY_MIN_MS),
            max: Duration::from_millis(DEFAULT_DELAY_MAX_MS),
        }
    }
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidDelay { min, max });
        }
        Ok(DelayRange { min, max })
    }

    /// A range that never sleeps.
    pub fn none() -> Self {
        DelayRange {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// Stands in for the retrieval + classification pipeline: waits a while,
/// then answers with the same canned analysis for every input.
#[derive(Debug, Clone, Default)]
pub struct MockPipeline {
    delay: DelayRange,
}

impl MockPipeline {
    pub fn new(delay: DelayRange) -> MockPipeline {
        MockPipeline { delay }
    }

    pub async fn process(&self, text: String) -> QueryResponse {
        let delay = self.delay.sample();
        log::debug!("simulating pipeline latency of {:?}", delay);
        tokio::time::sleep(delay).await;
        canned_response(text)
    }
}

pub fn canned_response(user_input: String) -> QueryResponse {
    QueryResponse {
        user_input,
        detected_labels: DetectedLabels {
            threat: 0.4934554994106293,
            toxic: 0.7,
        },
        search_results: vec![
            SearchResult {
                rank: 1,
                similarity_score: 0.6099041,
                text: "I hope you die \n\nI hope you die".to_string(),
                labels: ToxicityLabels {
                    toxic: 1,
                    severe_toxic: 0,
                    obscene: 0,
                    threat: 1,
                    insult: 1,
                    identity_hate: 0,
                },
                primary_emotion: "fear".to_string(),
                toxicity_score: 0.5,
            },
            SearchResult {
                rank: 2,
                similarity_score: 0.59951216,
                text: "I'm going to kill you all. \n\nI'm serious. You are all Retarder losers who deserve to die and I'm going to make sure that every single one of you suffers a horrible death.".to_string(),
                labels: ToxicityLabels {
                    toxic: 1,
                    severe_toxic: 0,
                    obscene: 0,
                    threat: 1,
                    insult: 0,
                    identity_hate: 0,
                },
                primary_emotion: "fear".to_string(),
                toxicity_score: 0.3333333333333333,
            },
            SearchResult {
                rank: 3,
                similarity_score: 0.5851651,
                text: "you stupid cunt. (Oh, and I fucked your mother last night. I hope you die.".to_string(),
                labels: ToxicityLabels {
                    toxic: 1,
                    severe_toxic: 1,
                    obscene: 1,
                    threat: 1,
                    insult: 1,
                    identity_hate: 0,
                },
                primary_emotion: "fear".to_string(),
                toxicity_score: 0.8333333333333334,
            },
        ],
        llm_response: LlmResponse {
            analysis_type: "rule_based".to_string(),
            classification: "offensive".to_string(),
            toxicity_ratio: 1.0,
            user_offensive_words: 3,
            confidence: "high".to_string(),
        },
        processing_info: ProcessingInfo {
            confidence_threshold: 0.3,
            search_limit: 3,
            use_local_llm: true,
            similar_examples_found: 3,
        },
    }
}

#[test]
fn test_delay_range_sample_within_bounds() {
    let range = DelayRange::default();
    for _ in 0..1000 {
        let d = range.sample();
        assert!(d >= Duration::from_millis(500) && d <= Duration::from_millis(1200), "{d:?}");
    }
}

#[test]
fn test_delay_range_degenerate() {
    assert_eq!(DelayRange::none().sample(), Duration::ZERO);
    let fixed = DelayRange::new(Duration::from_millis(7), Duration::from_millis(7)).unwrap();
    assert_eq!(fixed.sample(), Duration::from_millis(7));
    assert!(DelayRange::new(Duration::from_secs(2), Duration::from_secs(1)).is_err());
}

#[test]
fn test_delay_range_sample_near_u64_millis_limit() {
    let min = Duration::from_millis(18446744073709551);
    let max = Duration::from_millis(18446744073709552);
    let range = DelayRange::new(min, max).unwrap();
    for _ in 0..100 {
        let d = range.sample();
        assert!(d >= min && d <= max, "{d:?}");
    }

    let widest = DelayRange::new(Duration::ZERO, Duration::from_millis(u64::MAX)).unwrap();
    assert!(widest.sample() <= Duration::from_millis(u64::MAX));
}

#[test]
fn test_canned_response_ranks_are_ordered() {
    let response = canned_response(String::new());
    let ranks: Vec<u32> = response.search_results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(
        response.processing_info.similar_examples_found,
        response.search_results.len() as u32
    );
}
