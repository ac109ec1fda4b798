use async_trait::async_trait;

use crate::error::AgentError;

/// A single pipeline stage. Mockable for testing.
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn process(&self, input: &Self::Input) -> Result<Self::Output, AgentError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use finlearn_models::agent_message::{AnalysisRequest, FinancialAnalysis};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Shared `(stage name, observed text)` entries, in call order.
    pub type CallLog = Arc<Mutex<Vec<(String, String)>>>;

    /// Wraps a real stage and logs what it was handed before delegating.
    pub struct RecordingAgent<A: Agent> {
        inner: A,
        observe: fn(&A::Input) -> String,
        log: CallLog,
    }

    impl<A: Agent> RecordingAgent<A> {
        pub fn new(inner: A, observe: fn(&A::Input) -> String, log: CallLog) -> Self {
            Self {
                inner,
                observe,
                log,
            }
        }
    }

    #[async_trait]
    impl<A: Agent> Agent for RecordingAgent<A> {
        type Input = A::Input;
        type Output = A::Output;

        fn name(&self) -> &str {
            self.inner.name()
        }

        fn description(&self) -> &str {
            self.inner.description()
        }

        async fn process(&self, input: &A::Input) -> Result<A::Output, AgentError> {
            let seen = (self.observe)(input);
            self.log
                .lock()
                .unwrap()
                .push((self.inner.name().to_string(), seen));
            self.inner.process(input).await
        }
    }

    /// Canned analysis stage that counts invocations.
    pub struct MockAnalyst {
        pub calls: AtomicUsize,
        pub should_fail: bool,
    }

    impl MockAnalyst {
        pub fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                should_fail: false,
            }
        }

        pub fn failing() -> Self {
            let mut mock = Self::new();
            mock.should_fail = true;
            mock
        }
    }

    #[async_trait]
    impl Agent for MockAnalyst {
        type Input = AnalysisRequest;
        type Output = FinancialAnalysis;

        fn name(&self) -> &str {
            "MockAnalyst"
        }

        fn description(&self) -> &str {
            "Returns a fixed analysis."
        }

        async fn process(&self, input: &AnalysisRequest) -> Result<FinancialAnalysis, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                return Err(AgentError::Service("Mock failure".to_string()));
            }
            Ok(FinancialAnalysis {
                factual_data: Default::default(),
                analysis_snippets: input.topics.iter().map(|t| format!("About {t}.")).collect(),
                identified_risks: vec!["Market Volatility".to_string()],
            })
        }
    }

    #[tokio::test]
    async fn mock_agent_returns_output() {
        let mock = MockAnalyst::new();
        let request = AnalysisRequest {
            topics: vec!["options".to_string()],
            outline: vec![],
        };

        let result = mock.process(&request).await.unwrap();
        assert_eq!(result.analysis_snippets, vec!["About options.".to_string()]);
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recording_agent_logs_then_delegates() {
        let log = CallLog::default();
        let agent = RecordingAgent::new(
            MockAnalyst::new(),
            |r: &AnalysisRequest| r.topics.join(","),
            log.clone(),
        );
        let request = AnalysisRequest {
            topics: vec!["options".to_string(), "forex".to_string()],
            outline: vec![],
        };

        let result = agent.process(&request).await.unwrap();
        assert_eq!(result.analysis_snippets.len(), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("MockAnalyst".to_string(), "options,forex".to_string())]
        );
    }

    #[tokio::test]
    async fn mock_agent_failure() {
        let mock = MockAnalyst::failing();
        let request = AnalysisRequest {
            topics: vec![],
            outline: vec![],
        };

        let result = mock.process(&request).await;
        assert!(result.is_err());
    }
}
